use thiserror::Error;

/// Why a submitted form could not become a workout.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidWorkout {
    #[error("unknown workout type {0:?}")]
    UnknownType(String),
    #[error("{0} must be a number")]
    NotFinite(&'static str),
    #[error("{0} must be positive")]
    NotPositive(&'static str),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("failed to encode workouts: {0}")]
    Encode(serde_json::Error),
    #[error("stored workouts are corrupt: {0}")]
    Decode(serde_json::Error),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("position unavailable")]
    Unavailable,
}
