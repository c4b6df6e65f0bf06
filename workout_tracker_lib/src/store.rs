use std::collections::HashMap;

use tracing::{error, warn};

use crate::{error::StorageError, workout::Workout};

/// A string key-value store such as the browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub fn encode_snapshot(workouts: &[Workout]) -> Result<String, StorageError> {
    serde_json::to_string(workouts).map_err(StorageError::Encode)
}

pub fn decode_snapshot(snapshot: &str) -> Result<Vec<Workout>, StorageError> {
    serde_json::from_str(snapshot).map_err(StorageError::Decode)
}

/// The whole workout collection kept under a single key, overwritten on every save.
pub struct WorkoutStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), StorageError> {
        let snapshot = encode_snapshot(workouts)?;
        self.backend.set(&self.key, &snapshot)
    }

    /// Missing or unreadable snapshots load as an empty collection.
    pub fn load(&self) -> Vec<Workout> {
        let snapshot = match self.backend.get(&self.key) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Failed to read stored workouts: {e}");
                return Vec::new();
            }
        };

        decode_snapshot(&snapshot).unwrap_or_else(|e| {
            warn!("Ignoring stored workouts: {e}");
            Vec::new()
        })
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.backend.remove(&self.key)
    }
}
