//! Raw form values and the validation that turns them into a workout.
//!
//! Distance and duration must be finite and positive for both kinds. Cadence
//! must also be positive, while elevation gain only has to be finite since a
//! descent is a legitimate ride.

use chrono::{DateTime, Utc};

use crate::{
    error::InvalidWorkout,
    workout::{Coords, Workout, WorkoutKind},
};

/// Text exactly as read from the form inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Validated numbers waiting for an id, a date and a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDraft {
    Running { distance: f64, duration: f64, cadence: f64 },
    Cycling { distance: f64, duration: f64, elevation_gain: f64 },
}

impl FormInput {
    pub fn parse(&self) -> Result<WorkoutDraft, InvalidWorkout> {
        let kind: WorkoutKind = self.kind.trim().parse()?;
        let distance = coerce_number(&self.distance);
        let duration = coerce_number(&self.duration);

        match kind {
            WorkoutKind::Running => {
                let cadence = coerce_number(&self.cadence);
                all_finite(&[("distance", distance), ("duration", duration), ("cadence", cadence)])?;
                all_positive(&[("distance", distance), ("duration", duration), ("cadence", cadence)])?;
                Ok(WorkoutDraft::Running { distance, duration, cadence })
            }
            WorkoutKind::Cycling => {
                let elevation_gain = coerce_number(&self.elevation);
                all_finite(&[("distance", distance), ("duration", duration), ("elevation gain", elevation_gain)])?;
                all_positive(&[("distance", distance), ("duration", duration)])?;
                Ok(WorkoutDraft::Cycling { distance, duration, elevation_gain })
            }
        }
    }
}

impl WorkoutDraft {
    pub fn build(self, id: String, date: DateTime<Utc>, coords: Coords) -> Workout {
        match self {
            WorkoutDraft::Running { distance, duration, cadence } => {
                Workout::running(id, date, coords, distance, duration, cadence)
            }
            WorkoutDraft::Cycling { distance, duration, elevation_gain } => {
                Workout::cycling(id, date, coords, distance, duration, elevation_gain)
            }
        }
    }
}

/// Numeric coercion as a browser applies it to input text: blank is zero and
/// anything unparsable is NaN.
pub fn coerce_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.;
    }
    text.parse().unwrap_or(f64::NAN)
}

fn all_finite(inputs: &[(&'static str, f64)]) -> Result<(), InvalidWorkout> {
    match inputs.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(InvalidWorkout::NotFinite(*field)),
        None => Ok(()),
    }
}

fn all_positive(inputs: &[(&'static str, f64)]) -> Result<(), InvalidWorkout> {
    match inputs.iter().find(|(_, value)| *value <= 0.) {
        Some((field, _)) => Err(InvalidWorkout::NotPositive(*field)),
        None => Ok(()),
    }
}
