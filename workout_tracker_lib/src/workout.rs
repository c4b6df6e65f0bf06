use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Local, Month, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InvalidWorkout;

/// A map position, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = InvalidWorkout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(InvalidWorkout::UnknownType(other.to_owned())),
        }
    }
}

/// The variant-specific part of a workout. The `type` tag decides which
/// derived metric is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    Running {
        cadence: f64,
        #[serde(deserialize_with = "infinite_if_null")]
        pace: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        elevation_gain: f64,
        #[serde(deserialize_with = "infinite_if_null")]
        speed: f64,
    },
}

/// JSON has no infinity, serde_json writes it as `null`. A tiny distance or
/// duration can overflow a derived metric, so read `null` back as infinite.
fn infinite_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: String,
    date: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    description: String,
    #[serde(flatten)]
    activity: Activity,
}

impl Workout {
    /// Running workout stamped with the current time.
    pub fn new_running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        let date = Utc::now();
        Self::running(timestamp_id(&date), date, coords, distance, duration, cadence)
    }

    /// Cycling workout stamped with the current time.
    pub fn new_cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64) -> Self {
        let date = Utc::now();
        Self::cycling(timestamp_id(&date), date, coords, distance, duration, elevation_gain)
    }

    /// No validation happens here, a zero distance gives an infinite pace.
    pub fn running(id: String, date: DateTime<Utc>, coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        let pace = duration / distance;
        Self::with_activity(id, date, coords, distance, duration, Activity::Running { cadence, pace })
    }

    /// No validation happens here, a zero duration gives an infinite speed.
    pub fn cycling(id: String, date: DateTime<Utc>, coords: Coords, distance: f64, duration: f64, elevation_gain: f64) -> Self {
        let speed = distance / (duration / 60.);
        Self::with_activity(id, date, coords, distance, duration, Activity::Cycling { elevation_gain, speed })
    }

    fn with_activity(id: String, date: DateTime<Utc>, coords: Coords, distance: f64, duration: f64, activity: Activity) -> Self {
        let kind = match activity {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        };
        let description = describe(kind, &date.with_timezone(&Local));

        Self {
            id,
            date,
            coords,
            distance,
            duration,
            description,
            activity,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.activity {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace, .. } => Some(pace),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed, .. } => Some(speed),
            Activity::Running { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { cadence, .. } => Some(cadence),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { elevation_gain, .. } => Some(elevation_gain),
            Activity::Running { .. } => None,
        }
    }
}

/// "Running on March 4"
pub fn describe(kind: WorkoutKind, date: &impl Datelike) -> String {
    let month = u8::try_from(date.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or_default();

    format!("{} on {} {}", kind.label(), month, date.day())
}

/// Last ten digits of the epoch milliseconds, zero padded.
pub fn timestamp_id(date: &DateTime<Utc>) -> String {
    format!("{:010}", date.timestamp_millis().rem_euclid(ID_MODULUS))
}

pub(crate) const ID_MODULUS: i64 = 10_000_000_000;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn running_pace_is_duration_over_distance() {
        let w = Workout::running("1".into(), at(2024, 3, 4), Coords::new(40., -75.), 5., 30., 178.);
        assert_eq!(w.pace(), Some(6.0));
        assert_eq!(w.speed(), None);
        assert_eq!(w.cadence(), Some(178.));
        assert_eq!(w.elevation_gain(), None);
        assert_eq!(w.kind(), WorkoutKind::Running);
        assert_eq!(w.activity(), &Activity::Running { cadence: 178., pace: 6.0 });
    }

    #[test]
    fn cycling_speed_is_per_hour() {
        let w = Workout::cycling("2".into(), at(2024, 3, 4), Coords::new(0., 0.), 20., 60., -50.);
        assert_eq!(w.speed(), Some(20.0));
        assert_eq!(w.pace(), None);
        assert_eq!(w.elevation_gain(), Some(-50.));
        assert_eq!(w.cadence(), None);

        let w = Workout::cycling("3".into(), at(2024, 3, 4), Coords::new(0., 0.), 15., 45., 0.);
        assert_eq!(w.speed(), Some(15. / (45. / 60.)));
    }

    #[test]
    fn zero_inputs_are_not_guarded() {
        let w = Workout::running("1".into(), at(2024, 3, 4), Coords::new(0., 0.), 0., 30., 170.);
        assert_eq!(w.pace(), Some(f64::INFINITY));

        let w = Workout::cycling("1".into(), at(2024, 3, 4), Coords::new(0., 0.), 10., 0., 0.);
        assert_eq!(w.speed(), Some(f64::INFINITY));
    }

    #[test]
    fn description_uses_local_month_and_day() {
        let date = at(2024, 3, 4);
        let w = Workout::running("1".into(), date, Coords::new(0., 0.), 5., 30., 170.);
        let local = date.with_timezone(&Local);
        let month = Month::try_from(local.month() as u8).unwrap().name();
        assert_eq!(w.description(), format!("Running on {} {}", month, local.day()));
    }

    #[test]
    fn describe_formats_kind_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(describe(WorkoutKind::Cycling, &date), "Cycling on December 25");

        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(describe(WorkoutKind::Running, &date), "Running on January 1");
    }

    #[test]
    fn new_running_is_described_with_today() {
        let w = Workout::new_running(Coords::new(40., -75.), 5., 30., 178.);
        let today = Local::now();
        assert!(w.description().starts_with("Running on "));
        assert!(w.description().ends_with(&format!(" {}", today.day())));
        assert_eq!(w.id().len(), 10);
    }

    #[test]
    fn timestamp_id_keeps_ten_digits() {
        let date = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(timestamp_id(&date), "0000000123");

        let date = Utc.timestamp_millis_opt(1_712_345_678_901).unwrap();
        assert_eq!(timestamp_id(&date), "2345678901");
    }

    #[test]
    fn kind_parses_from_form_value() {
        assert_eq!("running".parse::<WorkoutKind>(), Ok(WorkoutKind::Running));
        assert_eq!("cycling".parse::<WorkoutKind>(), Ok(WorkoutKind::Cycling));
        assert_eq!("swimming".parse::<WorkoutKind>(), Err(InvalidWorkout::UnknownType("swimming".into())));
    }
}
