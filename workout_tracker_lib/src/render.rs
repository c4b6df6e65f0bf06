//! Display pieces for a workout: the map marker with its popup and the values
//! shown in its list entry.

use crate::workout::{Activity, Coords, Workout};

#[derive(Debug, Clone, PartialEq)]
pub struct PopupOptions {
    pub max_width: f64,
    pub min_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub coords: Coords,
    pub content: String,
    pub popup: PopupOptions,
}

pub fn marker(workout: &Workout) -> MarkerSpec {
    MarkerSpec {
        coords: workout.coords(),
        content: popup_content(workout),
        popup: PopupOptions {
            max_width: 250.,
            min_width: 100.,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", workout.kind()),
        },
    }
}

pub fn popup_content(workout: &Workout) -> String {
    format!("{} {}", workout.kind().icon(), workout.description())
}

/// One labelled value in a list entry, e.g. `⏱ 30 min`.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// Everything a list entry shows besides its title, in display order.
pub fn details(workout: &Workout) -> Vec<Detail> {
    let mut details = vec![
        Detail::new(workout.kind().icon(), workout.distance().to_string(), "mi"),
        Detail::new("⏱", workout.duration().to_string(), "min"),
    ];

    match workout.activity() {
        Activity::Running { cadence, pace } => {
            details.push(Detail::new("⚡️", format!("{pace:.1}"), "min/mi"));
            details.push(Detail::new("🦶🏼", cadence.to_string(), "spm"));
        }
        Activity::Cycling { elevation_gain, speed } => {
            details.push(Detail::new("⚡️", format!("{speed:.1}"), "mi/h"));
            details.push(Detail::new("⛰", elevation_gain.to_string(), "m"));
        }
    }

    details
}

/// CSS class of the `<li>` holding a workout.
pub fn entry_class(workout: &Workout) -> String {
    format!("workout workout--{}", workout.kind())
}
