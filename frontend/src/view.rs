use std::time::Duration;

use gloo_console::error;
use gloo_utils::window;
use workout_tracker_lib::{collaborators::WorkoutView, workout::Workout};
use yew::html::Scope;

use crate::{App, AppMsg};

/// Forwards what the session wants shown to the root component. Alerts and
/// reloads go straight to the window.
pub struct YewWorkoutView {
    link: Scope<App>,
}

impl YewWorkoutView {
    pub fn new(link: Scope<App>) -> Self {
        Self { link }
    }
}

impl WorkoutView for YewWorkoutView {
    fn show_form(&mut self) {
        self.link.send_message(AppMsg::ShowForm);
    }

    fn hide_form(&mut self, restore_after: Duration) {
        self.link.send_message(AppMsg::HideForm(restore_after));
    }

    fn toggle_elevation_field(&mut self) {
        self.link.send_message(AppMsg::ToggleElevationField);
    }

    fn insert_entry(&mut self, workout: &Workout) {
        self.link.send_message(AppMsg::InsertEntry(workout.clone()));
    }

    fn alert(&mut self, message: &str) {
        if window().alert_with_message(message).is_err() {
            error!(format!("Could not show alert: {}", message));
        }
    }

    fn reload(&mut self) {
        if let Err(e) = window().location().reload() {
            error!(format!("Reload failed: {:?}", e));
        }
    }
}
