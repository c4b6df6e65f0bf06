use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing_subscriber::EnvFilter;

use crate::{
    collaborators::{MapView, PanOptions, WorkoutView},
    config::TileLayerConfig,
    render::MarkerSpec,
    workout::{Clock, Coords, Workout},
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("workout_tracker_lib=debug")))
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    Load(Coords, f64),
    Marker(MarkerSpec),
    SetView(Coords, f64, Option<PanOptions>),
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub calls: Vec<MapCall>,
}

impl MapView for RecordingMap {
    fn load(&mut self, center: Coords, zoom: f64, _tiles: &TileLayerConfig) {
        self.calls.push(MapCall::Load(center, zoom));
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        self.calls.push(MapCall::Marker(marker.clone()));
    }

    fn set_view(&mut self, center: Coords, zoom: f64, pan: Option<PanOptions>) {
        self.calls.push(MapCall::SetView(center, zoom, pan));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    ShowForm,
    HideForm(Duration),
    ToggleElevation,
    InsertEntry(String),
    Alert(String),
    Reload,
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
}

impl RecordingView {
    /// Ids of inserted list entries, in insertion order.
    pub fn entries(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::InsertEntry(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl WorkoutView for RecordingView {
    fn show_form(&mut self) {
        self.calls.push(ViewCall::ShowForm);
    }

    fn hide_form(&mut self, restore_after: Duration) {
        self.calls.push(ViewCall::HideForm(restore_after));
    }

    fn toggle_elevation_field(&mut self) {
        self.calls.push(ViewCall::ToggleElevation);
    }

    fn insert_entry(&mut self, workout: &Workout) {
        self.calls.push(ViewCall::InsertEntry(workout.id().to_owned()));
    }

    fn alert(&mut self, message: &str) {
        self.calls.push(ViewCall::Alert(message.to_owned()));
    }

    fn reload(&mut self) {
        self.calls.push(ViewCall::Reload);
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
