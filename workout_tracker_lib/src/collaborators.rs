//! What the session needs from the outside world. The browser shell binds
//! these to Leaflet and the DOM, tests bind them to recorders.

use std::time::Duration;

use crate::{config::TileLayerConfig, error::LocationError, render::MarkerSpec, workout::{Coords, Workout}};

pub type LocationResult = Result<Coords, LocationError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    /// Seconds.
    pub duration: f64,
}

pub trait MapView {
    /// Creates the map centered on `center` and starts forwarding clicks.
    fn load(&mut self, center: Coords, zoom: f64, tiles: &TileLayerConfig);
    fn add_marker(&mut self, marker: &MarkerSpec);
    fn set_view(&mut self, center: Coords, zoom: f64, pan: Option<PanOptions>);
}

/// The form and the workout list.
pub trait WorkoutView {
    /// Reveals the form and focuses the distance input.
    fn show_form(&mut self);
    /// Clears every input and hides the form. Its layout display mode comes
    /// back after `restore_after`.
    fn hide_form(&mut self, restore_after: Duration);
    /// Swaps the cadence row for the elevation row or back.
    fn toggle_elevation_field(&mut self);
    /// Inserts the entry directly after the form.
    fn insert_entry(&mut self, workout: &Workout);
    fn alert(&mut self, message: &str);
    /// Starts over from a fresh page.
    fn reload(&mut self);
}
