use std::time::Duration;

use const_format::concatcp;
use serde::Deserialize;

pub const DEFAULT_STORAGE_KEY: &str = "workouts";
pub const DEFAULT_ZOOM_LEVEL: f64 = 13.;

pub const TILE_HOST: &str = "https://{s}.tile.openstreetmap.fr";
pub const TILE_URL: &str = concatcp!(TILE_HOST, "/hot/{z}/{x}/{y}.png");
pub const OSM_COPYRIGHT_URL: &str = "https://www.openstreetmap.org/copyright";
pub const TILE_ATTRIBUTION: &str = concatcp!("&copy; <a href=\"", OSM_COPYRIGHT_URL, "\">OpenStreetMap</a> contributors");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TileLayerConfig {
    pub url: String,
    pub attribution: String,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url: TILE_URL.into(),
            attribution: TILE_ATTRIBUTION.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub zoom_level: f64,
    pub storage_key: String,
    /// How long the hidden form waits before its layout is restored.
    pub form_restore_delay_ms: u64,
    /// Seconds spent panning to a selected workout.
    pub pan_duration: f64,
    pub tiles: TileLayerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM_LEVEL,
            storage_key: DEFAULT_STORAGE_KEY.into(),
            form_restore_delay_ms: 1000,
            pan_duration: 1.,
            tiles: TileLayerConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Config embedded in the page. No config at all means defaults, a
    /// malformed one is an error.
    pub fn from_page(json: Option<&str>) -> Result<Self, serde_json::Error> {
        match json {
            Some(json) if !json.trim().is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }

    pub fn form_restore_delay(&self) -> Duration {
        Duration::from_millis(self.form_restore_delay_ms)
    }
}

#[test]
fn partial_config_keeps_defaults() {
    let config = SessionConfig::from_json(r#"{ "zoom_level": 15, "tiles": { "url": "https://tiles.example/{z}/{x}/{y}.png" } }"#).unwrap();

    assert_eq!(config.zoom_level, 15.);
    assert_eq!(config.storage_key, "workouts");
    assert_eq!(config.form_restore_delay(), Duration::from_secs(1));
    assert_eq!(config.tiles.url, "https://tiles.example/{z}/{x}/{y}.png");
    assert_eq!(config.tiles.attribution, TILE_ATTRIBUTION);
}

#[test]
fn page_config_is_optional_but_must_parse() {
    assert_eq!(SessionConfig::from_page(None).unwrap(), SessionConfig::default());
    assert_eq!(SessionConfig::from_page(Some("  \n")).unwrap(), SessionConfig::default());
    assert_eq!(SessionConfig::from_page(Some(r#"{ "pan_duration": 0.5 }"#)).unwrap().pan_duration, 0.5);
    assert!(SessionConfig::from_page(Some("{ zoom_level: 15")).is_err());
}

#[test]
fn tile_url_points_at_hot_style() {
    assert_eq!(TILE_URL, "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png");
}
