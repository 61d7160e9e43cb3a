use serde::{Deserialize, Serialize};

use crate::core::{GeoPoint, OverlaySizing, TemperatureUnit, TimelineConfig};
use crate::error::{SyncError, SyncResult};
use crate::query::TimeRange;

use super::validation::validate_engine_config;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load their
/// setup without inventing an ad-hoc format. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncEngineConfig {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub overlay: OverlaySizing,
    /// Location shown on view-ready and used for the fallback retry.
    #[serde(default = "default_point")]
    pub default_point: GeoPoint,
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,
    #[serde(default = "default_grid_step_degrees")]
    pub grid_step_degrees: f64,
    #[serde(default = "default_zoom_debounce_ms")]
    pub zoom_debounce_ms: f64,
    #[serde(default = "TimeRange::multi_decade_default")]
    pub default_time_range: TimeRange,
    #[serde(default = "default_milestone_years")]
    pub milestone_years: Vec<i32>,
    #[serde(default)]
    pub initial_unit: TemperatureUnit,
}

impl Default for SyncEngineConfig {
    fn default() -> Self {
        Self {
            timeline: TimelineConfig::default(),
            overlay: OverlaySizing::default(),
            default_point: default_point(),
            default_zoom: default_zoom(),
            grid_step_degrees: default_grid_step_degrees(),
            zoom_debounce_ms: default_zoom_debounce_ms(),
            default_time_range: TimeRange::multi_decade_default(),
            milestone_years: default_milestone_years(),
            initial_unit: TemperatureUnit::default(),
        }
    }
}

impl SyncEngineConfig {
    #[must_use]
    pub fn with_timeline(mut self, timeline: TimelineConfig) -> Self {
        self.timeline = timeline;
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: OverlaySizing) -> Self {
        self.overlay = overlay;
        self
    }

    /// Sets the view-ready and fallback location.
    #[must_use]
    pub fn with_default_point(mut self, point: GeoPoint) -> Self {
        self.default_point = point;
        self
    }

    #[must_use]
    pub fn with_default_zoom(mut self, zoom: f64) -> Self {
        self.default_zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_grid_step_degrees(mut self, step: f64) -> Self {
        self.grid_step_degrees = step;
        self
    }

    #[must_use]
    pub fn with_zoom_debounce_ms(mut self, delay_ms: f64) -> Self {
        self.zoom_debounce_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_default_time_range(mut self, range: TimeRange) -> Self {
        self.default_time_range = range;
        self
    }

    #[must_use]
    pub fn with_milestone_years(mut self, years: Vec<i32>) -> Self {
        self.milestone_years = years;
        self
    }

    #[must_use]
    pub fn with_initial_unit(mut self, unit: TemperatureUnit) -> Self {
        self.initial_unit = unit;
        self
    }

    pub fn validate(&self) -> SyncResult<()> {
        validate_engine_config(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> SyncResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SyncError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> SyncResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| SyncError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_point() -> GeoPoint {
    GeoPoint::new(-77.0369, 38.9072)
}

fn default_zoom() -> f64 {
    1.0
}

fn default_grid_step_degrees() -> f64 {
    0.25
}

fn default_zoom_debounce_ms() -> f64 {
    100.0
}

fn default_milestone_years() -> Vec<i32> {
    vec![1950, 1975, 2000, 2025, 2050, 2075, 2100]
}
