use crate::core::ScreenPoint;
use crate::error::{SyncError, SyncResult};

use super::SyncEngineConfig;

pub(super) fn validate_engine_config(config: &SyncEngineConfig) -> SyncResult<()> {
    config.timeline.validate()?;
    config.overlay.validate()?;
    config.default_point.validate().map_err(|_| {
        SyncError::InvalidConfig("default_point must be a valid lon/lat coordinate".to_owned())
    })?;

    if !config.default_zoom.is_finite() {
        return Err(SyncError::InvalidConfig(
            "default_zoom must be finite".to_owned(),
        ));
    }
    if !config.grid_step_degrees.is_finite() || config.grid_step_degrees <= 0.0 {
        return Err(SyncError::InvalidConfig(
            "grid_step_degrees must be finite and > 0".to_owned(),
        ));
    }
    if !config.zoom_debounce_ms.is_finite() || config.zoom_debounce_ms < 0.0 {
        return Err(SyncError::InvalidConfig(
            "zoom_debounce_ms must be finite and >= 0".to_owned(),
        ));
    }
    if config.default_time_range.start > config.default_time_range.end {
        return Err(SyncError::InvalidConfig(
            "default_time_range start must not be after its end".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_zoom(zoom: f64) -> SyncResult<f64> {
    if !zoom.is_finite() {
        return Err(SyncError::InvalidInput(format!(
            "zoom level must be finite, got {zoom}"
        )));
    }
    Ok(zoom)
}

pub(super) fn validate_screen_point(screen: ScreenPoint) -> SyncResult<ScreenPoint> {
    if !screen.is_finite() {
        return Err(SyncError::InvalidInput(
            "screen position must be finite".to_owned(),
        ));
    }
    Ok(screen)
}
