use serde::{Deserialize, Serialize};

use crate::core::{ChartData, GeoPoint, PlaybackState, TemperatureUnit, VitalsSummary};
use crate::error::{SyncError, SyncResult};
use crate::host::{ChartWidget, SceneView};
use crate::interaction::DragPhase;

use super::{MediaSyncReport, QueryStatus, SyncEngine};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub playback: PlaybackState,
    pub point_of_interest: Option<GeoPoint>,
    pub zoom: f64,
    pub overlay_radius_km: Option<f64>,
    pub drag_phase: DragPhase,
    pub dataset_index: usize,
    pub variable_index: usize,
    pub unit: TemperatureUnit,
    pub active_chart_index: Option<usize>,
    pub chart_data: ChartData,
    pub query: QueryStatus,
    pub media: MediaSyncReport,
    pub vitals: Option<VitalsSummary>,
}

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    #[must_use]
    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            playback: self.playback_state(),
            point_of_interest: self.point_of_interest(),
            zoom: self.zoom(),
            overlay_radius_km: self.overlay().map(|overlay| overlay.radius_km),
            drag_phase: self.drag_phase(),
            dataset_index: self.core.selection.dataset_index(),
            variable_index: self.core.selection.variable_index(),
            unit: self.temperature_unit(),
            active_chart_index: self.active_chart_index(),
            chart_data: self.chart_data().clone(),
            query: self.query_status(),
            media: self.last_media_report(),
            vitals: self.vitals(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> SyncResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| SyncError::InvalidInput(format!("failed to serialize snapshot: {e}")))
    }
}
