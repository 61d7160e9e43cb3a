use serde::{Deserialize, Serialize};

use crate::core::{Frame, GeoPoint, PlaybackState, TemperatureUnit};
use crate::error::QueryFailureKind;
use crate::query::{QueryOrigin, QueryValidity, RequestToken};

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncContext {
    pub playback: PlaybackState,
    pub point_of_interest: Option<GeoPoint>,
    pub zoom: f64,
    pub dataset_index: usize,
    pub variable_index: usize,
    pub unit: TemperatureUnit,
    pub chart_points: usize,
    pub query_validity: Option<QueryValidity>,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SyncEvent {
    FrameAdvanced { frame: Frame, wrapped: bool },
    PlaybackToggled { is_playing: bool },
    PointSelected { point: GeoPoint },
    OverlayUpdated { radius_km: f64 },
    QueryIssued { token: RequestToken, origin: QueryOrigin },
    QueryFallback { token: RequestToken },
    ChartDataReplaced { points: usize },
    QueryFailed { kind: QueryFailureKind },
    StaleResponseDropped { token: RequestToken },
    ChartRebuilt { series: usize, points: usize },
    SelectionChanged { dataset_index: usize, variable_index: usize },
}

/// Hook interface for bounded custom logic such as analytics or UI badges.
///
/// Observers see events and a context snapshot but never engine internals.
pub trait SyncObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: SyncEvent, context: SyncContext);
}
