use crate::host::{ChartWidget, SceneView};

use super::engine_core::EngineCore;

/// Layer id of the buffer/crosshair graphics layer.
pub const OVERLAY_LAYER_ID: &str = "point-of-interest-overlay";

/// Main orchestration facade consumed by host applications.
///
/// `SyncEngine` keeps the globe scene, every media layer and the chart in
/// lockstep. Hosts forward their events (frame callbacks, clicks, drags,
/// zoom, chart picks, query completions) to the matching method; the engine
/// answers with side effects on the collaborators plus, where I/O is needed,
/// a `PendingQuery` for the host to perform.
pub struct SyncEngine<S: SceneView, C: ChartWidget> {
    pub(super) scene: S,
    pub(super) chart: C,
    pub(super) camera_snapshot: Option<S::Camera>,
    pub(super) core: EngineCore,
}

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    #[must_use]
    pub fn chart(&self) -> &C {
        &self.chart
    }

    #[must_use]
    pub fn into_parts(self) -> (S, C) {
        (self.scene, self.chart)
    }
}
