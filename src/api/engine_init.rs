use tracing::debug;

use crate::core::{Catalog, PlaybackClock};
use crate::error::{SyncError, SyncResult};
use crate::host::{ChartWidget, SceneLayer, SceneView, TourStore};
use crate::interaction::{GeoInteractionState, TouchTracker};
use crate::query::QueryDispatcher;

use super::{
    ChartInvalidation, MediaBinding, MediaSyncReport, OVERLAY_LAYER_ID, SyncEngine,
    SyncEngineConfig, chart_sync::ChartSynchronizer, engine_core::EngineCore,
    media_sync::MediaSynchronizer,
};

/// Collaborators handed to `SyncEngine::new`.
pub struct SyncEngineParts<S, C> {
    pub scene: S,
    pub chart: C,
    /// One binding per variable layer. Layer ids are catalog variable names;
    /// when none of them are, slots follow variable order instead.
    pub media: Vec<MediaBinding>,
    pub catalog: Catalog,
    pub tour_store: Box<dyn TourStore>,
}

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    /// Creates a fully initialized engine.
    ///
    /// The scene capability check runs before anything else; a failure is
    /// returned as `SyncError::SceneInit` and nothing is registered.
    pub fn new(parts: SyncEngineParts<S, C>, config: SyncEngineConfig) -> SyncResult<Self> {
        let SyncEngineParts {
            mut scene,
            chart,
            media,
            catalog,
            tour_store,
        } = parts;

        scene.check_capabilities().map_err(SyncError::SceneInit)?;
        config.validate()?;
        let catalog = catalog.validate()?;
        let selection = catalog.select(0, 0)?;
        let clock = PlaybackClock::new(config.timeline)?;

        let media = MediaSynchronizer::new(media, &catalog)?;
        for layer_id in media.layer_ids() {
            let video = catalog
                .datasets
                .iter()
                .flat_map(|dataset| dataset.variables.iter())
                .find(|variable| variable.name == layer_id)
                .and_then(|variable| variable.video.clone());
            scene.add_layer(SceneLayer::Media {
                id: layer_id.to_owned(),
                video,
            });
        }
        scene.add_layer(SceneLayer::Overlay {
            id: OVERLAY_LAYER_ID.to_owned(),
        });

        debug!(
            media_layers = media.len(),
            datasets = catalog.datasets.len(),
            "sync engine initialized"
        );

        let mut engine = Self {
            scene,
            chart,
            camera_snapshot: None,
            core: EngineCore {
                geo: GeoInteractionState::new(config.default_zoom, config.zoom_debounce_ms),
                dispatcher: QueryDispatcher::new(config.default_point),
                chart: ChartSynchronizer::new(config.initial_unit),
                config,
                catalog,
                selection,
                clock,
                media,
                last_media_report: MediaSyncReport::default(),
                overlay: None,
                touch: TouchTracker::default(),
                vitals: None,
                tour_store,
                observers: Vec::new(),
            },
        };

        engine.apply_layer_opacity();
        engine.core.chart.invalidate(ChartInvalidation::Full);
        engine.flush_chart();
        Ok(engine)
    }
}
