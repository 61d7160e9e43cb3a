use crate::core::{Catalog, DatasetSelection, OverlayGeometry, PlaybackClock, VitalsSummary};
use crate::extensions::SyncObserver;
use crate::host::TourStore;
use crate::interaction::{GeoInteractionState, TouchTracker};
use crate::query::QueryDispatcher;

use super::{
    MediaSyncReport, SyncEngineConfig, chart_sync::ChartSynchronizer,
    media_sync::MediaSynchronizer,
};

/// Internal engine state used by the public facade (`SyncEngine`).
///
/// Every field has exactly one writer: the controller impl block that owns
/// the matching concern.
pub(super) struct EngineCore {
    pub(super) config: SyncEngineConfig,
    pub(super) catalog: Catalog,
    pub(super) selection: DatasetSelection,
    pub(super) clock: PlaybackClock,
    pub(super) media: MediaSynchronizer,
    pub(super) last_media_report: MediaSyncReport,
    pub(super) geo: GeoInteractionState,
    pub(super) overlay: Option<OverlayGeometry>,
    pub(super) dispatcher: QueryDispatcher,
    pub(super) chart: ChartSynchronizer,
    pub(super) touch: TouchTracker,
    pub(super) vitals: Option<VitalsSummary>,
    pub(super) tour_store: Box<dyn TourStore>,
    pub(super) observers: Vec<Box<dyn SyncObserver>>,
}
