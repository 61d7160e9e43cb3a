mod chart_controller;
mod chart_sync;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod geo_controller;
mod invalidation;
mod media_sync;
mod observers;
mod playback_controller;
mod query_controller;
mod selection_controller;
mod validation;

pub use engine::{OVERLAY_LAYER_ID, SyncEngine};
pub use engine_config::SyncEngineConfig;
pub use engine_init::SyncEngineParts;
pub use engine_snapshot::SyncSnapshot;
pub use geo_controller::DragOutcome;
pub use invalidation::ChartInvalidation;
pub use media_sync::{MediaBinding, MediaSyncReport};
pub use query_controller::{QueryCompletion, QueryStatus};
