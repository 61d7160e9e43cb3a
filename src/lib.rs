//! climate-mapper: map, video and chart synchronization engine for a
//! climate-projection globe viewer.
//!
//! A single playback clock drives every video layer and the chart highlight
//! in lockstep; globe interaction (click, drag, search, zoom) turns into
//! overlay geometry and remote sample queries whose results feed one shared
//! annual time series. Rendering, media decoding and charting stay with the
//! host behind the traits in [`host`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod host;
pub mod interaction;
pub mod query;
pub mod telemetry;

pub use api::{SyncEngine, SyncEngineConfig, SyncEngineParts};
pub use error::{SyncError, SyncResult};
