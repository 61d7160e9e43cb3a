//! Observer hooks for host-side extensions.
//!
//! Keep extensions read-only with respect to engine state.

mod observers;

pub use observers::{SyncContext, SyncEvent, SyncObserver};
