use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::extensions::{SyncContext, SyncEvent, SyncObserver};
use crate::host::{ChartWidget, SceneView};

use super::SyncEngine;

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    /// Adds an observer after every one already registered.
    ///
    /// Ids must be non-empty and unique; events reach observers in
    /// registration order.
    pub fn register_observer(&mut self, observer: Box<dyn SyncObserver>) -> SyncResult<()> {
        let id = observer.id();
        if id.is_empty() {
            return Err(SyncError::InvalidInput(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observer_position(id).is_some() {
            return Err(SyncError::InvalidInput(format!(
                "observer `{id}` is already registered"
            )));
        }
        debug!(observer = id, "observer registered");
        self.core.observers.push(observer);
        Ok(())
    }

    /// Returns `true` when an observer with `observer_id` was removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        let Some(position) = self.observer_position(observer_id) else {
            return false;
        };
        self.core.observers.remove(position);
        debug!(observer = observer_id, "observer unregistered");
        true
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.core.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observer_position(observer_id).is_some()
    }

    fn observer_position(&self, observer_id: &str) -> Option<usize> {
        self.core
            .observers
            .iter()
            .position(|observer| observer.id() == observer_id)
    }

    pub(super) fn observer_context(&self) -> SyncContext {
        SyncContext {
            playback: self.core.clock.state(),
            point_of_interest: self.core.geo.point_of_interest(),
            zoom: self.core.geo.zoom(),
            dataset_index: self.core.selection.dataset_index(),
            variable_index: self.core.selection.variable_index(),
            unit: self.core.chart.unit(),
            chart_points: self.core.chart.data().len(),
            query_validity: self.core.dispatcher.validity(),
        }
    }

    /// Context is built once per event, and only when someone listens.
    pub(super) fn emit_event(&mut self, event: SyncEvent) {
        if self.core.observers.is_empty() {
            return;
        }
        let context = self.observer_context();
        for observer in &mut self.core.observers {
            observer.on_event(event, context);
        }
    }
}
