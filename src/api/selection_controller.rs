use tracing::debug;

use crate::core::{Catalog, ChartData, DatasetSelection};
use crate::error::{SyncError, SyncResult};
use crate::extensions::SyncEvent;
use crate::host::{ChartWidget, SceneView};
use crate::query::PendingQuery;

use super::SyncEngine;

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.core.catalog
    }

    #[must_use]
    pub fn selection(&self) -> &DatasetSelection {
        &self.core.selection
    }

    /// Switches dataset, resetting the variable to the first one.
    ///
    /// Scenario keys change with the dataset, so chart data is dropped and
    /// the current point is re-queried when one is selected.
    pub fn select_dataset(&mut self, dataset_index: usize) -> SyncResult<Option<PendingQuery>> {
        let selection = self.core.catalog.select(dataset_index, 0)?;
        self.core.chart.replace_data(ChartData::empty());
        self.replace_selection(selection);
        self.core
            .geo
            .point_of_interest()
            .map(|point| self.issue_query(point))
            .transpose()
    }

    /// Switches scenario within the current dataset; visual only, no query.
    pub fn select_variable(&mut self, variable_index: usize) -> SyncResult<()> {
        let selection = self
            .core
            .selection
            .with_variable(variable_index)
            .ok_or(SyncError::UnknownSelection {
                dataset: self.core.selection.dataset_index(),
                variable: variable_index,
            })?;
        self.replace_selection(selection);
        Ok(())
    }

    fn replace_selection(&mut self, selection: DatasetSelection) {
        let dataset_index = selection.dataset_index();
        let variable_index = selection.variable_index();
        debug!(
            dataset = selection.dataset().name.as_str(),
            variable = selection.variable().name.as_str(),
            "selection replaced"
        );
        self.core.selection = selection;
        self.apply_layer_opacity();
        self.core.chart.scenario_changed();
        self.core
            .chart
            .on_frame_advance(self.core.clock.current_frame(), self.core.config.timeline);
        self.flush_chart();
        self.emit_event(SyncEvent::SelectionChanged {
            dataset_index,
            variable_index,
        });
    }

    /// Selected layer fully opaque, every other media layer hidden.
    pub(super) fn apply_layer_opacity(&mut self) {
        let active = self.core.media.active_slot(&self.core.selection);
        for (slot, layer_id) in self.core.media.layer_ids().enumerate() {
            let opacity = if Some(slot) == active { 1.0 } else { 0.0 };
            self.scene.set_layer_opacity(layer_id, opacity);
        }
    }
}
