use tracing::{debug, trace};

use crate::core::{ChartData, DatasetSelection, Frame, TemperatureUnit, TimelineConfig};
use crate::host::{ChartSeriesSet, ChartWidget};

use super::ChartInvalidation;

/// Result of flushing pending chart work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ChartFlush {
    pub(super) rebuilt: Option<(usize, usize)>,
}

/// Owns the shared chart data and keeps the cheap highlight path apart from
/// full dataset rebuilds.
pub(super) struct ChartSynchronizer {
    data: ChartData,
    unit: TemperatureUnit,
    active_index: Option<usize>,
    pending: ChartInvalidation,
}

impl ChartSynchronizer {
    pub(super) fn new(unit: TemperatureUnit) -> Self {
        Self {
            data: ChartData::empty(),
            unit,
            active_index: None,
            pending: ChartInvalidation::None,
        }
    }

    pub(super) fn data(&self) -> &ChartData {
        &self.data
    }

    pub(super) fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub(super) fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub(super) fn pending(&self) -> ChartInvalidation {
        self.pending
    }

    /// Replaces chart data in full; no incremental merge.
    pub(super) fn replace_data(&mut self, data: ChartData) {
        self.data = data;
        self.invalidate(ChartInvalidation::Full);
    }

    pub(super) fn set_unit(&mut self, unit: TemperatureUnit) {
        if self.unit != unit {
            self.unit = unit;
            self.invalidate(ChartInvalidation::Full);
        }
    }

    /// Selected scenario changed; line emphasis must be rebuilt.
    pub(super) fn scenario_changed(&mut self) {
        self.invalidate(ChartInvalidation::Full);
    }

    /// `clamp(floor(frame / fps), 0, len - 1)`; no-op on an empty series.
    pub(super) fn on_frame_advance(&mut self, frame: Frame, timeline: TimelineConfig) {
        self.active_index = timeline.frame_to_index(frame, self.data.len());
        if self.active_index.is_some() {
            self.invalidate(ChartInvalidation::ActiveIndex);
        }
    }

    pub(super) fn invalidate(&mut self, level: ChartInvalidation) {
        self.pending = self.pending.max(level);
    }

    pub(super) fn flush<C: ChartWidget>(
        &mut self,
        chart: &mut C,
        selection: &DatasetSelection,
    ) -> ChartFlush {
        let level = std::mem::take(&mut self.pending);
        let scenario = selection.variable_index();
        let mut flush = ChartFlush { rebuilt: None };

        if level == ChartInvalidation::Full {
            let line_labels: Vec<(String, String)> = selection
                .dataset()
                .variables
                .iter()
                .map(|variable| (variable.key.clone(), variable.name.clone()))
                .collect();
            let series = ChartSeriesSet::build(
                &self.data,
                &line_labels,
                scenario,
                selection.variable().unit_kind,
                self.unit,
            );
            chart.set_series(&series);
            debug!(
                series = series.lines.len(),
                points = series.labels.len(),
                unit = series.unit_symbol.as_deref().unwrap_or(""),
                "chart dataset rebuilt"
            );
            flush.rebuilt = Some((series.lines.len(), series.labels.len()));
        }

        if level >= ChartInvalidation::ActiveIndex {
            if let Some(index) = self.active_index.filter(|&i| i < self.data.len()) {
                trace!(series = scenario, index, "chart highlight moved");
                chart.set_active_element(scenario, index);
            }
        }
        flush
    }
}
