use tracing::{debug, trace};

use crate::core::{ChartData, Frame, Milestone, ScreenPoint, TemperatureUnit, UnitKind};
use crate::error::SyncResult;
use crate::extensions::SyncEvent;
use crate::host::{ChartWidget, SceneView};
use crate::interaction::{TouchGesture, TouchPhase};

use super::{ChartInvalidation, SyncEngine};
use super::validation::validate_screen_point;

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    #[must_use]
    pub fn chart_data(&self) -> &ChartData {
        self.core.chart.data()
    }

    /// Index currently highlighted on the chart.
    #[must_use]
    pub fn active_chart_index(&self) -> Option<usize> {
        self.core.chart.active_index()
    }

    #[must_use]
    pub fn pending_chart_invalidation(&self) -> ChartInvalidation {
        self.core.chart.pending()
    }

    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.core.chart.unit()
    }

    /// Flips Fahrenheit/Celsius and rebuilds the chart. Returns the new unit.
    pub fn toggle_temperature_unit(&mut self) -> TemperatureUnit {
        let unit = self.core.chart.unit().toggled();
        self.set_temperature_unit(unit);
        unit
    }

    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) {
        self.core.chart.set_unit(unit);
        self.flush_chart();
    }

    /// Milestone-year summary of the selected scenario in the current unit.
    #[must_use]
    pub fn milestones(&self) -> Vec<Milestone> {
        let variable = self.core.selection.variable();
        let unit = match variable.unit_kind {
            UnitKind::Temperature => Some(self.core.chart.unit()),
            UnitKind::Scalar => None,
        };
        self.core
            .chart
            .data()
            .milestones(&self.core.config.milestone_years, &variable.key, unit)
    }

    /// Click or tap on the chart: jump playback to the nearest data point.
    ///
    /// Returns the new frame, or `None` when the chart has no data.
    pub fn on_chart_pick(&mut self, screen: ScreenPoint) -> SyncResult<Option<Frame>> {
        let screen = validate_screen_point(screen)?;
        if self.core.chart.data().is_empty() {
            return Ok(None);
        }
        let Some(index) = self.chart.nearest_point_to(screen) else {
            return Ok(None);
        };
        let frame = self.core.config.timeline.index_to_frame(index);
        self.core.clock.set_current_frame(frame)?;
        debug!(index, frame, "chart pick moved playback");
        self.propagate_frame(frame, false);
        Ok(Some(frame))
    }

    /// Touch phase on the chart. Only a tap picks; a scroll never changes
    /// the frame.
    pub fn on_chart_touch(&mut self, phase: TouchPhase) -> SyncResult<Option<Frame>> {
        match self.core.touch.on_phase(phase) {
            Some(TouchGesture::Tap(position)) => self.on_chart_pick(position),
            Some(TouchGesture::Scroll) => {
                trace!("chart touch treated as scroll");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub(super) fn flush_chart(&mut self) {
        let flush = self
            .core
            .chart
            .flush(&mut self.chart, &self.core.selection);
        if let Some((series, points)) = flush.rebuilt {
            self.emit_event(SyncEvent::ChartRebuilt { series, points });
        }
    }
}
