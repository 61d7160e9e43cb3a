use serde::{Deserialize, Serialize};

use crate::core::{ChartData, TemperatureUnit, UnitKind};

/// One scenario line handed to the chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledLine {
    pub key: String,
    pub label: String,
    pub values: Vec<f64>,
    /// The line of the currently selected scenario.
    pub emphasized: bool,
}

/// Full chart dataset: shared x labels plus every scenario line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartSeriesSet {
    pub labels: Vec<String>,
    pub lines: Vec<LabeledLine>,
    pub unit_symbol: Option<String>,
}

impl ChartSeriesSet {
    /// Builds the widget payload from chart data; temperature values are
    /// converted into `unit`.
    #[must_use]
    pub fn build(
        data: &ChartData,
        line_labels: &[(String, String)],
        selected_index: usize,
        unit_kind: UnitKind,
        unit: TemperatureUnit,
    ) -> Self {
        let convert = |raw: f64| match unit_kind {
            UnitKind::Temperature => unit.convert_from_fahrenheit(raw),
            UnitKind::Scalar => raw,
        };

        let lines = line_labels
            .iter()
            .enumerate()
            .map(|(index, (key, label))| LabeledLine {
                key: key.clone(),
                label: label.clone(),
                values: data
                    .points()
                    .iter()
                    .map(|point| point.value(key).map_or(f64::NAN, convert))
                    .collect(),
                emphasized: index == selected_index,
            })
            .collect();

        Self {
            labels: data.labels(),
            lines,
            unit_symbol: match unit_kind {
                UnitKind::Temperature => Some(unit.symbol().to_owned()),
                UnitKind::Scalar => None,
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
