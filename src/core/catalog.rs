use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// How a variable's values should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Upstream values are degrees Fahrenheit.
    #[default]
    Temperature,
    Scalar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    /// Converts an upstream Fahrenheit value into this unit.
    #[must_use]
    pub fn convert_from_fahrenheit(self, fahrenheit: f64) -> f64 {
        match self {
            Self::Fahrenheit => fahrenheit,
            Self::Celsius => (fahrenheit - 32.0) * 5.0 / 9.0,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Fahrenheit => Self::Celsius,
            Self::Celsius => Self::Fahrenheit,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Fahrenheit => "°F",
            Self::Celsius => "°C",
        }
    }
}

/// One emissions scenario of a dataset, backed by its own video layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    /// Attribute name of this scenario in sample responses (e.g. `heatmax_ssp126`).
    pub key: String,
    pub service_url: String,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub unit_kind: UnitKind,
    /// Optional `[start, end]` range in epoch milliseconds.
    #[serde(default)]
    pub datetime_range: Option<(i64, i64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub variables: Vec<Variable>,
}

impl Dataset {
    /// Scenario keys in variable order.
    pub fn scenario_keys(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|variable| variable.key.as_str())
    }
}

/// Ordered dataset catalog loaded from host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    pub datasets: Vec<Dataset>,
}

impl Catalog {
    pub fn from_json_str(input: &str) -> SyncResult<Self> {
        let catalog: Self = serde_json::from_str(input)
            .map_err(|e| SyncError::InvalidConfig(format!("failed to parse catalog json: {e}")))?;
        catalog.validate()
    }

    pub fn validate(self) -> SyncResult<Self> {
        if self.datasets.is_empty() {
            return Err(SyncError::InvalidConfig(
                "catalog must contain at least one dataset".to_owned(),
            ));
        }
        for dataset in &self.datasets {
            if dataset.variables.is_empty() {
                return Err(SyncError::InvalidConfig(format!(
                    "dataset `{}` has no variables",
                    dataset.name
                )));
            }
            for variable in &dataset.variables {
                if variable.key.is_empty() || variable.service_url.is_empty() {
                    return Err(SyncError::InvalidConfig(format!(
                        "variable `{}` of dataset `{}` needs a key and a service url",
                        variable.name, dataset.name
                    )));
                }
                if let Some((start, end)) = variable.datetime_range {
                    if start > end {
                        return Err(SyncError::InvalidConfig(format!(
                            "variable `{}` has an inverted datetime range",
                            variable.name
                        )));
                    }
                }
            }
        }
        Ok(self)
    }

    pub fn select(&self, dataset: usize, variable: usize) -> SyncResult<DatasetSelection> {
        let chosen = self
            .datasets
            .get(dataset)
            .filter(|d| variable < d.variables.len())
            .ok_or(SyncError::UnknownSelection { dataset, variable })?;
        Ok(DatasetSelection {
            dataset_index: dataset,
            variable_index: variable,
            dataset: chosen.clone(),
        })
    }
}

/// Active dataset and variable, replaced wholesale on every tab or modal
/// choice. Only `Catalog::select` and `with_variable` build one, so the
/// variable index is always in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSelection {
    dataset_index: usize,
    variable_index: usize,
    dataset: Dataset,
}

impl DatasetSelection {
    #[must_use]
    pub fn dataset_index(&self) -> usize {
        self.dataset_index
    }

    #[must_use]
    pub fn variable_index(&self) -> usize {
        self.variable_index
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn variable(&self) -> &Variable {
        &self.dataset.variables[self.variable_index]
    }

    #[must_use]
    pub fn scenario_keys(&self) -> Vec<String> {
        self.dataset.scenario_keys().map(str::to_owned).collect()
    }

    #[must_use]
    pub fn with_variable(&self, variable_index: usize) -> Option<Self> {
        (variable_index < self.dataset.variables.len()).then(|| Self {
            variable_index,
            ..self.clone()
        })
    }
}
