use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::TemperatureUnit;
use crate::error::{SyncError, SyncResult};

/// One validated sample: a timestamp and one finite value per scenario key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSample {
    pub timestamp_ms: i64,
    pub values: IndexMap<String, f64>,
}

impl ScenarioSample {
    pub fn year(&self) -> SyncResult<i32> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp_ms)
            .map(|time| time.year())
            .ok_or_else(|| {
                SyncError::MalformedResponse(format!(
                    "timestamp {} is out of range",
                    self.timestamp_ms
                ))
            })
    }
}

/// Chart-ready annual point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub year_label: String,
    pub values: IndexMap<String, f64>,
}

impl TimeSeriesPoint {
    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

/// Milestone-year summary value (`None` renders as "N/A").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub year: i32,
    pub value: Option<i64>,
}

/// Single shared series feeding the chart, ordered by year ascending.
///
/// Every point carries the same scenario keys and each year appears once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartData {
    points: Vec<TimeSeriesPoint>,
}

impl ChartData {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Groups samples by UTC calendar year and keeps the maximum per scenario.
    pub fn from_samples(samples: &[ScenarioSample], scenario_keys: &[String]) -> SyncResult<Self> {
        let mut yearly: BTreeMap<i32, IndexMap<String, f64>> = BTreeMap::new();
        for sample in samples {
            let year = sample.year()?;
            let slot = yearly.entry(year).or_insert_with(|| {
                scenario_keys
                    .iter()
                    .map(|key| (key.clone(), f64::NEG_INFINITY))
                    .collect()
            });
            for key in scenario_keys {
                let value = sample.values.get(key).copied().ok_or_else(|| {
                    SyncError::InvalidSample {
                        field: key.clone(),
                        value: "<missing>".to_owned(),
                    }
                })?;
                if let Some(current) = slot.get_mut(key) {
                    *current = current.max(value);
                }
            }
        }

        let points = yearly
            .into_iter()
            .map(|(year, values)| TimeSeriesPoint {
                year_label: year.to_string(),
                values,
            })
            .collect();
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.year_label.clone()).collect()
    }

    /// Scenario keys shared by every point, in series order.
    #[must_use]
    pub fn scenario_keys(&self) -> Vec<String> {
        self.points
            .first()
            .map(|p| p.values.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn point_for_year(&self, year: i32) -> Option<&TimeSeriesPoint> {
        let label = year.to_string();
        self.points.iter().find(|p| p.year_label == label)
    }

    /// Rounded per-year values of one scenario for the summary row.
    #[must_use]
    pub fn milestones(
        &self,
        years: &[i32],
        key: &str,
        unit: Option<TemperatureUnit>,
    ) -> Vec<Milestone> {
        years
            .iter()
            .map(|&year| {
                let value = self
                    .point_for_year(year)
                    .and_then(|p| p.value(key))
                    .map(|raw| unit.map_or(raw, |u| u.convert_from_fahrenheit(raw)))
                    .map(|v| v.round() as i64);
                Milestone { year, value }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{ChartData, ScenarioSample};
    use crate::core::TemperatureUnit;

    const YEAR_2000_MS: i64 = 946_684_800_000;
    const YEAR_2001_MS: i64 = 978_307_200_000;

    fn sample(timestamp_ms: i64, value: f64) -> ScenarioSample {
        let mut values = IndexMap::new();
        values.insert("ssp126".to_owned(), value);
        ScenarioSample {
            timestamp_ms,
            values,
        }
    }

    #[test]
    fn duplicate_years_keep_the_maximum() {
        let keys = vec!["ssp126".to_owned()];
        let samples = vec![
            sample(YEAR_2000_MS, 10.0),
            sample(YEAR_2000_MS + 86_400_000, 15.0),
            sample(YEAR_2000_MS + 2 * 86_400_000, 12.0),
        ];
        let data = ChartData::from_samples(&samples, &keys).expect("aggregate");
        assert_eq!(data.len(), 1);
        assert_eq!(data.points()[0].year_label, "2000");
        assert_eq!(data.points()[0].value("ssp126"), Some(15.0));
    }

    #[test]
    fn years_are_sorted_ascending() {
        let keys = vec!["ssp126".to_owned()];
        let samples = vec![sample(YEAR_2001_MS, 1.0), sample(YEAR_2000_MS, 2.0)];
        let data = ChartData::from_samples(&samples, &keys).expect("aggregate");
        assert_eq!(data.labels(), vec!["2000".to_owned(), "2001".to_owned()]);
    }

    #[test]
    fn missing_scenario_field_is_invalid() {
        let keys = vec!["ssp126".to_owned(), "ssp245".to_owned()];
        let samples = vec![sample(YEAR_2000_MS, 1.0)];
        assert!(ChartData::from_samples(&samples, &keys).is_err());
    }

    #[test]
    fn milestones_report_missing_years_as_none() {
        let keys = vec!["ssp126".to_owned()];
        let samples = vec![sample(YEAR_2000_MS, 212.0)];
        let data = ChartData::from_samples(&samples, &keys).expect("aggregate");
        let milestones = data.milestones(&[1950, 2000], "ssp126", Some(TemperatureUnit::Celsius));
        assert_eq!(milestones[0].value, None);
        assert_eq!(milestones[1].value, Some(100));
    }
}
