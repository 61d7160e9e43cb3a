use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::core::ScenarioSample;
use crate::error::{SyncError, SyncResult};

const TIMESTAMP_FIELD: &str = "StdTime";

#[derive(Debug, Deserialize)]
struct SampleResponse {
    samples: Option<Vec<RawSample>>,
}

#[derive(Debug, Deserialize)]
struct RawSample {
    attributes: Option<IndexMap<String, Value>>,
}

/// Parses a `getSamples` body into validated samples, in response order.
///
/// Errors:
/// - `MalformedResponse` when the body is not JSON, lacks `samples`, or a
///   sample lacks `attributes` / a usable `StdTime`;
/// - `EmptySeries` for `samples: []`;
/// - `InvalidSample` when a scenario field is missing or not a finite number.
pub fn parse_samples(body: &str, scenario_keys: &[String]) -> SyncResult<Vec<ScenarioSample>> {
    let response: SampleResponse = serde_json::from_str(body)
        .map_err(|e| SyncError::MalformedResponse(format!("invalid sample json: {e}")))?;
    let raw = response
        .samples
        .ok_or_else(|| SyncError::MalformedResponse("missing `samples` field".to_owned()))?;
    if raw.is_empty() {
        return Err(SyncError::EmptySeries);
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, sample)| parse_sample(index, sample, scenario_keys))
        .collect()
}

fn parse_sample(
    index: usize,
    sample: RawSample,
    scenario_keys: &[String],
) -> SyncResult<ScenarioSample> {
    let attributes = sample.attributes.ok_or_else(|| {
        SyncError::MalformedResponse(format!("sample {index} has no `attributes`"))
    })?;
    let timestamp_ms = attributes
        .get(TIMESTAMP_FIELD)
        .and_then(timestamp_millis)
        .ok_or_else(|| {
            SyncError::MalformedResponse(format!("sample {index} has no usable `{TIMESTAMP_FIELD}`"))
        })?;

    let mut values = IndexMap::with_capacity(scenario_keys.len());
    for key in scenario_keys {
        let raw = attributes.get(key);
        let value = raw
            .and_then(finite_number)
            .ok_or_else(|| SyncError::InvalidSample {
                field: key.clone(),
                value: raw.map_or_else(|| "<missing>".to_owned(), display_value),
            })?;
        values.insert(key.clone(), value);
    }

    Ok(ScenarioSample {
        timestamp_ms,
        values,
    })
}

fn finite_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn timestamp_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
