use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::{GeoPoint, Variable};
use crate::error::{SyncError, SyncResult};

/// Inclusive UTC time window sent with every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> SyncResult<Self> {
        if start > end {
            return Err(SyncError::InvalidInput(
                "time range start must not be after its end".to_owned(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn from_epoch_millis(start_ms: i64, end_ms: i64) -> SyncResult<Self> {
        let start = Utc.timestamp_millis_opt(start_ms).single();
        let end = Utc.timestamp_millis_opt(end_ms).single();
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(SyncError::InvalidInput(format!(
                "time range [{start_ms}, {end_ms}] is out of range"
            ))),
        }
    }

    /// 1950-01-01 .. 2100-01-31, the span of the projection datasets.
    #[must_use]
    pub fn multi_decade_default() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(1950, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            end: Utc
                .with_ymd_and_hms(2100, 1, 31, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }

    /// Variable range when configured, else `fallback`.
    pub fn for_variable(variable: &Variable, fallback: Self) -> SyncResult<Self> {
        match variable.datetime_range {
            Some((start, end)) => Self::from_epoch_millis(start, end),
            None => Ok(fallback),
        }
    }

    /// `<start>,<end>` in ISO-8601 with millisecond precision.
    #[must_use]
    pub fn to_query_value(self) -> String {
        format!(
            "{},{}",
            self.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// HTTP GET against a service endpoint with ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

impl ServiceRequest {
    pub fn new(service_url: &str, operation: &str) -> SyncResult<Self> {
        let base = service_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(SyncError::InvalidInput(
                "service url must not be empty".to_owned(),
            ));
        }
        let endpoint = format!("{base}/{operation}");
        Url::parse(&endpoint)
            .map_err(|e| SyncError::InvalidInput(format!("invalid service url `{base}`: {e}")))?;
        Ok(Self {
            endpoint,
            params: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_owned(), value.into()));
        self
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full URL with form-style percent-encoded parameters.
    pub fn url(&self) -> SyncResult<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            SyncError::InvalidInput(format!("invalid endpoint `{}`: {e}", self.endpoint))
        })?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        Ok(url)
    }
}

/// `getSamples` request for one point.
pub fn build_sample_request(
    variable: &Variable,
    point: GeoPoint,
    time_range: TimeRange,
) -> SyncResult<ServiceRequest> {
    let point = point.validate()?;
    Ok(ServiceRequest::new(&variable.service_url, "getSamples")?
        .with_param("geometry", format!("{},{}", point.longitude, point.latitude))
        .with_param("geometryType", "esriGeometryPoint")
        .with_param("returnFirstValueOnly", "false")
        .with_param("f", "json")
        .with_param("time", time_range.to_query_value()))
}
