use serde::Deserialize;
use serde_json::json;

use crate::core::{BandStatistics, Envelope, VitalsSummary};
use crate::error::{SyncError, SyncResult};

use super::{ServiceRequest, TimeRange};

#[derive(Debug, Deserialize)]
struct StatisticsResponse {
    #[serde(default)]
    statistics: Vec<BandStatistics>,
}

/// `computeStatisticsHistograms` request over a region envelope.
pub fn build_statistics_request(
    service_url: &str,
    envelope: Envelope,
    time_range: TimeRange,
) -> SyncResult<ServiceRequest> {
    let geometry = json!({
        "xmin": envelope.xmin,
        "ymin": envelope.ymin,
        "xmax": envelope.xmax,
        "ymax": envelope.ymax,
        "spatialReference": { "wkid": envelope.spatial_reference.wkid },
    });
    Ok(
        ServiceRequest::new(service_url, "computeStatisticsHistograms")?
            .with_param("geometry", geometry.to_string())
            .with_param("geometryType", "esriGeometryEnvelope")
            .with_param("time", time_range.to_query_value())
            .with_param("f", "json"),
    )
}

/// Parses the first band's statistics; `Ok(None)` when the service returned
/// none, which hosts render as "-".
pub fn parse_statistics(body: &str) -> SyncResult<Option<VitalsSummary>> {
    let response: StatisticsResponse = serde_json::from_str(body)
        .map_err(|e| SyncError::MalformedResponse(format!("invalid statistics json: {e}")))?;
    response
        .statistics
        .into_iter()
        .next()
        .map(VitalsSummary::from_statistics)
        .transpose()
}
