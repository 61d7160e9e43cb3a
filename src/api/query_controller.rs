use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{ChartData, Envelope, GeoPoint, VitalsSummary};
use crate::error::{QueryFailureKind, SyncResult};
use crate::extensions::SyncEvent;
use crate::host::{ChartWidget, SceneView};
use crate::query::{
    PendingQuery, QueryResolution, QueryValidity, RequestToken, SampleTransport, ServiceRequest,
    TimeRange, build_statistics_request, parse_statistics,
};

use super::SyncEngine;

/// What the engine did with a completed query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryCompletion {
    /// Chart data replaced with `points` annual points.
    Applied { points: usize },
    /// Invalid data; the host must perform this fallback request next.
    Retry(PendingQuery),
    /// Chart emptied and the invalid-data indicator raised.
    Failed(QueryFailureKind),
    /// Response ignored because a newer request superseded it.
    Stale,
}

/// Snapshot of the query indicator shown next to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStatus {
    pub validity: Option<QueryValidity>,
    pub last_failure: Option<QueryFailureKind>,
    pub latest_token: Option<RequestToken>,
}

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    #[must_use]
    pub fn query_status(&self) -> QueryStatus {
        QueryStatus {
            validity: self.core.dispatcher.validity(),
            last_failure: self.core.dispatcher.last_failure(),
            latest_token: self.core.dispatcher.latest_token(),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.core.dispatcher.is_loading()
    }

    /// Hands a response body (or transport error) back to the engine.
    pub fn complete_query(
        &mut self,
        token: RequestToken,
        body: SyncResult<String>,
    ) -> QueryCompletion {
        match self.core.dispatcher.complete(token, body) {
            QueryResolution::Replaced { data, .. } => {
                let points = data.len();
                self.core.chart.replace_data(data);
                self.core
                    .chart
                    .on_frame_advance(self.core.clock.current_frame(), self.core.config.timeline);
                debug!(token = token.get(), points, "chart data replaced");
                self.flush_chart();
                self.emit_event(SyncEvent::ChartDataReplaced { points });
                QueryCompletion::Applied { points }
            }
            QueryResolution::Retry(pending) => {
                self.emit_event(SyncEvent::QueryFallback {
                    token: pending.token,
                });
                QueryCompletion::Retry(pending)
            }
            QueryResolution::Failed { kind, message } => {
                warn!(token = token.get(), kind = ?kind, error = %message, "showing invalid data state");
                self.core.chart.replace_data(ChartData::empty());
                self.core
                    .chart
                    .on_frame_advance(self.core.clock.current_frame(), self.core.config.timeline);
                self.flush_chart();
                self.emit_event(SyncEvent::QueryFailed { kind });
                QueryCompletion::Failed(kind)
            }
            QueryResolution::Stale { token } => {
                self.emit_event(SyncEvent::StaleResponseDropped { token });
                QueryCompletion::Stale
            }
        }
    }

    /// Runs `pending` to completion over a blocking transport.
    ///
    /// The fallback policy bounds this to at most two requests.
    pub fn drive_query<T: SampleTransport + ?Sized>(
        &mut self,
        transport: &mut T,
        pending: PendingQuery,
    ) -> QueryCompletion {
        let mut pending = pending;
        loop {
            let body = transport.get(&pending.request);
            match self.complete_query(pending.token, body) {
                QueryCompletion::Retry(next) => pending = next,
                done => return done,
            }
        }
    }

    /// Most recent region vitals; `None` renders as "-".
    #[must_use]
    pub fn vitals(&self) -> Option<VitalsSummary> {
        self.core.vitals
    }

    /// Statistics request for a sketched region of the selected variable.
    pub fn vitals_request(&self, envelope: Envelope) -> SyncResult<ServiceRequest> {
        let variable = self.core.selection.variable();
        let range = TimeRange::for_variable(variable, self.core.config.default_time_range)?;
        build_statistics_request(&variable.service_url, envelope, range)
    }

    /// Applies a statistics response. Malformed bodies clear the vitals.
    pub fn complete_vitals(&mut self, body: SyncResult<String>) -> Option<VitalsSummary> {
        self.core.vitals = match body.and_then(|body| parse_statistics(&body)) {
            Ok(vitals) => vitals,
            Err(err) => {
                warn!(error = %err, "statistics query failed");
                None
            }
        };
        self.core.vitals
    }

    pub(super) fn issue_query(&mut self, point: GeoPoint) -> SyncResult<PendingQuery> {
        let selection = &self.core.selection;
        let variable = selection.variable();
        let range = TimeRange::for_variable(variable, self.core.config.default_time_range)?;
        let pending =
            self.core
                .dispatcher
                .issue(point, variable, selection.scenario_keys(), range)?;
        debug!(
            token = pending.token.get(),
            longitude = point.longitude,
            latitude = point.latitude,
            variable = variable.key.as_str(),
            "sample query issued"
        );
        self.emit_event(SyncEvent::QueryIssued {
            token: pending.token,
            origin: pending.origin,
        });
        Ok(pending)
    }
}
