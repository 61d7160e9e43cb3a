use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{ChartData, GeoPoint, Variable};
use crate::error::{QueryFailureKind, SyncError, SyncResult};

use super::{FallbackPolicy, ServiceRequest, TimeRange, build_sample_request, parse_samples};

/// Monotonic identity of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryOrigin {
    /// Click, drag end, search, view-ready or dataset switch.
    User,
    /// The single automatic retry against the fallback point.
    Fallback,
}

/// Request the host must perform; the body goes back through
/// `QueryDispatcher::complete` together with `token`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    pub token: RequestToken,
    pub origin: QueryOrigin,
    pub point: GeoPoint,
    pub request: ServiceRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryValidity {
    Loading,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResolution {
    /// Chart data must be replaced in full.
    Replaced { origin: QueryOrigin, data: ChartData },
    /// Invalid data on a user query; perform this fallback request next.
    Retry(PendingQuery),
    /// Terminal failure; chart data must be emptied.
    Failed {
        kind: QueryFailureKind,
        message: String,
    },
    /// Response for a superseded or already settled request.
    Stale { token: RequestToken },
}

#[derive(Debug, Clone, PartialEq)]
struct InFlight {
    token: RequestToken,
    origin: QueryOrigin,
    variable: Variable,
    scenario_keys: Vec<String>,
    time_range: TimeRange,
}

/// Latest-request-wins sample query dispatcher.
///
/// The dispatcher never performs I/O. It hands out `PendingQuery` values and
/// validates the bodies the host returns, discarding any response whose token
/// is not the most recently issued one.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDispatcher {
    next_token: u64,
    in_flight: Option<InFlight>,
    policy: FallbackPolicy,
    validity: Option<QueryValidity>,
    last_failure: Option<QueryFailureKind>,
}

impl QueryDispatcher {
    #[must_use]
    pub fn new(fallback_point: GeoPoint) -> Self {
        Self {
            next_token: 0,
            in_flight: None,
            policy: FallbackPolicy::new(fallback_point),
            validity: None,
            last_failure: None,
        }
    }

    /// `None` until the first query is issued.
    #[must_use]
    pub fn validity(&self) -> Option<QueryValidity> {
        self.validity
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.validity == Some(QueryValidity::Loading)
    }

    #[must_use]
    pub fn last_failure(&self) -> Option<QueryFailureKind> {
        self.last_failure
    }

    #[must_use]
    pub fn latest_token(&self) -> Option<RequestToken> {
        self.in_flight.as_ref().map(|f| f.token)
    }

    #[must_use]
    pub fn fallback_attempted(&self) -> bool {
        self.policy.attempted()
    }

    /// Starts a new user query, superseding any in-flight one.
    pub fn issue(
        &mut self,
        point: GeoPoint,
        variable: &Variable,
        scenario_keys: Vec<String>,
        time_range: TimeRange,
    ) -> SyncResult<PendingQuery> {
        let request = build_sample_request(variable, point, time_range)?;
        self.policy.reset();
        Ok(self.begin(
            QueryOrigin::User,
            point,
            request,
            variable.clone(),
            scenario_keys,
            time_range,
        ))
    }

    /// Settles the request identified by `token`.
    pub fn complete(&mut self, token: RequestToken, body: SyncResult<String>) -> QueryResolution {
        let Some(in_flight) = self.in_flight.take_if(|f| f.token == token) else {
            warn!(token = token.get(), "dropping stale query response");
            return QueryResolution::Stale { token };
        };

        let parsed = body.and_then(|body| {
            let samples = parse_samples(&body, &in_flight.scenario_keys)?;
            ChartData::from_samples(&samples, &in_flight.scenario_keys)
        });

        match parsed {
            Ok(data) => {
                debug!(
                    token = token.get(),
                    points = data.len(),
                    origin = ?in_flight.origin,
                    "query produced chart data"
                );
                self.validity = Some(QueryValidity::Valid);
                self.last_failure = None;
                QueryResolution::Replaced {
                    origin: in_flight.origin,
                    data,
                }
            }
            Err(err) => self.fail(in_flight, err),
        }
    }

    fn fail(&mut self, in_flight: InFlight, err: SyncError) -> QueryResolution {
        let kind = err
            .query_failure_kind()
            .unwrap_or(QueryFailureKind::Malformed);
        warn!(
            token = in_flight.token.get(),
            kind = ?kind,
            error = %err,
            "query returned no usable data"
        );

        if let Some(point) = self.policy.next_retry(kind) {
            match build_sample_request(&in_flight.variable, point, in_flight.time_range) {
                Ok(request) => {
                    let pending = self.begin(
                        QueryOrigin::Fallback,
                        point,
                        request,
                        in_flight.variable,
                        in_flight.scenario_keys,
                        in_flight.time_range,
                    );
                    info!(
                        token = pending.token.get(),
                        longitude = point.longitude,
                        latitude = point.latitude,
                        "retrying query against fallback point"
                    );
                    return QueryResolution::Retry(pending);
                }
                Err(build_err) => {
                    warn!(error = %build_err, "fallback request could not be built");
                }
            }
        }

        self.validity = Some(QueryValidity::Invalid);
        self.last_failure = Some(kind);
        QueryResolution::Failed {
            kind,
            message: err.to_string(),
        }
    }

    fn begin(
        &mut self,
        origin: QueryOrigin,
        point: GeoPoint,
        request: ServiceRequest,
        variable: Variable,
        scenario_keys: Vec<String>,
        time_range: TimeRange,
    ) -> PendingQuery {
        self.next_token = self.next_token.wrapping_add(1);
        let token = RequestToken(self.next_token);
        self.in_flight = Some(InFlight {
            token,
            origin,
            variable,
            scenario_keys,
            time_range,
        });
        self.validity = Some(QueryValidity::Loading);
        PendingQuery {
            token,
            origin,
            point,
            request,
        }
    }
}
