use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid frame: frame={frame}, total_frames={total_frames}")]
    InvalidFrame { frame: u32, total_frames: u32 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown selection: dataset={dataset}, variable={variable}")]
    UnknownSelection { dataset: usize, variable: usize },

    #[error("scene initialization failed: {0}")]
    SceneInit(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid sample: field `{field}` has non-numeric value `{value}`")]
    InvalidSample { field: String, value: String },

    #[error("empty series: response contained no samples")]
    EmptySeries,
}

impl SyncError {
    /// Classifies query-path errors; returns `None` for errors that never
    /// originate from a sample query.
    #[must_use]
    pub fn query_failure_kind(&self) -> Option<QueryFailureKind> {
        match self {
            Self::Network(_) => Some(QueryFailureKind::Network),
            Self::MalformedResponse(_) => Some(QueryFailureKind::Malformed),
            Self::InvalidSample { .. } => Some(QueryFailureKind::InvalidSample),
            Self::EmptySeries => Some(QueryFailureKind::EmptySeries),
            _ => None,
        }
    }
}

/// Surfaced error state of the query path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryFailureKind {
    Network,
    Malformed,
    InvalidSample,
    EmptySeries,
}

impl QueryFailureKind {
    /// Invalid data qualifies for the single fallback retry; transport and
    /// shape failures do not.
    #[must_use]
    pub const fn allows_fallback(self) -> bool {
        matches!(self, Self::InvalidSample | Self::EmptySeries)
    }
}
