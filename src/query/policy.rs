use serde::{Deserialize, Serialize};

use crate::core::GeoPoint;
use crate::error::QueryFailureKind;

/// Single-retry fallback policy for one user-initiated query.
///
/// The policy has exactly two states; once `attempted` is set it never
/// authorises another retry until `reset` starts a new user query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackPolicy {
    fallback_point: GeoPoint,
    attempted: bool,
}

impl FallbackPolicy {
    #[must_use]
    pub fn new(fallback_point: GeoPoint) -> Self {
        Self {
            fallback_point,
            attempted: false,
        }
    }

    #[must_use]
    pub fn attempted(self) -> bool {
        self.attempted
    }

    #[must_use]
    pub fn fallback_point(self) -> GeoPoint {
        self.fallback_point
    }

    pub fn reset(&mut self) {
        self.attempted = false;
    }

    /// Returns the point to retry against, consuming the single retry.
    pub fn next_retry(&mut self, failure: QueryFailureKind) -> Option<GeoPoint> {
        if self.attempted || !failure.allows_fallback() {
            return None;
        }
        self.attempted = true;
        Some(self.fallback_point)
    }
}
