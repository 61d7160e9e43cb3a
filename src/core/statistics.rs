use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Raw band statistics returned by the statistics service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Region vitals rounded to two decimals for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalsSummary {
    pub min: Decimal,
    pub max: Decimal,
    pub mean: Decimal,
    /// `(mean - median) * 0.5 + mean`.
    pub trend: Decimal,
}

impl VitalsSummary {
    pub fn from_statistics(stats: BandStatistics) -> SyncResult<Self> {
        let trend = (stats.mean - stats.median) * 0.5 + stats.mean;
        Ok(Self {
            min: to_display_decimal(stats.min, "min")?,
            max: to_display_decimal(stats.max, "max")?,
            mean: to_display_decimal(stats.mean, "mean")?,
            trend: to_display_decimal(trend, "trend")?,
        })
    }
}

fn to_display_decimal(value: f64, field_name: &str) -> SyncResult<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| {
            SyncError::MalformedResponse(format!("{field_name} cannot be represented as decimal"))
        })
}
