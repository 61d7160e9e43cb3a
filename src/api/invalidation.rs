use serde::{Deserialize, Serialize};

/// Ordered chart repaint levels.
///
/// `ActiveIndex` only moves the highlighted point; `Full` rebuilds every
/// scenario line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ChartInvalidation {
    #[default]
    None,
    ActiveIndex,
    Full,
}

impl ChartInvalidation {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }
}
