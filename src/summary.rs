//! Total and average rates derived from a compounded factor

use crate::compound::CompoundResult;
use crate::types::Percent;
use serde::{Deserialize, Serialize};

/// Total, average monthly and annualized change over a period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSummary {
    /// `(factor - 1) * 100`
    pub total_change_pct: Percent,
    /// Geometric mean monthly change
    pub avg_monthly_pct: Percent,
    /// Monthly average annualized over 12 months
    pub avg_yearly_pct: Percent,
}

impl RateSummary {
    /// All-zero summary, used when no months were found
    pub fn zero() -> Self {
        Self {
            total_change_pct: 0.0,
            avg_monthly_pct: 0.0,
            avg_yearly_pct: 0.0,
        }
    }

    /// Growth factor implied by the total change
    pub fn factor(&self) -> f64 {
        1.0 + self.total_change_pct / 100.0
    }
}

/// Summarize a compounded result
///
/// Averages are geometric because monthly rates compound multiplicatively.
pub fn summarize(result: &CompoundResult) -> RateSummary {
    if result.months_counted == 0 {
        return RateSummary::zero();
    }

    let months = result.months_counted as f64;
    let total_change_pct = (result.factor - 1.0) * 100.0;
    let avg_monthly_pct = (result.factor.powf(1.0 / months) - 1.0) * 100.0;
    let avg_yearly_pct = (result.factor.powf(12.0 / months) - 1.0) * 100.0;

    RateSummary {
        total_change_pct,
        avg_monthly_pct,
        avg_yearly_pct,
    }
}
