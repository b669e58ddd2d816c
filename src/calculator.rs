//! Inflation adjustment and currency equivalence calculations
//!
//! Every operation validates its inputs before touching the index; a failed
//! precondition returns an error and performs no computation.

use crate::compound::{compound, CompoundMode};
use crate::error::{PowerError, Result};
use crate::format::{fixed2, money, percent, signed_percent};
use crate::index::RateLookup;
use crate::summary::{summarize, RateSummary};
use crate::types::{Amount, DateRange, Percent, YearMonth};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount projected forward by cumulative inflation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationAdjustment {
    pub amount: Amount,
    pub range: DateRange,
    pub end_amount: Amount,
    pub months_counted: u32,
    #[serde(flatten)]
    pub summary: RateSummary,
}

impl fmt::Display for InflationAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "End amount:           {}", fixed2(self.end_amount))?;
        writeln!(f, "Accumulated inflation: {}", percent(self.summary.total_change_pct))?;
        writeln!(f, "Avg monthly inflation: {}", percent(self.summary.avg_monthly_pct))?;
        write!(f, "Avg yearly inflation:  {}", percent(self.summary.avg_yearly_pct))
    }
}

/// Foreign-currency value of one local amount at two dates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyEquivalence {
    pub amount: Amount,
    pub date_a: YearMonth,
    pub date_b: YearMonth,
    pub rate_a: f64,
    pub rate_b: f64,
    pub equivalent_a: Amount,
    pub equivalent_b: Amount,
    pub percent_change: Percent,
}

impl fmt::Display for CurrencyEquivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Equivalent at {}: {}", self.date_a, money(self.equivalent_a))?;
        writeln!(f, "Equivalent at {}: {}", self.date_b, money(self.equivalent_b))?;
        write!(f, "Variation:           {}", percent(self.percent_change))
    }
}

/// An earlier amount brought forward and compared with a later one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedComparison {
    pub amount1: Amount,
    pub date1: YearMonth,
    pub amount2: Amount,
    pub date2: YearMonth,
    pub adjusted_amount1: Amount,
    pub difference: Amount,
    pub percent_difference: Percent,
    pub months_counted: u32,
}

impl fmt::Display for AdjustedComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Adjusted amount: {}", money(self.adjusted_amount1))?;
        writeln!(f, "Difference:      {}", money(self.difference))?;
        write!(f, "Difference (%):  {}", signed_percent(self.percent_difference))
    }
}

/// Runs the three comparison use cases against a rate index
///
/// The compounding mode is fixed per calculator so that adjustment and
/// comparison always agree on whether the end month counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionCalculator {
    mode: CompoundMode,
}

impl ConversionCalculator {
    pub fn new(mode: CompoundMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CompoundMode {
        self.mode
    }

    /// Project `amount` across `range` by cumulative inflation
    ///
    /// Fails with `InvalidAmount` when the amount is not positive.
    pub fn adjust_for_inflation<L: RateLookup + ?Sized>(
        &self,
        inflation: &L,
        amount: Amount,
        range: DateRange,
    ) -> Result<InflationAdjustment> {
        require_positive(amount)?;
        let range = DateRange::new(range.start, range.end)?;

        let result = compound(inflation, &range, self.mode);
        let summary = summarize(&result);

        Ok(InflationAdjustment {
            amount,
            range,
            end_amount: amount * result.factor,
            months_counted: result.months_counted,
            summary,
        })
    }

    /// Convert a local `amount` to foreign currency at two dates
    ///
    /// Exchange rates are point values, so nothing is compounded: each
    /// equivalent is `amount / rate` at its date.
    pub fn convert_at_dates<L: RateLookup + ?Sized>(
        &self,
        currency: &L,
        amount: Amount,
        date_a: YearMonth,
        date_b: YearMonth,
    ) -> Result<CurrencyEquivalence> {
        require_positive(amount)?;
        DateRange::new(date_a, date_b)?;

        let rate_a = currency.lookup(date_a).ok_or(PowerError::MissingRate(date_a))?;
        let rate_b = currency.lookup(date_b).ok_or(PowerError::MissingRate(date_b))?;

        let equivalent_a = amount / rate_a;
        let equivalent_b = amount / rate_b;
        let percent_change = (equivalent_b - equivalent_a) / equivalent_a * 100.0;

        Ok(CurrencyEquivalence {
            amount,
            date_a,
            date_b,
            rate_a,
            rate_b,
            equivalent_a,
            equivalent_b,
            percent_change,
        })
    }

    /// Bring `amount1` from `date1` forward to `date2` and compare with `amount2`
    ///
    /// `amount1` may be zero; `amount2` must be positive since it is the
    /// base of the percentage difference.
    pub fn compare_adjusted_values<L: RateLookup + ?Sized>(
        &self,
        inflation: &L,
        amount1: Amount,
        date1: YearMonth,
        amount2: Amount,
        date2: YearMonth,
    ) -> Result<AdjustedComparison> {
        if !amount1.is_finite() || amount1 < 0.0 {
            return Err(PowerError::InvalidAmount {
                amount: amount1,
                reason: "first amount cannot be negative",
            });
        }
        require_positive(amount2)?;
        let range = DateRange::new(date1, date2)?;

        let result = compound(inflation, &range, self.mode);
        let adjusted_amount1 = amount1 * result.factor;
        let difference = adjusted_amount1 - amount2;

        Ok(AdjustedComparison {
            amount1,
            date1,
            amount2,
            date2,
            adjusted_amount1,
            difference,
            percent_difference: difference / amount2 * 100.0,
            months_counted: result.months_counted,
        })
    }
}

fn require_positive(amount: Amount) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PowerError::InvalidAmount {
            amount,
            reason: "amount must be greater than 0",
        });
    }
    Ok(())
}
