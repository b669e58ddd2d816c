//! Month-by-month compounding of percentage rates
//!
//! Each month present in the lookup contributes a factor of `1 + rate/100`.
//! Months missing from the lookup are skipped: they are neither counted nor
//! treated as 0%.

use crate::error::{PowerError, Result};
use crate::index::RateLookup;
use crate::types::DateRange;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the end month of a range contributes its rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompoundMode {
    /// Walk `start..=end`; a single-month range evaluates that month
    #[default]
    #[serde(rename = "inclusive", alias = "inclusive-end")]
    InclusiveEnd,
    /// Walk `start..end`; the end month is the value-as-of point
    #[serde(rename = "exclusive", alias = "exclusive-end")]
    ExclusiveEnd,
}

impl CompoundMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundMode::InclusiveEnd => "inclusive",
            CompoundMode::ExclusiveEnd => "exclusive",
        }
    }
}

impl FromStr for CompoundMode {
    type Err = PowerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "inclusive" | "inclusive-end" => Ok(CompoundMode::InclusiveEnd),
            "exclusive" | "exclusive-end" => Ok(CompoundMode::ExclusiveEnd),
            _ => Err(PowerError::ParseError(format!("Unknown period mode: {}", s))),
        }
    }
}

impl fmt::Display for CompoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compounded growth over a range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundResult {
    /// Product of `(1 + rate/100)` over the months found
    pub factor: f64,
    /// Months found in the lookup
    pub months_counted: u32,
}

impl CompoundResult {
    /// Neutral result: no months found
    pub fn neutral() -> Self {
        Self {
            factor: 1.0,
            months_counted: 0,
        }
    }

    /// Fold one more month's rate into the result
    pub fn apply(self, rate: f64) -> Self {
        Self {
            factor: self.factor * (1.0 + rate / 100.0),
            months_counted: self.months_counted + 1,
        }
    }
}

impl Default for CompoundResult {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Compound every month of `range` under `mode`
pub fn compound<L: RateLookup + ?Sized>(
    lookup: &L,
    range: &DateRange,
    mode: CompoundMode,
) -> CompoundResult {
    range
        .iter(mode)
        .fold(CompoundResult::neutral(), |acc, month| match lookup.lookup(month) {
            Some(rate) => acc.apply(rate),
            None => {
                log::debug!("No rate for {}, skipping", month);
                acc
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RateIndex;
    use crate::series::{Indicator, Sample, TimeSeries};
    use crate::types::YearMonth;
    use approx::assert_relative_eq;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn index(samples: Vec<Sample>) -> RateIndex {
        RateIndex::build(&TimeSeries::from_samples(Indicator::Inflation, samples).unwrap())
    }

    fn quarter() -> RateIndex {
        index(vec![
            Sample::new(2023, 1, 5.0),
            Sample::new(2023, 2, 3.0),
            Sample::new(2023, 3, 2.0),
        ])
    }

    #[test]
    fn test_inclusive_three_months() {
        let range = DateRange::new(ym(2023, 1), ym(2023, 3)).unwrap();
        let result = compound(&quarter(), &range, CompoundMode::InclusiveEnd);

        assert_relative_eq!(result.factor, 1.05 * 1.03 * 1.02, epsilon = 1e-12);
        assert_eq!(result.months_counted, 3);
    }

    #[test]
    fn test_exclusive_drops_end_month() {
        let range = DateRange::new(ym(2023, 1), ym(2023, 3)).unwrap();
        let result = compound(&quarter(), &range, CompoundMode::ExclusiveEnd);

        assert_relative_eq!(result.factor, 1.05 * 1.03, epsilon = 1e-12);
        assert_eq!(result.months_counted, 2);
    }

    #[test]
    fn test_single_month() {
        let range = DateRange::single(ym(2023, 1));

        let inclusive = compound(&quarter(), &range, CompoundMode::InclusiveEnd);
        assert_relative_eq!(inclusive.factor, 1.05, epsilon = 1e-12);
        assert_eq!(inclusive.months_counted, 1);

        let exclusive = compound(&quarter(), &range, CompoundMode::ExclusiveEnd);
        assert_eq!(exclusive, CompoundResult::neutral());
    }

    #[test]
    fn test_missing_months_are_skipped() {
        let gappy = index(vec![Sample::new(2023, 1, 5.0), Sample::new(2023, 3, 2.0)]);
        let range = DateRange::new(ym(2023, 1), ym(2023, 3)).unwrap();
        let result = compound(&gappy, &range, CompoundMode::InclusiveEnd);

        assert_relative_eq!(result.factor, 1.05 * 1.02, epsilon = 1e-12);
        assert_eq!(result.months_counted, 2);
    }

    #[test]
    fn test_range_outside_data_is_neutral() {
        let range = DateRange::new(ym(2010, 1), ym(2010, 12)).unwrap();
        let result = compound(&quarter(), &range, CompoundMode::InclusiveEnd);
        assert_eq!(result.factor, 1.0);
        assert_eq!(result.months_counted, 0);
    }

    #[test]
    fn test_crosses_year_boundary() {
        let data = index(vec![
            Sample::new(2022, 12, 5.1),
            Sample::new(2023, 1, 6.0),
        ]);
        let range = DateRange::new(ym(2022, 12), ym(2023, 1)).unwrap();
        let result = compound(&data, &range, CompoundMode::InclusiveEnd);

        assert_relative_eq!(result.factor, 1.051 * 1.06, epsilon = 1e-12);
        assert_eq!(result.months_counted, 2);
    }

    #[test]
    fn test_mode_parsing() {
        let mode: CompoundMode = serde_json::from_str("\"exclusive\"").unwrap();
        assert_eq!(mode, CompoundMode::ExclusiveEnd);
        let mode: CompoundMode = serde_json::from_str("\"inclusive-end\"").unwrap();
        assert_eq!(mode, CompoundMode::InclusiveEnd);
        assert_eq!(CompoundMode::default(), CompoundMode::InclusiveEnd);
        assert_eq!("Exclusive".parse::<CompoundMode>().unwrap(), CompoundMode::ExclusiveEnd);
        assert!("both".parse::<CompoundMode>().is_err());
    }
}
