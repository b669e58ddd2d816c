//! Constant-time rate lookup by calendar month

use crate::series::{Indicator, TimeSeries};
use crate::types::YearMonth;
use hashbrown::HashMap;

/// Trait for reading a rate for one calendar month
pub trait RateLookup {
    /// Rate recorded for `at`, if any
    fn lookup(&self, at: YearMonth) -> Option<f64>;

    /// Check if a rate is available
    fn has_rate(&self, at: YearMonth) -> bool {
        self.lookup(at).is_some()
    }
}

/// Read-only index from (year, month) to rate
///
/// Built once per dataset load and shared by every calculation on that
/// indicator. Rebuilding from a reloaded series replaces the old index.
///
/// # Example
/// ```
/// use purchasing_power::index::{RateIndex, RateLookup};
/// use purchasing_power::series::{Indicator, Sample, TimeSeries};
/// use purchasing_power::types::YearMonth;
///
/// let series = TimeSeries::from_samples(
///     Indicator::BlueDollar,
///     vec![Sample::new(2023, 1, 350.0)],
/// ).unwrap();
/// let index = RateIndex::build(&series);
///
/// assert_eq!(index.lookup(YearMonth::new(2023, 1).unwrap()), Some(350.0));
/// assert_eq!(index.lookup(YearMonth::new(2023, 2).unwrap()), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RateIndex {
    indicator: Indicator,
    rates: HashMap<YearMonth, f64>,
    first: Option<YearMonth>,
    last: Option<YearMonth>,
}

impl RateIndex {
    /// Build the index from a series
    pub fn build(series: &TimeSeries) -> Self {
        let mut rates = HashMap::with_capacity(series.len());
        for sample in series.samples() {
            if let Some(previous) = rates.insert(sample.period(), sample.rate) {
                log::debug!(
                    "Duplicate {} sample for {}: {} replaced by {}",
                    series.indicator(),
                    sample.period(),
                    previous,
                    sample.rate
                );
            }
        }

        Self {
            indicator: series.indicator(),
            first: rates.keys().min().copied(),
            last: rates.keys().max().copied(),
            rates,
        }
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    /// Number of indexed months
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Earliest indexed month
    pub fn first_month(&self) -> Option<YearMonth> {
        self.first
    }

    /// Latest indexed month
    pub fn last_month(&self) -> Option<YearMonth> {
        self.last
    }
}

impl RateLookup for RateIndex {
    fn lookup(&self, at: YearMonth) -> Option<f64> {
        self.rates.get(&at).copied()
    }
}

impl RateLookup for HashMap<YearMonth, f64> {
    fn lookup(&self, at: YearMonth) -> Option<f64> {
        self.get(&at).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Sample;

    fn series(samples: Vec<Sample>) -> TimeSeries {
        TimeSeries::from_samples(Indicator::Inflation, samples).unwrap()
    }

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_build_and_lookup() {
        let index = RateIndex::build(&series(vec![
            Sample::new(2023, 1, 5.0),
            Sample::new(2023, 2, 3.0),
            Sample::new(2023, 3, 2.0),
        ]));

        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup(ym(2023, 2)), Some(3.0));
        assert_eq!(index.lookup(ym(2023, 4)), None);
        assert!(index.has_rate(ym(2023, 1)));
        assert!(!index.has_rate(ym(2022, 12)));
    }

    #[test]
    fn test_bounds() {
        let index = RateIndex::build(&series(vec![
            Sample::new(2021, 11, 2.5),
            Sample::new(2022, 4, 6.0),
        ]));
        assert_eq!(index.first_month(), Some(ym(2021, 11)));
        assert_eq!(index.last_month(), Some(ym(2022, 4)));
    }

    #[test]
    fn test_empty_index() {
        let index = RateIndex::build(&series(Vec::new()));
        assert!(index.is_empty());
        assert_eq!(index.first_month(), None);
        assert_eq!(index.last_month(), None);
    }

    #[test]
    fn test_build_is_idempotent() {
        let data = series(vec![Sample::new(2023, 1, 5.0), Sample::new(2023, 2, 3.0)]);
        assert_eq!(RateIndex::build(&data), RateIndex::build(&data));
    }

    #[test]
    fn test_hashmap_lookup() {
        let mut rates = HashMap::new();
        rates.insert(ym(2023, 1), 1.5);
        assert_eq!(rates.lookup(ym(2023, 1)), Some(1.5));
    }
}
