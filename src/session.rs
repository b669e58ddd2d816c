//! Loaded datasets and their availability
//!
//! A `Session` owns one rate index per indicator. Each indicator is loaded
//! once; a failed load leaves it unavailable until it is reloaded, and every
//! calculation asks the session for a ready index before running.

use crate::calculator::ConversionCalculator;
use crate::compound::CompoundMode;
use crate::error::{PowerError, Result};
use crate::index::RateIndex;
use crate::series::{Indicator, SelectorBounds, TimeSeries};
use hashbrown::HashMap;
use std::path::Path;

/// Load state of one indicator
#[derive(Debug, Clone)]
pub enum IndicatorState {
    Ready { series: TimeSeries, index: RateIndex },
    Unavailable { reason: String },
}

impl IndicatorState {
    pub fn is_ready(&self) -> bool {
        matches!(self, IndicatorState::Ready { .. })
    }
}

/// Datasets shared by every calculation in one session
#[derive(Debug, Clone, Default)]
pub struct Session {
    states: HashMap<Indicator, IndicatorState>,
    calculator: ConversionCalculator,
}

impl Session {
    /// Create an empty session using the given compounding mode
    pub fn new(mode: CompoundMode) -> Self {
        Self {
            states: HashMap::new(),
            calculator: ConversionCalculator::new(mode),
        }
    }

    pub fn calculator(&self) -> &ConversionCalculator {
        &self.calculator
    }

    pub fn mode(&self) -> CompoundMode {
        self.calculator.mode()
    }

    /// Install an already-parsed series, replacing any previous index
    pub fn insert_series(&mut self, series: TimeSeries) {
        let indicator = series.indicator();
        let index = RateIndex::build(&series);
        log::info!("{} index ready with {} months", indicator, index.len());
        self.states
            .insert(indicator, IndicatorState::Ready { series, index });
    }

    /// Load an indicator from JSON text
    pub fn load_str(&mut self, indicator: Indicator, json: &str) -> Result<()> {
        let loaded = TimeSeries::from_json_str(indicator, json);
        self.record(indicator, loaded)
    }

    /// Load an indicator from a JSON file
    pub fn load_path<P: AsRef<Path>>(&mut self, indicator: Indicator, path: P) -> Result<()> {
        let loaded = TimeSeries::from_path(indicator, path);
        self.record(indicator, loaded)
    }

    /// Load every indicator from its default file name inside `dir`
    ///
    /// A failure on one indicator does not stop the others.
    pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Vec<(Indicator, Result<()>)> {
        let dir = dir.as_ref();
        Indicator::ALL
            .iter()
            .map(|&indicator| {
                let path = dir.join(indicator.default_file_name());
                (indicator, self.load_path(indicator, path))
            })
            .collect()
    }

    fn record(&mut self, indicator: Indicator, loaded: Result<TimeSeries>) -> Result<()> {
        match loaded {
            Ok(series) => {
                self.insert_series(series);
                Ok(())
            }
            Err(e) => {
                log::warn!("{} data unavailable: {}", indicator, e);
                self.states.insert(
                    indicator,
                    IndicatorState::Unavailable {
                        reason: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    /// Current state of an indicator, `None` if never loaded
    pub fn state(&self, indicator: Indicator) -> Option<&IndicatorState> {
        self.states.get(&indicator)
    }

    pub fn is_available(&self, indicator: Indicator) -> bool {
        self.state(indicator).map_or(false, IndicatorState::is_ready)
    }

    /// Ready index for an indicator
    pub fn index(&self, indicator: Indicator) -> Result<&RateIndex> {
        self.ready(indicator).map(|(_, index)| index)
    }

    /// Ready series for an indicator
    pub fn series(&self, indicator: Indicator) -> Result<&TimeSeries> {
        self.ready(indicator).map(|(series, _)| series)
    }

    /// Date-selector defaults for an indicator under the session's mode
    pub fn selector_bounds(&self, indicator: Indicator) -> Result<SelectorBounds> {
        let series = self.series(indicator)?;
        series
            .selector_bounds(self.mode())
            .ok_or_else(|| PowerError::IndicatorUnavailable {
                indicator: indicator.key().to_string(),
                reason: "dataset is empty".to_string(),
            })
    }

    fn ready(&self, indicator: Indicator) -> Result<(&TimeSeries, &RateIndex)> {
        match self.states.get(&indicator) {
            Some(IndicatorState::Ready { series, index }) => Ok((series, index)),
            Some(IndicatorState::Unavailable { reason }) => {
                Err(PowerError::IndicatorUnavailable {
                    indicator: indicator.key().to_string(),
                    reason: reason.clone(),
                })
            }
            None => Err(PowerError::IndicatorUnavailable {
                indicator: indicator.key().to_string(),
                reason: "not loaded".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RateLookup;
    use crate::types::YearMonth;

    const INFLATION: &str = r#"{"inflationData": [
        {"year": 2023, "month": 1, "inflation": 5.0},
        {"year": 2023, "month": 2, "inflation": 3.0}
    ]}"#;

    #[test]
    fn test_unloaded_indicator_is_unavailable() {
        let session = Session::default();
        let err = session.index(Indicator::Inflation).unwrap_err();
        assert!(matches!(err, PowerError::IndicatorUnavailable { .. }));
        assert!(!session.is_available(Indicator::Inflation));
    }

    #[test]
    fn test_load_str() {
        let mut session = Session::default();
        session.load_str(Indicator::Inflation, INFLATION).unwrap();

        let index = session.index(Indicator::Inflation).unwrap();
        assert_eq!(index.lookup(YearMonth::new(2023, 2).unwrap()), Some(3.0));
        assert!(session.is_available(Indicator::Inflation));
        assert!(!session.is_available(Indicator::BlueDollar));
    }

    #[test]
    fn test_failed_load_degrades_indicator() {
        let mut session = Session::default();
        session.load_str(Indicator::Inflation, INFLATION).unwrap();

        let err = session.load_str(Indicator::Inflation, "{broken").unwrap_err();
        assert!(matches!(err, PowerError::DataLoadFailure { .. }));

        // the previous index must not be used after a failed reload
        let err = session.index(Indicator::Inflation).unwrap_err();
        assert!(err.to_string().contains("inflation"));
    }

    #[test]
    fn test_reload_replaces_index() {
        let mut session = Session::default();
        session.load_str(Indicator::Inflation, INFLATION).unwrap();
        session
            .load_str(
                Indicator::Inflation,
                r#"[{"year": 2023, "month": 1, "inflation": 9.0}]"#,
            )
            .unwrap();

        let index = session.index(Indicator::Inflation).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup(YearMonth::new(2023, 1).unwrap()), Some(9.0));
    }

    #[test]
    fn test_selector_bounds_follow_mode() {
        let mut session = Session::new(CompoundMode::ExclusiveEnd);
        session.load_str(Indicator::Inflation, INFLATION).unwrap();
        let bounds = session.selector_bounds(Indicator::Inflation).unwrap();
        assert_eq!(bounds.default_end, YearMonth::new(2023, 3).unwrap());

        let mut empty = Session::default();
        empty.load_str(Indicator::BlueDollar, "[]").unwrap();
        assert!(empty.selector_bounds(Indicator::BlueDollar).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let mut session = Session::default();
        let err = session
            .load_path(Indicator::BlueDollar, "/nonexistent/dolarblue-data.json")
            .unwrap_err();
        assert!(matches!(err, PowerError::DataLoadFailure { .. }));
        assert!(matches!(
            session.state(Indicator::BlueDollar),
            Some(IndicatorState::Unavailable { .. })
        ));
    }
}
