//! # purchasing-power
//!
//! Purchasing-power and currency comparisons over monthly time series.
//!
//! Given a monthly inflation series and monthly exchange-rate series, the
//! crate answers two kinds of question:
//!
//! - what an amount of local currency at one month is worth at another,
//!   adjusted for cumulative inflation (optionally compared with a second amount);
//! - what an amount of local currency is worth in foreign currency at two
//!   months, and by how much that changed.
//!
//! ## Example
//!
//! ```rust
//! use purchasing_power::prelude::*;
//!
//! let series = TimeSeries::from_samples(
//!     Indicator::Inflation,
//!     vec![
//!         Sample::new(2023, 1, 5.0),
//!         Sample::new(2023, 2, 3.0),
//!         Sample::new(2023, 3, 2.0),
//!     ],
//! ).unwrap();
//! let index = RateIndex::build(&series);
//!
//! let range = DateRange::new(
//!     YearMonth::new(2023, 1).unwrap(),
//!     YearMonth::new(2023, 3).unwrap(),
//! ).unwrap();
//! let result = ConversionCalculator::default()
//!     .adjust_for_inflation(&index, 1000.0, range)
//!     .unwrap();
//!
//! assert_eq!(format!("{:.2}", result.end_amount), "1103.13");
//! ```

pub mod calculator;
pub mod compound;
pub mod error;
pub mod format;
pub mod index;
pub mod query;
pub mod series;
pub mod session;
pub mod summary;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::calculator::{
        AdjustedComparison, ConversionCalculator, CurrencyEquivalence, InflationAdjustment,
    };
    pub use crate::compound::{compound, CompoundMode, CompoundResult};
    pub use crate::error::{PowerError, Result};
    pub use crate::index::{RateIndex, RateLookup};
    pub use crate::query::{ComparisonQuery, ExchangeQuery, InflationQuery, Query, Report};
    pub use crate::series::{Indicator, Sample, SelectorBounds, TimeSeries};
    pub use crate::session::Session;
    pub use crate::summary::{summarize, RateSummary};
    pub use crate::types::{DateRange, YearMonth};
}
