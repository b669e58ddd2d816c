//! Calendar month keys and month ranges

use crate::compound::CompoundMode;
use crate::error::{PowerError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Percentage type (5.0 means 5%)
pub type Percent = f64;

/// Money amount in local currency
pub type Amount = f64;

/// Earliest year accepted by [`YearMonth::new`]
pub const MIN_YEAR: i32 = 1;

/// Latest year accepted by [`YearMonth::new`]
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, ordered by (year, month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Create a month key, rejecting months outside 1..=12 and years outside
    /// `MIN_YEAR..=MAX_YEAR`
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PowerError::InvalidData(format!(
                "Year must be between {} and {}, got: {}",
                MIN_YEAR, MAX_YEAR, year
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(PowerError::InvalidData(format!(
                "Month must be between 1 and 12, got: {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Month containing the given date
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of this month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Next calendar month
    ///
    /// Saturates at the `i32` year limit for keys built without [`YearMonth::new`].
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Previous calendar month
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Signed number of month steps from `self` to `other`
    pub fn months_until(&self, other: YearMonth) -> i64 {
        (other.year as i64 - self.year as i64) * 12 + (other.month as i64 - self.month as i64)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PowerError;

    /// Parse `YYYY-MM` (or `YYYY-M`)
    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s.trim().split_once('-').ok_or_else(|| {
            PowerError::ParseError(format!("Expected YYYY-MM, got: {}", s))
        })?;

        let year: i32 = year
            .parse()
            .map_err(|e| PowerError::ParseError(format!("Invalid year '{}': {}", year, e)))?;
        let month: u32 = month
            .parse()
            .map_err(|e| PowerError::ParseError(format!("Invalid month '{}': {}", month, e)))?;

        YearMonth::new(year, month)
    }
}

/// Range of calendar months between `start` and `end`
///
/// `start <= end` always holds for a constructed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: YearMonth,
    pub end: YearMonth,
}

impl DateRange {
    /// Create a range, failing with `InvalidRange` when start is after end
    pub fn new(start: YearMonth, end: YearMonth) -> Result<Self> {
        if start > end {
            return Err(PowerError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a single month
    pub fn single(month: YearMonth) -> Self {
        Self {
            start: month,
            end: month,
        }
    }

    /// Number of months visited under `mode`
    pub fn len_months(&self, mode: CompoundMode) -> usize {
        let span = self.start.months_until(self.end).max(0) as usize;
        match mode {
            CompoundMode::InclusiveEnd => span + 1,
            CompoundMode::ExclusiveEnd => span,
        }
    }

    /// Walk the range one calendar month at a time
    pub fn iter(&self, mode: CompoundMode) -> MonthIter {
        MonthIter {
            current: self.start,
            remaining: self.len_months(mode),
        }
    }

    /// Whether `month` falls inside the range under `mode`
    pub fn contains(&self, month: YearMonth, mode: CompoundMode) -> bool {
        match mode {
            CompoundMode::InclusiveEnd => self.start <= month && month <= self.end,
            CompoundMode::ExclusiveEnd => self.start <= month && month < self.end,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Iterator over consecutive calendar months
#[derive(Debug, Clone)]
pub struct MonthIter {
    current: YearMonth,
    remaining: usize,
}

impl Iterator for MonthIter {
    type Item = YearMonth;

    fn next(&mut self) -> Option<YearMonth> {
        if self.remaining == 0 {
            return None;
        }
        let month = self.current;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.current = month.succ();
        }
        Some(month)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MonthIter {}
