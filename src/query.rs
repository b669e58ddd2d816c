//! Queries built from raw form fields
//!
//! Inputs arrive as text (an amount box and year/month selectors). A blank
//! or unreadable field means the user has not finished entering the query:
//! the builders return `None` so the caller clears its output instead of
//! reporting an error. Validation failures only happen once a query is run.

use crate::calculator::{AdjustedComparison, CurrencyEquivalence, InflationAdjustment};
use crate::error::{PowerError, Result};
use crate::series::{Indicator, RateKind};
use crate::session::Session;
use crate::types::{Amount, DateRange, YearMonth};
use serde::Serialize;
use std::fmt;

/// Parse an amount field; blank or non-numeric text yields `None`
pub fn parse_amount(field: &str) -> Option<Amount> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    field.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parse a year/month selector pair
pub fn parse_month(year: &str, month: &str) -> Option<YearMonth> {
    let year: i32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    YearMonth::new(year, month).ok()
}

/// Project an amount across a period of inflation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InflationQuery {
    pub amount: Amount,
    pub start: YearMonth,
    pub end: YearMonth,
}

impl InflationQuery {
    pub fn from_fields(
        amount: &str,
        start_year: &str,
        start_month: &str,
        end_year: &str,
        end_month: &str,
    ) -> Option<Self> {
        Some(Self {
            amount: parse_amount(amount)?,
            start: parse_month(start_year, start_month)?,
            end: parse_month(end_year, end_month)?,
        })
    }

    pub fn run(&self, session: &Session) -> Result<InflationAdjustment> {
        let index = session.index(Indicator::Inflation)?;
        let range = DateRange {
            start: self.start,
            end: self.end,
        };
        session
            .calculator()
            .adjust_for_inflation(index, self.amount, range)
    }
}

/// Compare an earlier amount, adjusted for inflation, with a later one
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonQuery {
    pub amount1: Amount,
    pub date1: YearMonth,
    pub amount2: Amount,
    pub date2: YearMonth,
}

impl ComparisonQuery {
    pub fn from_fields(
        amount1: &str,
        year1: &str,
        month1: &str,
        amount2: &str,
        year2: &str,
        month2: &str,
    ) -> Option<Self> {
        Some(Self {
            amount1: parse_amount(amount1)?,
            date1: parse_month(year1, month1)?,
            amount2: parse_amount(amount2)?,
            date2: parse_month(year2, month2)?,
        })
    }

    pub fn run(&self, session: &Session) -> Result<AdjustedComparison> {
        let index = session.index(Indicator::Inflation)?;
        session.calculator().compare_adjusted_values(
            index,
            self.amount1,
            self.date1,
            self.amount2,
            self.date2,
        )
    }
}

/// Value a local amount in foreign currency at two dates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExchangeQuery {
    pub indicator: Indicator,
    pub amount: Amount,
    pub date_a: YearMonth,
    pub date_b: YearMonth,
}

impl ExchangeQuery {
    pub fn from_fields(
        indicator: Indicator,
        amount: &str,
        start_year: &str,
        start_month: &str,
        end_year: &str,
        end_month: &str,
    ) -> Option<Self> {
        Some(Self {
            indicator,
            amount: parse_amount(amount)?,
            date_a: parse_month(start_year, start_month)?,
            date_b: parse_month(end_year, end_month)?,
        })
    }

    pub fn run(&self, session: &Session) -> Result<CurrencyEquivalence> {
        if self.indicator.rate_kind() != RateKind::Price {
            return Err(PowerError::InvalidData(format!(
                "{} is not an exchange rate series",
                self.indicator
            )));
        }
        let index = session.index(self.indicator)?;
        session
            .calculator()
            .convert_at_dates(index, self.amount, self.date_a, self.date_b)
    }
}

/// Any query the presentation layer can submit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Query {
    Inflation(InflationQuery),
    Comparison(ComparisonQuery),
    Exchange(ExchangeQuery),
}

impl Query {
    pub fn run(&self, session: &Session) -> Result<Report> {
        match self {
            Query::Inflation(q) => q.run(session).map(Report::Inflation),
            Query::Comparison(q) => q.run(session).map(Report::Comparison),
            Query::Exchange(q) => q.run(session).map(Report::Exchange),
        }
    }
}

/// Result of a query, ready for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Inflation(InflationAdjustment),
    Comparison(AdjustedComparison),
    Exchange(CurrencyEquivalence),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Inflation(r) => fmt::Display::fmt(r, f),
            Report::Comparison(r) => fmt::Display::fmt(r, f),
            Report::Exchange(r) => fmt::Display::fmt(r, f),
        }
    }
}

/// Evaluate optional input: `None` clears the output, `Some` carries the outcome
pub fn evaluate(query: Option<Query>, session: &Session) -> Option<Result<Report>> {
    query.map(|q| q.run(session))
}
