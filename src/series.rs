//! Monthly time series of inflation rates and exchange rates
//!
//! Datasets arrive as JSON, either a bare array of samples or an object
//! wrapping exactly one array:
//!
//! ```json
//! {"inflationData": [{"year": 2023, "month": 1, "inflation": 6.0}]}
//! [{"year": 2023, "month": 1, "valor": 350.0}]
//! ```
//!
//! Samples are expected in ascending (year, month) order without duplicates.
//! That ordering is a precondition of the dataset and is not checked here.

use crate::compound::CompoundMode;
use crate::error::{PowerError, Result};
use crate::types::YearMonth;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

/// How a rate value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateKind {
    /// Monthly percentage change (5.0 = 5%)
    Percent,
    /// Local currency units per one foreign unit
    Price,
}

/// Economic indicator backed by one dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Indicator {
    #[serde(rename = "inflation")]
    Inflation,
    #[serde(rename = "blue")]
    BlueDollar,
    #[serde(rename = "official")]
    OfficialDollar,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [
        Indicator::Inflation,
        Indicator::BlueDollar,
        Indicator::OfficialDollar,
    ];

    /// Stable key used in config files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Indicator::Inflation => "inflation",
            Indicator::BlueDollar => "blue",
            Indicator::OfficialDollar => "official",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::Inflation => "Monthly inflation",
            Indicator::BlueDollar => "Blue dollar",
            Indicator::OfficialDollar => "Official dollar",
        }
    }

    /// Dataset file name looked up inside the data directory
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Indicator::Inflation => "inflation-data.json",
            Indicator::BlueDollar => "dolarblue-data.json",
            Indicator::OfficialDollar => "dolaroficial-data.json",
        }
    }

    pub fn rate_kind(&self) -> RateKind {
        match self {
            Indicator::Inflation => RateKind::Percent,
            Indicator::BlueDollar | Indicator::OfficialDollar => RateKind::Price,
        }
    }

    /// Parse from key (`inflation`, `blue`, `official`)
    pub fn from_key(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "inflation" => Ok(Indicator::Inflation),
            "blue" => Ok(Indicator::BlueDollar),
            "official" => Ok(Indicator::OfficialDollar),
            _ => Err(PowerError::ParseError(format!("Unknown indicator: {}", s))),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One month of data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub year: i32,
    pub month: u32,
    #[serde(alias = "inflation", alias = "valor", alias = "value")]
    pub rate: f64,
}

impl Sample {
    pub fn new(year: i32, month: u32, rate: f64) -> Self {
        Self { year, month, rate }
    }

    /// Month key for this sample
    pub fn period(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// Ordered samples for one indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    indicator: Indicator,
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Build a series, validating every sample
    pub fn from_samples(indicator: Indicator, samples: Vec<Sample>) -> Result<Self> {
        for (i, sample) in samples.iter().enumerate() {
            validate_sample(indicator, i, sample)?;
        }
        Ok(Self { indicator, samples })
    }

    /// Parse a JSON dataset
    pub fn from_json_str(indicator: Indicator, json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json).map_err(|e| load_failure(indicator, e))?;
        Self::from_json_value(indicator, document)
    }

    /// Parse a JSON dataset from any reader
    pub fn from_reader<R: Read>(indicator: Indicator, reader: R) -> Result<Self> {
        let document: Value =
            serde_json::from_reader(reader).map_err(|e| load_failure(indicator, e))?;
        Self::from_json_value(indicator, document)
    }

    /// Read and parse a JSON dataset file
    pub fn from_path<P: AsRef<Path>>(indicator: Indicator, path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            load_failure(indicator, format!("{}: {}", path.display(), e))
        })?;
        let series = Self::from_json_str(indicator, &contents)?;
        log::info!(
            "Loaded {} {} samples from {}",
            series.len(),
            indicator,
            path.display()
        );
        Ok(series)
    }

    fn from_json_value(indicator: Indicator, document: Value) -> Result<Self> {
        let entries = match document {
            Value::Array(items) => Value::Array(items),
            Value::Object(map) => {
                let keys = map.len();
                let mut fields = map.into_iter();
                match (fields.next(), keys) {
                    (Some((_, inner @ Value::Array(_))), 1) => inner,
                    (Some((key, _)), 1) => {
                        return Err(load_failure(
                            indicator,
                            format!("field '{}' is not an array", key),
                        ))
                    }
                    _ => {
                        return Err(load_failure(
                            indicator,
                            format!("expected an object wrapping one array, found {} keys", keys),
                        ))
                    }
                }
            }
            other => {
                return Err(load_failure(
                    indicator,
                    format!("expected an array of samples, found {}", json_kind(&other)),
                ))
            }
        };

        let samples: Vec<Sample> =
            serde_json::from_value(entries).map_err(|e| load_failure(indicator, e))?;
        Self::from_samples(indicator, samples).map_err(|e| load_failure(indicator, e))
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Distinct years present in the series, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.samples.iter().map(|s| s.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Default date-selector values covering the whole dataset
    ///
    /// In exclusive mode the end month whose rate is never applied sits one
    /// month past the trailing sample, so the default end is advanced by one.
    pub fn selector_bounds(&self, mode: CompoundMode) -> Option<SelectorBounds> {
        let first = self.first()?.period();
        let last = self.last()?.period();

        let default_end = match mode {
            CompoundMode::InclusiveEnd => last,
            CompoundMode::ExclusiveEnd => last.succ(),
        };
        let default_start = YearMonth {
            year: first.year,
            month: 1,
        };

        Some(SelectorBounds {
            years: (first.year..=default_end.year).collect(),
            default_start,
            default_end,
        })
    }
}

/// Year options and defaults for a pair of date selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorBounds {
    pub years: Vec<i32>,
    pub default_start: YearMonth,
    pub default_end: YearMonth,
}

fn validate_sample(indicator: Indicator, position: usize, sample: &Sample) -> Result<()> {
    YearMonth::new(sample.year, sample.month)
        .map_err(|e| PowerError::InvalidData(format!("Sample {}: {}", position, e)))?;
    if !sample.rate.is_finite() {
        return Err(PowerError::InvalidData(format!(
            "Sample {} ({}) has non-finite rate",
            position,
            sample.period()
        )));
    }
    if indicator.rate_kind() == RateKind::Percent && sample.rate <= -100.0 {
        return Err(PowerError::InvalidData(format!(
            "Monthly change must be above -100%, got {} at {}",
            sample.rate,
            sample.period()
        )));
    }
    if indicator.rate_kind() == RateKind::Price && sample.rate <= 0.0 {
        return Err(PowerError::InvalidData(format!(
            "Exchange rate must be positive, got {} at {}",
            sample.rate,
            sample.period()
        )));
    }
    Ok(())
}

fn load_failure(indicator: Indicator, reason: impl fmt::Display) -> PowerError {
    PowerError::DataLoadFailure {
        indicator: indicator.key().to_string(),
        reason: reason.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
