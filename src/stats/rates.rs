//! Min/max over rate series

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Statistics errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// No rates to summarise
    #[error("Cannot compute statistics over an empty rate series")]
    Empty,
    /// A rate string is not a decimal number
    #[error("Invalid rate at index {index}: {value:?}")]
    InvalidRate { index: usize, value: String },
}

/// Lowest and highest rate of a non-empty series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRange {
    pub min: Decimal,
    pub max: Decimal,
    /// Number of rates summarised
    pub count: usize,
}

impl RateRange {
    /// Summarise a series, failing on empty input
    pub fn from_rates(rates: &[Decimal]) -> Result<Self, StatsError> {
        let (first, rest) = rates.split_first().ok_or(StatsError::Empty)?;

        let (min, max) = rest.iter().fold((*first, *first), |(min, max), &rate| {
            (min.min(rate), max.max(rate))
        });

        Ok(Self {
            min,
            max,
            count: rates.len(),
        })
    }

    /// Difference between max and min
    pub fn spread(&self) -> Decimal {
        self.max - self.min
    }
}

/// Parse decimal rate strings, reporting the first bad index
pub fn parse_rates<'a, I>(rates: I) -> Result<Vec<Decimal>, StatsError>
where
    I: IntoIterator<Item = &'a str>,
{
    rates
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            Decimal::from_str(value).map_err(|_| StatsError::InvalidRate {
                index,
                value: value.to_string(),
            })
        })
        .collect()
}

/// Convert rates to plotting samples
///
/// Lossy. Only for display; comparisons stay on [`Decimal`].
pub fn to_samples(rates: &[Decimal]) -> Vec<f64> {
    rates
        .iter()
        .map(|rate| rate.to_f64().unwrap_or(f64::NAN))
        .collect()
}
