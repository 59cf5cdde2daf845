//! Request time range

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Timestamp format accepted for range bounds, interpreted as UTC
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Time range errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    /// Input does not match `YYYY-MM-DDTHH:MM:SS`
    #[error("Invalid timestamp {input:?}: expected YYYY-MM-DDTHH:MM:SS ({source})")]
    Format {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    /// Range end precedes its start
    #[error("Invalid range: end {end} is before start {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Parse a `YYYY-MM-DDTHH:MM:SS` timestamp as UTC
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}

/// Inclusive range of trade times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Build a range, rejecting `end < start`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimestampError> {
        if end < start {
            return Err(TimestampError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds from `YYYY-MM-DDTHH:MM:SS`
    pub fn parse(start: &str, end: &str) -> Result<Self, TimestampError> {
        let parse = |input: &str| {
            parse_timestamp(input).map_err(|source| TimestampError::Format {
                input: input.to_string(),
                source,
            })
        };
        Self::new(parse(start)?, parse(end)?)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Start as exchange epoch seconds
    pub fn start_epoch(&self) -> i64 {
        self.start.timestamp()
    }

    /// End as exchange epoch seconds
    pub fn end_epoch(&self) -> i64 {
        self.end.timestamp()
    }
}
