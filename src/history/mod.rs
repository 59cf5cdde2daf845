//! Trade history module
//!
//! Trade records, the known-pair registry, and the per-pair response decoder

mod decoder;
mod pairs;
mod range;
mod types;

pub use decoder::{DecodeError, HistoryDecoder};
pub use pairs::{PairRegistry, PairsError, UnknownPairPolicy, DEFAULT_PAIRS};
pub use range::{parse_timestamp, TimeRange, TimestampError, TIMESTAMP_FORMAT};
pub use types::{TradeHistoryByPair, TradeRecord, TradeSide};
