//! Trade history types

use super::range::parse_timestamp;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Side of a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl FromStr for TradeSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            other => Err(other.to_string()),
        }
    }
}

/// One fill from the private trade history
///
/// Monetary fields are kept as the exact strings the exchange sent.
/// Use the `*_value` accessors to get a [`Decimal`] at the point of arithmetic.
/// Built by [`HistoryDecoder`](super::HistoryDecoder); serialized with the exchange's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Exchange-wide trade identifier
    #[serde(rename = "globalTradeID")]
    pub global_trade_id: u64,
    /// Pair-scoped trade identifier
    #[serde(rename = "tradeID")]
    pub trade_id: String,
    /// Execution time, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`
    pub date: String,
    pub rate: String,
    pub amount: String,
    pub total: String,
    pub fee: String,
    pub order_number: String,
    /// Buy or sell
    #[serde(rename = "type")]
    pub side: TradeSide,
    /// Account category (exchange, margin, ...)
    pub category: String,
}

impl TradeRecord {
    /// Rate as an exact decimal
    pub fn rate_value(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.rate)
    }

    /// Amount as an exact decimal
    pub fn amount_value(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.amount)
    }

    /// Total as an exact decimal
    pub fn total_value(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.total)
    }

    /// Fee as an exact decimal
    pub fn fee_value(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.fee)
    }

    /// Execution time interpreted as UTC
    pub fn executed_at(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        // The exchange sends a space separator; the request format uses 'T'
        parse_timestamp(&self.date.replacen(' ', "T", 1))
    }
}

/// Trade history keyed by currency pair (e.g. `BTC_ETH`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeHistoryByPair {
    pairs: BTreeMap<String, Vec<TradeRecord>>,
    /// Pair keys present in the response but not in the registry
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<String>,
}

impl TradeHistoryByPair {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trades for a pair, replacing any previous entry
    pub fn insert(&mut self, pair: impl Into<String>, trades: Vec<TradeRecord>) {
        self.pairs.insert(pair.into(), trades);
    }

    /// Record a pair key that was dropped by the decoder
    pub(crate) fn mark_skipped(&mut self, pair: impl Into<String>) {
        let pair = pair.into();
        if let Err(pos) = self.skipped.binary_search(&pair) {
            self.skipped.insert(pos, pair);
        }
    }

    /// Trades for a pair, in the order the exchange returned them
    pub fn get(&self, pair: &str) -> Option<&[TradeRecord]> {
        self.pairs.get(pair).map(Vec::as_slice)
    }

    /// Iterate pairs in lexical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TradeRecord])> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of pairs with an entry
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if no pair has an entry
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Total number of trades across all pairs
    pub fn trade_count(&self) -> usize {
        self.pairs.values().map(Vec::len).sum()
    }

    /// Pair keys skipped because they are not in the registry, in lexical order
    pub fn skipped_pairs(&self) -> &[String] {
        &self.skipped
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> BTreeMap<String, Vec<TradeRecord>> {
        self.pairs
    }
}
