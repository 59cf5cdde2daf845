//! Response decoder for `returnTradeHistory` with `currencyPair=all`
//!
//! The body is a JSON object keyed by pair identifier, each value an array of
//! trade objects. The exchange answers `[]` when there are no trades and
//! `{"error": "..."}` when it rejects the request.

use super::{PairRegistry, TradeHistoryByPair, TradeRecord, TradeSide, UnknownPairPolicy};
use serde_json::{Map, Value};
use thiserror::Error;

/// Decode errors
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body is not valid JSON
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Body is valid JSON but not a pair-keyed object
    #[error("Expected a JSON object keyed by currency pair, got {0}")]
    UnexpectedShape(&'static str),
    /// The exchange reported an error instead of a history
    #[error("Exchange error: {0}")]
    Exchange(String),
    /// Pair key not in the registry under `UnknownPairPolicy::Reject`
    #[error("Unknown currency pair: {0}")]
    UnknownPair(String),
    /// Pair value is not an array
    #[error("{pair}: expected an array of trades, got {found}")]
    NotAnArray { pair: String, found: &'static str },
    /// Trade entry is not an object
    #[error("{pair}[{index}]: expected a trade object, got {found}")]
    NotAnObject {
        pair: String,
        index: usize,
        found: &'static str,
    },
    /// Required field absent
    #[error("{pair}[{index}]: missing field `{field}`")]
    MissingField {
        pair: String,
        index: usize,
        field: &'static str,
    },
    /// Field present with the wrong type or value
    #[error("{pair}[{index}]: field `{field}` expected {expected}, got {found}")]
    InvalidField {
        pair: String,
        index: usize,
        field: &'static str,
        expected: &'static str,
        found: String,
    },
}

/// Decodes trade history bodies against a pair registry
#[derive(Debug, Clone, Default)]
pub struct HistoryDecoder {
    registry: PairRegistry,
    policy: UnknownPairPolicy,
}

impl HistoryDecoder {
    /// Create a decoder
    pub fn new(registry: PairRegistry, policy: UnknownPairPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    pub fn policy(&self) -> UnknownPairPolicy {
        self.policy
    }

    /// Decode a response body
    ///
    /// All-or-nothing: the first malformed record fails the whole body.
    pub fn decode(&self, body: &[u8]) -> Result<TradeHistoryByPair, DecodeError> {
        let value: Value = serde_json::from_slice(body)?;

        let object = match value {
            Value::Object(object) => object,
            Value::Array(items) if items.is_empty() => {
                tracing::debug!("Empty trade history");
                return Ok(TradeHistoryByPair::new());
            }
            other => return Err(DecodeError::UnexpectedShape(kind(&other))),
        };

        if let Some(error) = object.get("error") {
            let message = match error {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            };
            return Err(DecodeError::Exchange(message));
        }

        let mut history = TradeHistoryByPair::new();
        for (pair, trades) in object {
            if !self.registry.contains(&pair) {
                match self.policy {
                    UnknownPairPolicy::Reject => return Err(DecodeError::UnknownPair(pair)),
                    UnknownPairPolicy::Skip => {
                        tracing::warn!(pair = %pair, "Skipping unknown currency pair");
                        history.mark_skipped(pair);
                        continue;
                    }
                    UnknownPairPolicy::Accept => {
                        tracing::debug!(pair = %pair, "Accepting unknown currency pair");
                    }
                }
            }

            let records = decode_pair(&pair, trades)?;
            tracing::trace!(pair = %pair, trades = records.len(), "Decoded pair");
            history.insert(pair, records);
        }

        tracing::debug!(
            pairs = history.len(),
            trades = history.trade_count(),
            skipped = history.skipped_pairs().len(),
            "Decoded trade history"
        );

        Ok(history)
    }
}

fn decode_pair(pair: &str, trades: Value) -> Result<Vec<TradeRecord>, DecodeError> {
    let items = match trades {
        Value::Array(items) => items,
        other => {
            return Err(DecodeError::NotAnArray {
                pair: pair.to_string(),
                found: kind(&other),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item.as_object().ok_or_else(|| DecodeError::NotAnObject {
                pair: pair.to_string(),
                index,
                found: kind(item),
            })?;
            RecordFields { pair, index, object }.decode()
        })
        .collect()
}

/// Field extraction for one trade object, carrying its location for errors
struct RecordFields<'a> {
    pair: &'a str,
    index: usize,
    object: &'a Map<String, Value>,
}

impl RecordFields<'_> {
    fn decode(&self) -> Result<TradeRecord, DecodeError> {
        let side_str = self.string("type")?;
        let side = side_str
            .parse::<TradeSide>()
            .map_err(|found| self.invalid("type", "\"buy\" or \"sell\"", format!("{:?}", found)))?;

        Ok(TradeRecord {
            global_trade_id: self.unsigned("globalTradeID")?,
            trade_id: self.identifier("tradeID")?,
            date: self.string("date")?,
            rate: self.string("rate")?,
            amount: self.string("amount")?,
            total: self.string("total")?,
            fee: self.string("fee")?,
            order_number: self.identifier("orderNumber")?,
            side,
            category: self.string("category")?,
        })
    }

    fn field(&self, field: &'static str) -> Result<&Value, DecodeError> {
        self.object.get(field).ok_or_else(|| DecodeError::MissingField {
            pair: self.pair.to_string(),
            index: self.index,
            field,
        })
    }

    fn invalid(&self, field: &'static str, expected: &'static str, found: String) -> DecodeError {
        DecodeError::InvalidField {
            pair: self.pair.to_string(),
            index: self.index,
            field,
            expected,
            found,
        }
    }

    fn string(&self, field: &'static str) -> Result<String, DecodeError> {
        match self.field(field)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.invalid(field, "a string", kind(other).to_string())),
        }
    }

    fn unsigned(&self, field: &'static str) -> Result<u64, DecodeError> {
        let value = self.field(field)?;
        value
            .as_u64()
            .ok_or_else(|| self.invalid(field, "an unsigned integer", value.to_string()))
    }

    /// Identifier sent as either a string or an integer
    fn identifier(&self, field: &'static str) -> Result<String, DecodeError> {
        match self.field(field)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
            other => Err(self.invalid(field, "a string or integer", other.to_string())),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
