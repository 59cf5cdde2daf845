//! Private trading API module
//!
//! Signed request construction, deadline-bounded transport, and the
//! trade history facade

mod client;
mod error;
mod request;

pub use client::{
    ClientConfig, PoloniexClient, RawResponse, DEFAULT_TIMEOUT, POLONIEX_TRADING_API_URL,
    RETURN_TRADE_HISTORY,
};
pub use error::ApiError;
pub use request::{
    join_path, NonceGenerator, RequestBuilder, SignedRequest, FORM_CONTENT_TYPE, KEY_HEADER,
    SIGN_HEADER,
};

use crate::history::{TimeRange, TradeHistoryByPair};
use async_trait::async_trait;

/// Trait for trade history sources
#[async_trait]
pub trait TradeHistorySource: Send + Sync {
    /// Fetch all trades in the range, keyed by currency pair
    async fn trade_history(&self, range: &TimeRange) -> Result<TradeHistoryByPair, ApiError>;
}
