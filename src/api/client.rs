//! Poloniex private API client
//!
//! Owns the validated base URL, the HTTP transport and the response decoder.
//! Every call runs under a deadline; once it elapses the in-flight request is
//! dropped and a timeout error is returned.

use super::{ApiError, RequestBuilder, SignedRequest, TradeHistorySource};
use crate::auth::Credentials;
use crate::history::{
    HistoryDecoder, PairRegistry, TimeRange, TradeHistoryByPair, UnknownPairPolicy,
};
use crate::telemetry::{record_request, record_trades_decoded, RequestOutcome};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use url::Url;

/// Private trading API endpoint
pub const POLONIEX_TRADING_API_URL: &str = "https://poloniex.com/tradingApi";

/// Upper bound on a trade history call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Command name for the private trade history
pub const RETURN_TRADE_HISTORY: &str = "returnTradeHistory";

/// Configuration for the trading API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute http(s) URL of the trading endpoint
    pub base_url: String,
    /// Deadline applied to each trade history call
    pub timeout: Duration,
    /// Pairs the decoder recognises
    pub registry: PairRegistry,
    /// Handling of pairs outside the registry
    pub unknown_pairs: UnknownPairPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: POLONIEX_TRADING_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            registry: PairRegistry::default(),
            unknown_pairs: UnknownPairPolicy::default(),
        }
    }
}

/// Status and raw body of a response, before decoding
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Client for the Poloniex private trading API
#[derive(Debug)]
pub struct PoloniexClient {
    requests: RequestBuilder,
    http: Client,
    decoder: HistoryDecoder,
    timeout: Duration,
}

impl PoloniexClient {
    /// Create a client with default settings for the given endpoint
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, ApiError> {
        Self::with_config(
            ClientConfig {
                base_url: base_url.to_string(),
                ..ClientConfig::default()
            },
            credentials,
        )
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig, credentials: Credentials) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = Client::builder().build().map_err(ApiError::HttpClient)?;

        tracing::debug!(
            base_url = %base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            known_pairs = config.registry.len(),
            unknown_pairs = ?config.unknown_pairs,
            "Created trading API client"
        );

        Ok(Self {
            requests: RequestBuilder::new(base_url, credentials),
            http,
            decoder: HistoryDecoder::new(config.registry, config.unknown_pairs),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        self.requests.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn decoder(&self) -> &HistoryDecoder {
        &self.decoder
    }

    /// Builder for signed requests with this client's credentials
    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    /// Send a signed request, failing with [`ApiError::Timeout`] once `deadline` elapses
    ///
    /// Non-2xx statuses are not errors here; the body is returned as-is.
    pub async fn execute_signed(
        &self,
        request: SignedRequest,
        deadline: Duration,
    ) -> Result<RawResponse, ApiError> {
        let SignedRequest {
            method,
            url,
            body,
            headers,
        } = request;

        tracing::debug!(
            method = %method,
            url = %url,
            body_len = body.len(),
            "Sending signed request"
        );

        let started = Instant::now();
        let send = async {
            let response = self
                .http
                .request(method, url)
                .headers(headers)
                .body(body)
                .send()
                .await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(RawResponse {
                status,
                body: body.to_vec(),
            })
        };

        let result = match tokio::time::timeout(deadline, send).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) if e.is_timeout() => Err(ApiError::Timeout(deadline)),
            Ok(Err(e)) => Err(ApiError::Transport(e)),
            Err(_) => Err(ApiError::Timeout(deadline)),
        };

        let elapsed = started.elapsed();
        match &result {
            Ok(response) => {
                record_request(RequestOutcome::Completed, elapsed);
                if response.status.is_success() {
                    tracing::debug!(
                        status = response.status.as_u16(),
                        body_len = response.body.len(),
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Received response"
                    );
                } else {
                    tracing::warn!(
                        status = response.status.as_u16(),
                        body_len = response.body.len(),
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Received non-success response"
                    );
                }
            }
            Err(ApiError::Timeout(_)) => {
                record_request(RequestOutcome::TimedOut, elapsed);
                tracing::warn!(deadline_ms = deadline.as_millis() as u64, "Request timed out");
            }
            Err(e) => {
                record_request(RequestOutcome::Failed, elapsed);
                tracing::warn!(error = %e, "Request failed");
            }
        }

        result
    }

    /// Fetch every trade between `start` and `end` (`YYYY-MM-DDTHH:MM:SS`, UTC)
    ///
    /// Fails before touching the network if either bound is malformed or
    /// `end` precedes `start`. No retries.
    pub async fn get_my_trade_history(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TradeHistoryByPair, ApiError> {
        let range = TimeRange::parse(start, end)?;
        self.trade_history(&range).await
    }

    async fn fetch_trade_history(&self, range: &TimeRange) -> Result<TradeHistoryByPair, ApiError> {
        tracing::info!(
            start = range.start_epoch(),
            end = range.end_epoch(),
            "Fetching trade history"
        );

        let request = self.requests.build(
            RETURN_TRADE_HISTORY,
            &[
                ("currencyPair", "all".to_string()),
                ("start", range.start_epoch().to_string()),
                ("end", range.end_epoch().to_string()),
            ],
        )?;

        let response = self.execute_signed(request, self.timeout).await?;

        let history = self
            .decoder
            .decode(&response.body)
            .map_err(|source| ApiError::Decode {
                status: response.status.as_u16(),
                source,
            })?;

        record_trades_decoded(history.trade_count());
        tracing::info!(
            pairs = history.len(),
            trades = history.trade_count(),
            skipped = history.skipped_pairs().len(),
            "Fetched trade history"
        );

        Ok(history)
    }
}

#[async_trait]
impl TradeHistorySource for PoloniexClient {
    async fn trade_history(&self, range: &TimeRange) -> Result<TradeHistoryByPair, ApiError> {
        self.fetch_trade_history(range).await
    }
}

/// Parse and validate the configured endpoint
fn parse_base_url(input: &str) -> Result<Url, ApiError> {
    let url = Url::parse(input).map_err(|e| ApiError::InvalidBaseUrl {
        url: input.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl {
            url: input.to_string(),
            reason: "must be an absolute http(s) URL".to_string(),
        });
    }

    Ok(url)
}
