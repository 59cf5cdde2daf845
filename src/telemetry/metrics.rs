//! Prometheus metrics

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Request latency histogram, in milliseconds
pub const REQUEST_LATENCY_METRIC: &str = "polo_request_latency_ms";
/// Requests by outcome
pub const REQUESTS_TOTAL_METRIC: &str = "polo_requests_total";
/// Trades decoded from history responses
pub const TRADES_DECODED_METRIC: &str = "polo_trades_decoded_total";

/// Transport outcome of a signed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A response arrived, whatever its status
    Completed,
    /// The deadline elapsed first
    TimedOut,
    /// Connection or protocol failure
    Failed,
}

impl RequestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Completed => "completed",
            RequestOutcome::TimedOut => "timed_out",
            RequestOutcome::Failed => "failed",
        }
    }
}

/// Record a request's latency and outcome
pub fn record_request(outcome: RequestOutcome, duration: Duration) {
    metrics::histogram!(REQUEST_LATENCY_METRIC).record(duration.as_secs_f64() * 1000.0);
    metrics::counter!(REQUESTS_TOTAL_METRIC, "outcome" => outcome.as_str()).increment(1);

    tracing::trace!(
        metric = REQUEST_LATENCY_METRIC,
        outcome = outcome.as_str(),
        value_ms = duration.as_millis() as u64,
        "Recording latency"
    );
}

/// Count decoded trades
pub fn record_trades_decoded(count: usize) {
    metrics::counter!(TRADES_DECODED_METRIC).increment(count as u64);
}

/// Serve metrics for Prometheus scraping on `0.0.0.0:port`
///
/// Must be called from within a tokio runtime.
pub fn install_metrics_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(port, "Metrics exporter listening");
    Ok(())
}
