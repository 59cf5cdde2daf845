//! Telemetry module
//!
//! Metrics and logging

mod logging;
mod metrics;

pub use self::logging::{init_logging, LogFormat};
pub use self::metrics::{
    install_metrics_exporter, record_request, record_trades_decoded, RequestOutcome,
    REQUESTS_TOTAL_METRIC, REQUEST_LATENCY_METRIC, TRADES_DECODED_METRIC,
};

use crate::config::TelemetryConfig;

/// Install the global subscriber and, when a port is configured, the metrics exporter
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.format)?;

    if let Some(port) = config.metrics_port {
        install_metrics_exporter(port)?;
    }

    Ok(())
}
