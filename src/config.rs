//! Configuration types for polo-history

use crate::api::{ClientConfig, DEFAULT_TIMEOUT, POLONIEX_TRADING_API_URL};
use crate::history::{PairRegistry, PairsError, UnknownPairPolicy};
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pairs: PairsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Trading API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Trading endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Deadline for each trade history call (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    POLONIEX_TRADING_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Known currency pair configuration
///
/// `known` and `file` are merged; when both are absent the built-in list is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairsConfig {
    /// Handling of pairs outside the known set
    #[serde(default)]
    pub unknown: UnknownPairPolicy,

    /// Pair identifiers such as `BTC_ETH`
    #[serde(default)]
    pub known: Option<Vec<String>>,

    /// Newline-delimited `BASE/QUOTE` list
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl PairsConfig {
    /// Build the registry this configuration describes
    pub fn registry(&self) -> Result<PairRegistry, PairsError> {
        if self.known.is_none() && self.file.is_none() {
            return Ok(PairRegistry::default());
        }

        let mut registry = match &self.file {
            Some(path) => PairRegistry::load_pairs_file(path)?,
            None => PairRegistry::from_pairs(Vec::<String>::new()),
        };
        for pair in self.known.iter().flatten() {
            registry.insert(pair.clone());
        }

        Ok(registry)
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub format: LogFormat,
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Client settings derived from the `[api]` and `[pairs]` sections
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        anyhow::ensure!(self.api.timeout_secs > 0, "api.timeout_secs must be greater than 0");

        Ok(ClientConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            registry: self.pairs.registry()?,
            unknown_pairs: self.pairs.unknown,
        })
    }
}
