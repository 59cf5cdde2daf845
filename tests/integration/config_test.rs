//! Integration tests for configuration loading

use polo_history::api::PoloniexClient;
use polo_history::auth::Credentials;
use polo_history::config::Config;
use polo_history::history::UnknownPairPolicy;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.api.base_url, "https://poloniex.com/tradingApi");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.pairs.unknown, UnknownPairPolicy::Skip);
    assert_eq!(config.telemetry.log_level, "info");
}

#[test]
fn test_config_builds_client() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    let client_config = config.client_config().unwrap();
    assert_eq!(client_config.timeout, Duration::from_secs(10));
    assert_eq!(client_config.registry.len(), 97);

    let credentials = Credentials::new("key", "secret").unwrap();
    let client = PoloniexClient::with_config(client_config, credentials).unwrap();
    assert_eq!(client.base_url().host_str(), Some("poloniex.com"));
}

#[test]
fn test_config_with_pairs_file() {
    let mut pairs = tempfile::NamedTempFile::new().unwrap();
    writeln!(pairs, "ETH/BTC").unwrap();
    writeln!(pairs, "BTC/USDT").unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[pairs]\nunknown = \"reject\"\nfile = {:?}",
        pairs.path().display().to_string()
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    let client_config = config.client_config().unwrap();
    assert_eq!(client_config.unknown_pairs, UnknownPairPolicy::Reject);
    let ids: Vec<&str> = client_config.registry.iter().collect();
    assert_eq!(ids, vec!["BTC_ETH", "USDT_BTC"]);
}

#[test]
fn test_config_missing_pairs_file() {
    let config: Config = toml::from_str("[pairs]\nfile = \"/nonexistent/pairs.txt\"").unwrap();
    assert!(config.client_config().is_err());
}

#[test]
fn test_config_bad_base_url_fails_client() {
    let config: Config = toml::from_str("[api]\nbase_url = \"poloniex.com\"").unwrap();
    let credentials = Credentials::new("key", "secret").unwrap();
    let result = PoloniexClient::with_config(config.client_config().unwrap(), credentials);
    assert!(result.is_err());
}
