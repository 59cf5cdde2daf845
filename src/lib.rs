//! polo-history: authenticated Poloniex trade-history client
//!
//! This library provides:
//! - HMAC-SHA512 request signing with explicit credentials
//! - Signed form requests with strictly increasing nonces
//! - A deadline-bounded transport for the private trading API
//! - Decoding of the per-pair trade history response against a known-pair registry
//! - Exact-decimal rate statistics over public trade dumps
//! - Structured logging and Prometheus metrics

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod history;
pub mod stats;
pub mod telemetry;
