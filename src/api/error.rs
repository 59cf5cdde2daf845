//! API error types

use crate::auth::CredentialsError;
use crate::history::{DecodeError, TimestampError};
use std::time::Duration;
use thiserror::Error;

/// Trading API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Base URL is not an absolute http(s) URL
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Missing or empty credentials
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    /// Bad range bounds, raised before any network activity
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
    /// Form body could not be encoded
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
    /// Credential or signature is not a valid header value
    #[error("Invalid value for header {0}")]
    InvalidHeader(&'static str),
    /// Deadline elapsed before the response arrived
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// Connection, DNS or protocol failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Response body could not be decoded
    #[error("Failed to decode response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: DecodeError,
    },
}

impl ApiError {
    /// Check if the error happened before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidBaseUrl { .. }
                | ApiError::HttpClient(_)
                | ApiError::Credentials(_)
                | ApiError::Timestamp(_)
                | ApiError::Encode(_)
                | ApiError::InvalidHeader(_)
        )
    }
}
