//! Signed request construction

use super::ApiError;
use crate::auth::{sign, Credentials};
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

/// Content type of every private API request
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Header carrying the hex HMAC-SHA512 of the body
pub const SIGN_HEADER: HeaderName = HeaderName::from_static("sign");
/// Header carrying the public API key
pub const KEY_HEADER: HeaderName = HeaderName::from_static("key");

/// Strictly increasing nonce source
///
/// Seeded from wall-clock seconds, so nonces stay ahead of those issued by
/// earlier processes using the same key. Calls within the same second get
/// consecutive values instead of colliding.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce, greater than every nonce returned before
    pub fn next(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        self.next_after(now)
    }

    fn next_after(&self, now: u64) -> u64 {
        let prev = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        now.max(prev + 1)
    }
}

/// A fully built, signed request ready for the transport
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub url: Url,
    /// URL-encoded form body, exactly as signed
    pub body: String,
    pub headers: HeaderMap,
}

/// Builds signed form requests against the trading endpoint
#[derive(Debug)]
pub struct RequestBuilder {
    base_url: Url,
    credentials: Credentials,
    nonce: NonceGenerator,
}

impl RequestBuilder {
    /// Create a builder for an already validated base URL
    pub fn new(base_url: Url, credentials: Credentials) -> Self {
        Self {
            base_url,
            credentials,
            nonce: NonceGenerator::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a signed POST for `command` with a fresh nonce
    pub fn build(&self, command: &str, params: &[(&str, String)]) -> Result<SignedRequest, ApiError> {
        self.build_with_nonce(command, self.nonce.next(), params)
    }

    /// Build a signed POST with an explicit nonce
    ///
    /// Callers must never reuse a nonce with the same credentials.
    pub fn build_with_nonce(
        &self,
        command: &str,
        nonce: u64,
        params: &[(&str, String)],
    ) -> Result<SignedRequest, ApiError> {
        let nonce = nonce.to_string();
        let mut fields: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 2);
        fields.push(("command", command));
        fields.push(("nonce", nonce.as_str()));
        fields.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let body = serde_urlencoded::to_string(&fields)?;
        let headers = self.auth_headers(&body)?;

        Ok(SignedRequest {
            method: Method::POST,
            url: join_path(&self.base_url, ""),
            body,
            headers,
        })
    }

    fn auth_headers(&self, body: &str) -> Result<HeaderMap, ApiError> {
        let signature = sign(body.as_bytes(), self.credentials.secret());

        let mut headers = HeaderMap::new();
        headers.insert(
            SIGN_HEADER,
            HeaderValue::from_str(&signature).map_err(|_| ApiError::InvalidHeader("Sign"))?,
        );
        let mut key = HeaderValue::from_str(self.credentials.key())
            .map_err(|_| ApiError::InvalidHeader("Key"))?;
        key.set_sensitive(true);
        headers.insert(KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        Ok(headers)
    }
}

/// Join a sub-path onto the base URL path, dropping redundant slashes
pub fn join_path(base: &Url, sub: &str) -> Url {
    let mut path = base.path().trim_end_matches('/').to_string();
    let sub = sub.trim_matches('/');
    if !sub.is_empty() {
        path.push('/');
        path.push_str(sub);
    }
    if path.is_empty() {
        path.push('/');
    }

    let mut url = base.clone();
    url.set_path(&path);
    url
}
