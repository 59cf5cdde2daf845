//! API credentials

use std::fmt;
use thiserror::Error;

/// Environment variable holding the public API key
pub const KEY_ENV_VAR: &str = "POLOKEY";
/// Environment variable holding the signing secret
pub const SECRET_ENV_VAR: &str = "POLOSECRET";

/// Credential errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    /// A credential is absent or empty
    #[error("Missing credential: {0}")]
    Missing(&'static str),

    /// A credential variable is set but not valid unicode
    #[error("Credential {0} is not valid unicode")]
    NotUnicode(&'static str),
}

/// API key and signing secret for the private trading API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Create credentials, rejecting empty values
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, CredentialsError> {
        let key = key.into();
        let secret = secret.into();

        if key.trim().is_empty() {
            return Err(CredentialsError::Missing("api key"));
        }
        if secret.trim().is_empty() {
            return Err(CredentialsError::Missing("api secret"));
        }

        Ok(Self { key, secret })
    }

    /// Read credentials from `POLOKEY` and `POLOSECRET`
    pub fn from_env() -> Result<Self, CredentialsError> {
        let key = non_empty_var(KEY_ENV_VAR)?;
        let secret = non_empty_var(SECRET_ENV_VAR)?;
        Ok(Self { key, secret })
    }

    /// Public API key
    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

fn non_empty_var(name: &'static str) -> Result<String, CredentialsError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Err(std::env::VarError::NotUnicode(_)) => Err(CredentialsError::NotUnicode(name)),
        _ => Err(CredentialsError::Missing(name)),
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}
