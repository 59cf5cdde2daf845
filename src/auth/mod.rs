//! Authentication module
//!
//! HMAC-SHA512 request signing and API credentials

mod credentials;
mod signer;

pub use credentials::{Credentials, CredentialsError, KEY_ENV_VAR, SECRET_ENV_VAR};
pub use signer::sign;
