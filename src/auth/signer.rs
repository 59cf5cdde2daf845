//! Request body signing

use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Sign a message with HMAC-SHA512, returning the digest as lowercase hex
///
/// HMAC accepts keys of any length, including empty ones; an empty secret
/// is rejected by the exchange, not here.
pub fn sign(message: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha512::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
