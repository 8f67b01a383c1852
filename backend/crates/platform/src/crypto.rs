//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Prefix marking a Base64-encoded secret in configuration
pub const BASE64_SECRET_PREFIX: &str = "base64:";

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// 256-bit random secret, suitable as an HMAC key
pub fn random_secret() -> Vec<u8> {
    random_bytes(32)
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode a configured secret
///
/// `base64:<data>` is decoded; anything else is taken as raw UTF-8 bytes.
pub fn decode_secret(raw: &str) -> Result<Vec<u8>, base64::DecodeError> {
    match raw.strip_prefix(BASE64_SECRET_PREFIX) {
        Some(encoded) => general_purpose::STANDARD.decode(encoded.trim()),
        None => Ok(raw.as_bytes().to_vec()),
    }
}
