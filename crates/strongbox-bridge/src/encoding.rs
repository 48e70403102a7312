//! Base64 helpers for binary envelope fields

use crate::{BridgeError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode(value: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(value)?)
}

/// Decode a fixed-size field such as a key or nonce
pub fn decode_array<const N: usize>(value: &str, field: &str) -> Result<[u8; N]> {
    let bytes = decode(value)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        BridgeError::Protocol(format!(
            "{} must be {} bytes, got {}",
            field,
            N,
            bytes.len()
        ))
    })
}
