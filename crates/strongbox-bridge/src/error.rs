//! Error types for the Strongbox bridge
//!
//! These stay inside the crate boundary. The public façade collapses every
//! variant into `None` so no failure detail reaches the page context.

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Native host did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Native host rejected the request")]
    HostRejected,

    #[error("Decryption failed")]
    Decryption,

    #[error("Encryption failed")]
    Encryption,

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No host public key available")]
    MissingPeerKey,

    #[error("Native host not found: {0}")]
    HostNotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl BridgeError {
    /// Whether this failure means the cached host key can no longer be trusted
    pub fn invalidates_peer_key(&self) -> bool {
        matches!(
            self,
            BridgeError::Io(_)
                | BridgeError::Transport(_)
                | BridgeError::Timeout(_)
                | BridgeError::HostRejected
                | BridgeError::Decryption
                | BridgeError::Protocol(_)
        )
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::Serialization(e.to_string())
    }
}

impl From<base64::DecodeError> for BridgeError {
    fn from(e: base64::DecodeError) -> Self {
        BridgeError::Protocol(format!("invalid base64: {}", e))
    }
}
