//! Strongbox Bridge
//!
//! Encrypted native-messaging client for the Strongbox password manager:
//! host transport, key agreement, the sealed envelope protocol and the typed
//! operation façade built on top of them.

// Re-export the wire types
pub use strongbox_types::*;

pub mod api;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod keys;
pub mod manifest;
pub mod ports;
pub mod protocol;
pub mod transport;

pub use api::NativeAppApi;
pub use config::BridgeConfig;
pub use crypto::{EncryptionEngine, NaClEngine};
pub use error::{BridgeError, Result};
pub use ports::NativeTransport;
pub use transport::NativeHostTransport;
