//! Strongbox Types - Pure wire definitions for the native-messaging bridge
//!
//! This crate contains only serde data types: the message-type tags, the
//! encrypted request/response envelopes and the inner payload records the
//! native host understands. It has no async runtime or crypto dependency.

pub mod credential;
pub mod encryption;
pub mod entry;
pub mod envelope;
pub mod status;

pub use credential::*;
pub use encryption::*;
pub use entry::*;
pub use envelope::*;
pub use status::*;

/// Native-messaging host identifier registered by the Strongbox application
pub const STRONGBOX_HOST_NAME: &str = "com.markmcguill.strongbox";
