//! Native-messaging delivery port

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// One-shot request/response delivery to the native host.
///
/// Each call sends one JSON message and resolves with exactly one JSON reply.
/// Implementations do not retry. Replies to overlapping calls are not
/// guaranteed to arrive in call order.
#[async_trait]
pub trait NativeTransport: Send + Sync {
    /// Deliver `message` to the host and wait for its reply
    async fn send(&self, message: Value) -> Result<Value>;
}
