//! Native-messaging wire framing
//!
//! Each message is a `u32` byte length in native byte order followed by that
//! many bytes of UTF-8 JSON.

use crate::{BridgeError, Result};
use serde_json::Value;
use std::io::ErrorKind;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Largest message a browser will deliver to a native host
pub const MAX_TO_HOST: usize = 64 * 1024 * 1024;

/// Largest message a browser accepts from a native host
pub const MAX_FROM_HOST: usize = 1024 * 1024;

pub async fn write_frame<W>(writer: &mut W, message: &Value) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body = serde_json::to_vec(message)?;
    if body.len() > MAX_TO_HOST {
        return Err(BridgeError::Transport(format!(
            "message of {} bytes exceeds the {} byte limit",
            body.len(),
            MAX_TO_HOST
        )));
    }

    writer.write_all(&(body.len() as u32).to_ne_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_frame<R>(reader: &mut R, limit: usize) -> Result<Value>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix).await.map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            BridgeError::Transport("host closed without replying".to_string())
        }
        _ => BridgeError::Io(e),
    })?;

    let len = u32::from_ne_bytes(prefix) as usize;
    if len > limit {
        return Err(BridgeError::Transport(format!(
            "reply of {} bytes exceeds the {} byte limit",
            len, limit
        )));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await.map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => BridgeError::Transport(format!(
            "reply truncated, expected {} bytes",
            len
        )),
        _ => BridgeError::Io(e),
    })?;

    serde_json::from_slice(&body)
        .map_err(|e| BridgeError::Transport(format!("reply is not JSON: {}", e)))
}
