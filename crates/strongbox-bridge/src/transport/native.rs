//! Process-per-message native host transport
//!
//! Mirrors the browser's one-shot native messaging: launch the host, write one
//! framed request to its stdin, read one framed reply from its stdout, then
//! let the process go.

use super::framing::{read_frame, write_frame, MAX_FROM_HOST};
use crate::config::BridgeConfig;
use crate::manifest;
use crate::ports::NativeTransport;
use crate::{BridgeError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

pub struct NativeHostTransport {
    host_path: PathBuf,
    args: Vec<String>,
}

impl NativeHostTransport {
    /// Talk to the executable at `host_path`.
    ///
    /// `origin` is passed as the first argument, the way browsers identify
    /// the calling extension to the host.
    pub fn new(host_path: impl Into<PathBuf>, origin: Option<String>) -> Self {
        Self {
            host_path: host_path.into(),
            args: origin.into_iter().collect(),
        }
    }

    /// Resolve the host from config, falling back to the installed
    /// native-messaging manifest for `config.host_name`
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        let host_path = match &config.host_path {
            Some(path) => path.clone(),
            None => manifest::locate(&config.host_name, &config.manifest_dirs)?.path,
        };

        Ok(Self::new(host_path, config.origin.clone()))
    }

    pub fn host_path(&self) -> &Path {
        &self.host_path
    }
}

#[async_trait]
impl NativeTransport for NativeHostTransport {
    async fn send(&self, message: Value) -> Result<Value> {
        debug!("Launching native host {}", self.host_path.display());

        let mut child = Command::new(&self.host_path)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                BridgeError::Transport(format!(
                    "failed to launch native host {}: {}",
                    self.host_path.display(),
                    e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BridgeError::Transport("host stdin unavailable".to_string()))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| BridgeError::Transport("host stdout unavailable".to_string()))?;

        write_frame(&mut stdin, &message).await?;
        let reply = read_frame(&mut stdout, MAX_FROM_HOST).await;

        // The browser closes the pipe once it has its reply; do the same and
        // reap the host without waiting on it.
        drop(stdin);
        if let Err(e) = child.start_kill() {
            debug!("Native host already exited: {}", e);
        }

        reply
    }
}
