//! Command implementations

pub mod config;
pub mod credentials;
pub mod database;
pub mod doctor;
pub mod entry;
pub mod status;

use crate::config::ConfigManager;
use anyhow::{Context, Result};
use std::path::Path;
use strongbox_bridge::NativeAppApi;

const NOT_CONNECTED: &str = "Strongbox not running or request failed";

/// Build the bridge client from the active config
pub fn connect(config_path: Option<&Path>) -> Result<NativeAppApi> {
    let config = ConfigManager::load(config_path)?;
    NativeAppApi::from_config(&config).context("Could not locate the Strongbox native host")
}

/// Turn a façade `None` into the CLI's single failure message
pub fn require<T>(response: Option<T>) -> Result<T> {
    response.context(NOT_CONNECTED)
}

/// Fail on an error the host put in an otherwise good reply
pub fn host_error(error: Option<String>) -> Result<()> {
    match error {
        Some(error) => anyhow::bail!("Strongbox reported: {}", error),
        None => Ok(()),
    }
}
