//! Configuration management

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use strongbox_bridge::BridgeConfig;

pub struct ConfigManager;

impl ConfigManager {
    /// Config file in use: `--config` if given, the bridge default otherwise
    pub fn path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => BridgeConfig::config_path().context("Could not resolve config path"),
        }
    }

    /// Load the config, then apply environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<BridgeConfig> {
        let path = Self::path(explicit)?;
        let mut config = BridgeConfig::load_from(&path)
            .with_context(|| format!("Failed to load config from {:?}", path))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load the file alone, without environment overrides, for editing
    pub fn load_for_edit(explicit: Option<&Path>) -> Result<(BridgeConfig, PathBuf)> {
        let path = Self::path(explicit)?;
        let config = BridgeConfig::load_from(&path)
            .with_context(|| format!("Failed to load config from {:?}", path))?;
        Ok((config, path))
    }

    pub fn save(config: &BridgeConfig, path: &Path) -> Result<()> {
        config
            .save_to(path)
            .with_context(|| format!("Failed to save config to {:?}", path))
    }
}
