//! Config command - Manage bridge configuration

use crate::config::ConfigManager;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Show the effective configuration
pub async fn show(config_path: Option<&Path>) -> Result<()> {
    let config = ConfigManager::load(config_path)?;
    let path = ConfigManager::path(config_path)?;

    println!("{}", "Strongbox Bridge Configuration".bold().underline());
    println!();
    println!("  File: {}", path.display().to_string().dimmed());
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

/// Point the bridge at an explicit host executable
pub async fn set_host(config_path: Option<&Path>, host: PathBuf) -> Result<()> {
    let (mut config, path) = ConfigManager::load_for_edit(config_path)?;

    if !host.exists() {
        println!(
            "{} {} does not exist yet",
            "!".yellow(),
            host.display().to_string().yellow()
        );
    }

    config.host_path = Some(host.clone());
    ConfigManager::save(&config, &path)?;

    println!("{} Host path set to: {}", "✓".green(), host.display());
    Ok(())
}

/// Set the per-request timeout; 0 disables it
pub async fn set_timeout(config_path: Option<&Path>, ms: u64) -> Result<()> {
    let (mut config, path) = ConfigManager::load_for_edit(config_path)?;
    config.request_timeout_ms = ms;
    ConfigManager::save(&config, &path)?;

    if ms == 0 {
        println!("{} Request timeout disabled", "✓".green());
    } else {
        println!("{} Request timeout set to {} ms", "✓".green(), ms);
    }
    Ok(())
}

/// Restore defaults
pub async fn reset(config_path: Option<&Path>) -> Result<()> {
    let (_, path) = ConfigManager::load_for_edit(config_path)?;
    ConfigManager::save(&Default::default(), &path)?;

    println!("{} Configuration reset to defaults", "✓".green());
    Ok(())
}
