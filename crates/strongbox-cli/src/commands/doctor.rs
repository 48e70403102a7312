//! Doctor command - Diagnostics

use crate::config::ConfigManager;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use strongbox_bridge::{manifest, NativeAppApi};

pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    println!("{}", "Strongbox Bridge Diagnostics".blue().bold());
    println!();

    println!("{}", "System:".cyan());
    println!("   OS: {} {}", std::env::consts::OS, std::env::consts::ARCH);
    println!();

    println!("{}", "Configuration:".cyan());
    let config = match ConfigManager::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("   {} Failed to load config: {:#}", "✗".red(), e);
            return Ok(());
        }
    };
    if let Ok(path) = ConfigManager::path(config_path) {
        let note = if path.exists() { "" } else { " (defaults)" };
        println!("   File: {}{}", path.display().to_string().dimmed(), note);
    }
    println!("   Host name: {}", config.host_name);
    match config.request_timeout() {
        Some(timeout) => println!("   Timeout: {:?}", timeout),
        None => println!("   Timeout: {}", "disabled".yellow()),
    }
    println!("   Page size: {}", config.credential_results_page_size);
    println!();

    println!("{}", "Native host:".cyan());
    match &config.host_path {
        Some(path) => println!("   Configured path: {}", path.display()),
        None => match manifest::locate(&config.host_name, &config.manifest_dirs) {
            Ok(found) => {
                println!("   {} Manifest found", "✓".green());
                println!("      {}", found.path.display().to_string().dimmed());
            }
            Err(e) => {
                println!("   {} {}", "✗".red(), e);
                println!(
                    "      Set {} or {}",
                    "STRONGBOX_HOST_PATH".dimmed(),
                    "sbx config set-host <path>".dimmed()
                );
                println!();
                return Ok(());
            }
        },
    }
    println!();

    println!("{}", "Connection:".cyan());
    match NativeAppApi::from_config(&config) {
        Ok(api) => match api.get_status().await {
            Some(status) => {
                println!(
                    "   {} Strongbox {} answered",
                    "✓".green(),
                    status.server_version_info
                );
                println!(
                    "   {} database(s), {} unlocked",
                    status.databases.len(),
                    status.unlocked_count()
                );
            }
            None => {
                println!("   {} Strongbox not running or request failed", "✗".red());
                println!("      Try: {}", "sbx launch".dimmed());
            }
        },
        Err(e) => println!("   {} {}", "✗".red(), e),
    }
    println!();

    println!("{}", "Done!".green().bold());

    Ok(())
}
