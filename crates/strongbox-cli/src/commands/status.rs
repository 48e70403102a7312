//! Status and launch commands

use super::{connect, require};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub async fn show(config_path: Option<&Path>) -> Result<()> {
    let api = connect(config_path)?;
    let status = require(api.get_status().await)?;

    println!("{}", "Strongbox Status".bold().underline());
    println!();
    println!("  Version: {}", status.server_version_info);
    println!(
        "  Databases: {} ({} unlocked)",
        status.databases.len(),
        status.unlocked_count()
    );
    println!();

    for db in &status.databases {
        let state = if db.locked {
            "locked".red()
        } else {
            "unlocked".green()
        };
        println!("  {} {} [{}]", "•".cyan(), db.nick_name.bold(), state);
        println!("      {}", db.uuid.dimmed());
        if !db.auto_fill_enabled {
            println!("      {}", "autofill disabled".yellow());
        }
    }

    if status.server_settings.supports_create_new {
        println!();
        println!("  {}", "Entry creation supported".dimmed());
    }

    Ok(())
}

pub async fn launch(config_path: Option<&Path>) -> Result<()> {
    let api = connect(config_path)?;

    if api.launch_strongbox().await {
        println!("{} Strongbox launched", "✓".green());
        Ok(())
    } else {
        anyhow::bail!("Strongbox could not be launched")
    }
}
