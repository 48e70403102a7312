//! Database lock state and group commands

use super::{connect, host_error, require};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use strongbox_types::GetGroupsRequest;

pub async fn unlock(config_path: Option<&Path>, database_id: &str) -> Result<()> {
    let api = connect(config_path)?;
    let response = require(api.unlock_database(database_id).await)?;

    if !response.success {
        anyhow::bail!("Database {} was not unlocked", database_id);
    }
    println!("{} Unlocked {}", "✓".green(), database_id.cyan());
    Ok(())
}

pub async fn lock(config_path: Option<&Path>, database_id: &str) -> Result<()> {
    let api = connect(config_path)?;
    let response = require(api.lock_database(database_id).await)?;

    if !response.success {
        anyhow::bail!("Database {} was not locked", database_id);
    }
    println!("{} Locked {}", "✓".green(), database_id.cyan());
    Ok(())
}

pub async fn groups(config_path: Option<&Path>, database_id: &str) -> Result<()> {
    let api = connect(config_path)?;
    let request = GetGroupsRequest {
        database_id: database_id.to_string(),
    };
    let response = require(api.get_groups(&request).await)?;
    host_error(response.error)?;

    println!("{}", format!("Groups in {}", database_id).bold());
    for group in &response.groups {
        println!("  {} {}", group.title, group.node_id.dimmed());
    }
    Ok(())
}
