//! Entry creation and password generation commands

use super::{connect, host_error, require};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use strongbox_types::{CreateEntryRequest, GetNewEntryDefaultsRequest, PasswordAndStrength};

pub async fn generate_password(config_path: Option<&Path>, v2: bool) -> Result<()> {
    let api = connect(config_path)?;

    if v2 {
        let response = require(api.generate_password_v2().await)?;
        print_with_strength(&response.password);
        print_alternatives(&response.alternatives);
    } else {
        let response = require(api.generate_password().await)?;
        println!("{}", response.password);
        print_alternatives(&response.alternatives);
    }
    Ok(())
}

pub async fn new_entry_defaults(
    config_path: Option<&Path>,
    database_id: &str,
    v2: bool,
) -> Result<()> {
    let api = connect(config_path)?;
    let request = GetNewEntryDefaultsRequest {
        database_id: database_id.to_string(),
    };

    let (username, popular) = if v2 {
        let response = require(api.get_new_entry_defaults_v2(&request).await)?;
        host_error(response.error)?;
        if let Some(password) = &response.password {
            print_with_strength(password);
        }
        (response.username, response.most_popular_usernames)
    } else {
        let response = require(api.get_new_entry_defaults(&request).await)?;
        host_error(response.error)?;
        if let Some(password) = &response.password {
            println!("  password: {}", password);
        }
        (response.username, response.most_popular_usernames)
    };

    if let Some(username) = username {
        println!("  username: {}", username);
    }
    if let Some(popular) = popular.filter(|p| !p.is_empty()) {
        println!("  popular:  {}", popular.join(", ").dimmed());
    }
    Ok(())
}

pub struct NewEntry {
    pub database_id: String,
    pub group: Option<String>,
    pub title: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
}

pub async fn create(config_path: Option<&Path>, entry: NewEntry) -> Result<()> {
    let api = connect(config_path)?;
    let request = CreateEntryRequest {
        database_id: entry.database_id,
        group_id: entry.group,
        icon: None,
        title: entry.title,
        username: entry.username,
        password: entry.password,
        url: entry.url,
    };
    let response = require(api.create_entry(&request).await)?;
    host_error(response.error)?;
    println!(
        "{} Created entry {}",
        "✓".green(),
        response.uuid.unwrap_or_default().cyan()
    );
    Ok(())
}

fn print_with_strength(password: &PasswordAndStrength) {
    println!("{}", password.password);
    println!(
        "  {} ({:.1} bits, {})",
        password.strength.summary_string,
        password.strength.entropy,
        password.strength.category.dimmed()
    );
}

fn print_alternatives(alternatives: &[String]) {
    if alternatives.is_empty() {
        return;
    }
    println!("{}", "Alternatives:".cyan());
    for alternative in alternatives {
        println!("  {}", alternative);
    }
}
