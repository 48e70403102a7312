//! Credential lookup commands

use super::{connect, require};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use strongbox_types::{AutoFillCredential, WellKnownField};

pub struct Page {
    pub skip: Option<u32>,
    pub take: Option<u32>,
}

pub async fn for_url(config_path: Option<&Path>, url: &str, page: Page) -> Result<()> {
    let api = connect(config_path)?;

    let response = match (page.skip, page.take) {
        (None, None) => api.credentials_for_url(url).await,
        (skip, take) => {
            let take = take.unwrap_or(api.page_size());
            api.credentials_for_url_page(url, skip.unwrap_or(0), take)
                .await
        }
    };
    let response = require(response)?;

    println!(
        "{} credential(s) for {} across {} unlocked database(s)",
        response.results.len(),
        url.cyan(),
        response.unlocked_database_count
    );
    print_credentials(&response.results);
    Ok(())
}

pub async fn search(
    config_path: Option<&Path>,
    query: &str,
    skip: u32,
    take: Option<u32>,
) -> Result<()> {
    let api = connect(config_path)?;
    let take = take.unwrap_or(api.page_size());
    let response = require(api.search(query, skip, take).await)?;

    println!("{} result(s) for {:?}", response.results.len(), query);
    print_credentials(&response.results);
    Ok(())
}

pub async fn copy(
    config_path: Option<&Path>,
    database_id: &str,
    node_id: &str,
    field: WellKnownField,
    explicit_totp: bool,
) -> Result<()> {
    let api = connect(config_path)?;
    let response = require(
        api.copy_field(database_id, node_id, field, explicit_totp)
            .await,
    )?;

    if response.success {
        println!("{} Copied {} to clipboard", "✓".green(), field);
        Ok(())
    } else {
        anyhow::bail!("Strongbox declined to copy {}", field)
    }
}

pub async fn icon(config_path: Option<&Path>, database_id: &str, node_id: &str) -> Result<()> {
    let api = connect(config_path)?;
    let response = require(api.get_icon(database_id, node_id).await)?;

    if response.icon.is_empty() {
        println!("{}", "No icon".dimmed());
    } else {
        println!("{}", response.icon);
    }
    Ok(())
}

/// Secrets stay out of the terminal; only whether they exist is shown
fn print_credentials(credentials: &[AutoFillCredential]) {
    for credential in credentials {
        let title = if credential.title.is_empty() {
            "(untitled)"
        } else {
            credential.title.as_str()
        };
        println!();
        println!("  {} {}", "•".cyan(), title.bold());
        println!("      user:     {}", credential.username);
        if !credential.url.is_empty() {
            println!("      url:      {}", credential.url);
        }
        println!(
            "      database: {} {}",
            credential.database_name,
            credential.database_id.dimmed()
        );
        println!("      node:     {}", credential.uuid.dimmed());
        if credential.has_totp() {
            println!("      {}", "has TOTP".yellow());
        }
    }
}
