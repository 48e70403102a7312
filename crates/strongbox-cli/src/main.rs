//! Strongbox Bridge CLI
//!
//! Talks to the Strongbox password manager over its native-messaging host,
//! the same encrypted channel the browser extension uses.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use strongbox_types::WellKnownField;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "sbx")]
#[command(author, version, about = "Strongbox native-messaging bridge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to bridge.json in the bridge home)
    #[arg(long, global = true, env = "STRONGBOX_BRIDGE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show application status and databases
    Status,

    /// Ask the host to start Strongbox
    Launch,

    /// Look up credentials for a URL
    Credentials {
        url: String,

        /// Results to skip
        #[arg(long)]
        skip: Option<u32>,

        /// Results to fetch
        #[arg(long)]
        take: Option<u32>,
    },

    /// Search all unlocked databases
    Search {
        query: String,

        #[arg(long, default_value_t = 0)]
        skip: u32,

        /// Results to fetch (defaults to the configured page size)
        #[arg(long)]
        take: Option<u32>,
    },

    /// Copy an entry field to the clipboard
    Copy {
        database_id: String,
        node_id: String,

        /// username, password or totp
        field: WellKnownField,

        /// The TOTP code was asked for directly
        #[arg(long)]
        explicit_totp: bool,
    },

    /// Unlock a database
    Unlock { database_id: String },

    /// Lock a database
    Lock { database_id: String },

    /// List the groups of a database
    Groups { database_id: String },

    /// Generate a password
    #[command(name = "generate-password")]
    GeneratePassword {
        /// Include strength information
        #[arg(long)]
        v2: bool,
    },

    /// Show defaults for a new entry
    #[command(name = "new-entry-defaults")]
    NewEntryDefaults {
        database_id: String,

        /// Include password strength information
        #[arg(long)]
        v2: bool,
    },

    /// Fetch an entry icon
    Icon {
        database_id: String,
        node_id: String,
    },

    /// Create a new entry
    #[command(name = "create-entry")]
    CreateEntry {
        database_id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        url: Option<String>,

        /// Parent group node id
        #[arg(long)]
        group: Option<String>,
    },

    /// Manage bridge configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Diagnose host discovery and connectivity
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Use an explicit native host executable
    SetHost { path: PathBuf },
    /// Set the request timeout in milliseconds (0 disables it)
    SetTimeout { ms: u64 },
    /// Reset to default configuration
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "strongbox_cli=debug,strongbox_bridge=debug"
        } else {
            "strongbox_cli=info,strongbox_bridge=error"
        })
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    debug!("Starting Strongbox bridge CLI");

    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Status => commands::status::show(config).await,
        Commands::Launch => commands::status::launch(config).await,
        Commands::Credentials { url, skip, take } => {
            commands::credentials::for_url(config, &url, commands::credentials::Page { skip, take })
                .await
        }
        Commands::Search { query, skip, take } => {
            commands::credentials::search(config, &query, skip, take).await
        }
        Commands::Copy {
            database_id,
            node_id,
            field,
            explicit_totp,
        } => {
            commands::credentials::copy(config, &database_id, &node_id, field, explicit_totp).await
        }
        Commands::Unlock { database_id } => commands::database::unlock(config, &database_id).await,
        Commands::Lock { database_id } => commands::database::lock(config, &database_id).await,
        Commands::Groups { database_id } => commands::database::groups(config, &database_id).await,
        Commands::GeneratePassword { v2 } => commands::entry::generate_password(config, v2).await,
        Commands::NewEntryDefaults { database_id, v2 } => {
            commands::entry::new_entry_defaults(config, &database_id, v2).await
        }
        Commands::Icon {
            database_id,
            node_id,
        } => commands::credentials::icon(config, &database_id, &node_id).await,
        Commands::CreateEntry {
            database_id,
            title,
            username,
            password,
            url,
            group,
        } => {
            commands::entry::create(
                config,
                commands::entry::NewEntry {
                    database_id,
                    group,
                    title,
                    username,
                    password,
                    url,
                },
            )
            .await
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(config).await,
            ConfigAction::SetHost { path } => commands::config::set_host(config, path).await,
            ConfigAction::SetTimeout { ms } => commands::config::set_timeout(config, ms).await,
            ConfigAction::Reset => commands::config::reset(config).await,
        },
        Commands::Doctor => commands::doctor::execute(config).await,
    };

    if let Err(ref e) = result {
        error!("Command failed: {:#}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_copy_parses_field_name() {
        let cli = Cli::try_parse_from(["sbx", "copy", "db1", "e1", "totp", "--explicit-totp"])
            .unwrap();
        match cli.command {
            Commands::Copy {
                field,
                explicit_totp,
                ..
            } => {
                assert_eq!(field, WellKnownField::Totp);
                assert!(explicit_totp);
            }
            _ => panic!("expected copy"),
        }
    }

    #[test]
    fn test_search_take_defaults_to_config() {
        let cli = Cli::try_parse_from(["sbx", "search", "bank"]).unwrap();
        match cli.command {
            Commands::Search { skip, take, .. } => {
                assert_eq!(skip, 0);
                assert_eq!(take, None);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Cli::try_parse_from(["sbx", "copy", "db1", "e1", "notes"]).is_err());
    }
}
