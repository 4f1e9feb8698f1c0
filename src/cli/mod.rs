//! CLI interface and argument parsing

pub mod commands;

use crate::config::{ApplicationConfig, LoggingConfig, MigrationStoreSettings};
use crate::domain::MigrationStoreError;
use clap::{Parser, Subcommand};

/// Exit code for configuration errors
pub const EXIT_CONFIGURATION: i32 = 2;
/// Exit code when CouchDB cannot be reached
pub const EXIT_CONNECTION: i32 = 4;
/// Exit code for every other failure
pub const EXIT_FATAL: i32 = 5;

/// CouchDB migration state store
#[derive(Parser, Debug)]
#[command(name = "couchdb-migration-store")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Optional TOML configuration file; COUCHDB_* variables apply on top
    #[arg(short, long, env = "MIGRATION_STORE_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MIGRATION_STORE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the saved migration state
    Status(commands::status::StatusArgs),

    /// Save a migration state read from a JSON file
    Save(commands::save::SaveArgs),

    /// Validate configuration without contacting CouchDB
    ValidateConfig(commands::validate::ValidateArgs),
}

/// Pick the log level and logging settings for a run
///
/// `--log-level` wins over `application.log_level`. Without loadable
/// settings the CLI logs to the console only, so that the command itself can
/// report the configuration error.
pub fn logging_for(
    cli_level: Option<&str>,
    settings: Option<&MigrationStoreSettings>,
) -> (String, LoggingConfig) {
    match settings {
        Some(settings) => (
            cli_level
                .unwrap_or(settings.application.log_level.as_str())
                .to_string(),
            settings.logging.clone(),
        ),
        None => (
            cli_level
                .map(str::to_string)
                .unwrap_or_else(|| ApplicationConfig::default().log_level),
            LoggingConfig::default(),
        ),
    }
}

/// Map a store error onto the process exit code
pub fn exit_code_for(err: &MigrationStoreError) -> i32 {
    match err {
        MigrationStoreError::Configuration(_) => EXIT_CONFIGURATION,
        MigrationStoreError::ConnectionTimeout { .. } => EXIT_CONNECTION,
        _ => EXIT_FATAL,
    }
}
