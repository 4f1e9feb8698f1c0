// couchdb-migration-store - CouchDB state store for migration runners
// Copyright (c) 2025 couchdb-migration-store contributors
// Licensed under the MIT License

use clap::Parser;
use couchdb_migration_store::cli::{logging_for, Cli, Commands, EXIT_CONFIGURATION, EXIT_FATAL};
use couchdb_migration_store::config::load_settings;
use couchdb_migration_store::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Optional .env file with COUCHDB_* variables
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Errors surface again from the command itself
    let settings = load_settings(cli.config.as_deref()).ok();
    let (log_level, logging_config) = logging_for(cli.log_level.as_deref(), settings.as_ref());
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_CONFIGURATION);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "couchdb-migration-store"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Status(args) => args.execute(config).await,
        Commands::Save(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(config).await,
    }
}
