//! Status command implementation
//!
//! This module implements the `status` command, which loads the saved
//! migration state and prints it.

use crate::adapters::database::{create_migration_store, MigrationStore};
use crate::cli::{exit_code_for, EXIT_CONFIGURATION};
use crate::config::load_settings;
use crate::domain::MigrationState;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the state as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Checking migration status");

        let settings = match load_settings(config_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("❌ Failed to load configuration");
                eprintln!("   Error: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

        let store = match create_migration_store(&settings.couchdb) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("❌ Failed to create migration store");
                eprintln!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let state = match store.load().await {
            Ok(s) => s,
            Err(e) => {
                eprintln!("❌ Failed to load migration state");
                eprintln!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", state_json(state.as_ref())?);
            return Ok(0);
        }

        let Some(state) = state else {
            println!("No migration state found.");
            println!("The next migration run starts from scratch.");
            return Ok(0);
        };

        println!("📊 Migration Status");
        println!();
        println!("Last run: {}", state.last_run);
        println!("Applied migrations: {}", state.migrations.len());

        if !state.migrations.is_empty() {
            println!();
            println!("{:<50} {:<30}", "Title", "Timestamp");
            println!("{}", "-".repeat(80));
            for migration in &state.migrations {
                println!("{:<50} {:<30}", migration.title, migration.timestamp);
            }
        }

        println!();
        Ok(0)
    }
}

/// Render the saved state as JSON; `null` when nothing was saved yet
fn state_json(state: Option<&MigrationState>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&state)
}
