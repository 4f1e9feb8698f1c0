//! Save command implementation
//!
//! This module implements the `save` command, which reads a migration state
//! from a JSON file and stores it.

use crate::adapters::database::{create_migration_store, MigrationStore};
use crate::cli::{exit_code_for, EXIT_CONFIGURATION};
use crate::config::load_settings;
use crate::domain::{MigrationState, MigrationStoreError, Result};
use clap::Args;
use std::path::Path;

/// Arguments for the save command
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// JSON file holding `{"lastRun": ..., "migrations": [...]}`
    #[arg(short, long)]
    pub file: String,
}

impl SaveArgs {
    /// Execute the save command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file, "Saving migration state");

        let state = match read_state(&self.file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("❌ Failed to read {}", self.file);
                eprintln!("   Error: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

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

        if let Err(e) = store.save(&state).await {
            eprintln!("❌ Failed to save migration state");
            eprintln!("   Error: {e}");
            return Ok(exit_code_for(&e));
        }

        println!(
            "✅ Saved migration state (last run: {}, {} migration(s))",
            state.last_run,
            state.migrations.len()
        );
        Ok(0)
    }
}

/// Read a migration state from a JSON file
pub fn read_state(path: impl AsRef<Path>) -> Result<MigrationState> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        MigrationStoreError::Io(format!("Failed to read {}: {e}", path.display()))
    })?;
    Ok(serde_json::from_str(&contents)?)
}
