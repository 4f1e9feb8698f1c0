//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which loads and
//! validates configuration without contacting CouchDB.

use crate::adapters::couchdb::CouchDbMigrationStore;
use crate::cli::{exit_code_for, EXIT_CONFIGURATION};
use crate::config::load_settings;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!(config_path = ?config_path, "Validating configuration");

        match config_path {
            Some(path) => println!("🔍 Validating configuration file: {path}"),
            None => println!("🔍 Validating configuration from environment"),
        }
        println!();

        let settings = match load_settings(config_path) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

        let store = match CouchDbMigrationStore::new(settings.couchdb.clone()) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", settings.application.log_level);
        println!("  CouchDB Endpoint: {}", store.endpoint());
        println!("  Database: {}", store.database());
        println!("  Wait Time: {}ms", settings.couchdb.wait_time_ms);
        println!("  Ensure Policy: {:?}", settings.couchdb.ensure_policy);
        println!("  Load Error Policy: {:?}", settings.couchdb.load_error_policy);
        println!(
            "  File Logging: {}",
            if settings.logging.local_enabled {
                settings.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );

        Ok(0)
    }
}
