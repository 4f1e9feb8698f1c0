//! Configuration management for the migration store.
//!
//! Connection settings come from `COUCHDB_*` environment variables, read once
//! when the store is built. A TOML file can provide the same settings plus
//! logging options; environment variables override the file.
//!
//! # Environment Variables
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `COUCHDB_URL` | server URL, may embed credentials | required |
//! | `COUCHDB_WAIT_TIME` | readiness wait in ms | `10000` |
//! | `COUCHDB_MIGRATION_DB` | database name | `migrations` |
//! | `COUCHDB_ENSURE_POLICY` | `idempotent_create` or `recreate_on_save` | `idempotent_create` |
//! | `COUCHDB_LOAD_ERROR_POLICY` | `surface` or `swallow` | `surface` |
//! | `COUCHDB_REQUEST_TIMEOUT_SECONDS` | per-request timeout | `30` |
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [couchdb]
//! url = "${COUCHDB_URL}"
//! wait_time_ms = 10000
//! database = "migrations"
//! ensure_policy = "idempotent_create"
//! load_error_policy = "surface"
//!
//! [logging]
//! local_enabled = false
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_settings, parse_wait_time};
pub use schema::{
    ApplicationConfig, CouchDbConfig, EnsurePolicy, LoadErrorPolicy, LoggingConfig,
    MigrationStoreSettings, DEFAULT_WAIT_TIME_MS,
};
pub use secret::{secret_string, SecretString, SecretValue};
