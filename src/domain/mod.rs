//! Domain models and types for the migration store.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **State model** ([`MigrationState`], [`MigrationRecord`])
//! - **Error types** ([`MigrationStoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MigrationStoreError>`]:
//!
//! ```rust
//! use couchdb_migration_store::domain::{MigrationStoreError, Result};
//!
//! fn example() -> Result<()> {
//!     let json = r#"{"lastRun": "init", "migrations": []}"#;
//!     let _state: couchdb_migration_store::domain::MigrationState = serde_json::from_str(json)?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;
pub mod state;

pub use errors::MigrationStoreError;
pub use result::Result;
pub use state::{MigrationRecord, MigrationState};
