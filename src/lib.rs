// couchdb-migration-store - CouchDB state store for migration runners
// Copyright (c) 2025 couchdb-migration-store contributors
// Licensed under the MIT License

//! # couchdb-migration-store
//!
//! A storage backend for database-migration runners that keeps the runner's
//! state (the last migration run and the history of applied migrations) in a
//! single CouchDB document.
//!
//! ## Architecture
//!
//! - [`adapters`] - the [`adapters::database::MigrationStore`] trait and its
//!   CouchDB implementation
//! - [`domain`] - state model and error types
//! - [`config`] - environment and TOML configuration
//! - [`logging`] - structured logging
//! - [`cli`] - command-line interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use couchdb_migration_store::adapters::couchdb::CouchDbMigrationStore;
//! use couchdb_migration_store::adapters::database::MigrationStore;
//! use couchdb_migration_store::domain::{MigrationRecord, MigrationState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads COUCHDB_URL and COUCHDB_WAIT_TIME
//!     let store = CouchDbMigrationStore::from_env()?;
//!
//!     let mut state = store.load_or_default().await?;
//!     state.migrations.push(MigrationRecord::applied_now("1700000000-add-users.js"));
//!     state.last_run = "1700000000-add-users.js".to_string();
//!
//!     store.save(&state).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Operation Sequence
//!
//! Each `save` and `load`:
//!
//! 1. Waits for CouchDB to answer (`COUCHDB_WAIT_TIME`, default 10s)
//! 2. Makes sure the migrations database exists
//! 3. Reads or replaces the state document (`_id` `"1"`)
//!
//! Saves attach the current `_rev`, so a concurrent update shows up as
//! [`domain::MigrationStoreError::WriteConflict`] instead of being
//! overwritten silently.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
