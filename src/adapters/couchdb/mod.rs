//! CouchDB integration
//!
//! This module provides the CouchDB-backed migration store.
//!
//! - [`client`] - typed HTTP calls against the CouchDB API
//! - [`readiness`] - readiness gate polled before every operation
//! - [`models`] - wire shapes, including the canonical state document
//! - [`adapter`] - [`CouchDbMigrationStore`], the `MigrationStore` implementation

pub mod adapter;
pub mod client;
pub mod models;
pub mod readiness;

pub use adapter::CouchDbMigrationStore;
pub use client::CouchDbClient;
pub use models::{StoredDocument, STATE_DOCUMENT_ID};
pub use readiness::ReadinessGate;
