//! Storage abstraction layer
//!
//! The [`MigrationStore`] trait is the seam a migration runner depends on;
//! [`create_migration_store`] builds the CouchDB implementation from
//! configuration.

pub mod factory;
pub mod traits;

pub use factory::create_migration_store;
pub use traits::MigrationStore;
