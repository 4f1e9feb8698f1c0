//! Migration store factory
//!
//! Builds the configured store behind the [`MigrationStore`] trait object.

use crate::adapters::couchdb::CouchDbMigrationStore;
use crate::adapters::database::traits::MigrationStore;
use crate::config::CouchDbConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create a migration store from the CouchDB configuration
///
/// # Errors
///
/// Returns a configuration error if the configuration is invalid. No network
/// access happens here; the readiness gate runs on the first operation.
pub fn create_migration_store(
    config: &CouchDbConfig,
) -> Result<Arc<dyn MigrationStore + Send + Sync>> {
    tracing::info!(database = %config.database, "Creating CouchDB migration store");
    let store = CouchDbMigrationStore::new(config.clone())?;
    tracing::debug!(endpoint = %store.endpoint(), "CouchDB migration store created");

    Ok(Arc::new(store) as Arc<dyn MigrationStore + Send + Sync>)
}
