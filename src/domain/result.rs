//! Result type alias for the migration store

use super::errors::MigrationStoreError;

/// Result type alias for migration store operations
///
/// # Examples
///
/// ```
/// use couchdb_migration_store::domain::result::Result;
/// use couchdb_migration_store::domain::errors::MigrationStoreError;
///
/// fn failing_function() -> Result<()> {
///     Err(MigrationStoreError::Configuration("missing url".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, MigrationStoreError>;
