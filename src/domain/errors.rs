//! Domain error types
//!
//! This module defines the error hierarchy for the migration store.
//! Errors never expose third-party types; HTTP and parser failures are
//! flattened into messages at the adapter boundary.

use thiserror::Error;

/// Main migration store error type
///
/// Every failure of `save`, `load` or store construction is reported through
/// this type. Nothing is retried after it is produced.
#[derive(Debug, Error)]
pub enum MigrationStoreError {
    /// Missing or invalid configuration (e.g. `COUCHDB_URL` not set)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// CouchDB did not answer within the readiness window
    #[error("CouchDB at {url} not reachable after {waited_ms}ms")]
    ConnectionTimeout {
        /// Endpoint with credentials removed
        url: String,
        /// Length of the wait window in milliseconds
        waited_ms: u64,
    },

    /// Listing, creating or deleting the migrations database failed
    #[error("Container error: {0}")]
    Container(String),

    /// The canonical document was modified concurrently (HTTP 409)
    #[error("Write conflict: {0}")]
    WriteConflict(String),

    /// Persisting the canonical document failed for any other reason
    #[error("Failed to write migration state: {0}")]
    StoreWrite(String),

    /// Reading the canonical document or its revision failed
    #[error("Failed to query migration state: {0}")]
    Query(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl MigrationStoreError {
    /// Whether the error came from the readiness gate
    pub fn is_connection_timeout(&self) -> bool {
        matches!(self, Self::ConnectionTimeout { .. })
    }

    /// Whether the error is a revision conflict on save
    pub fn is_write_conflict(&self) -> bool {
        matches!(self, Self::WriteConflict(_))
    }
}

impl From<std::io::Error> for MigrationStoreError {
    fn from(err: std::io::Error) -> Self {
        MigrationStoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MigrationStoreError {
    fn from(err: serde_json::Error) -> Self {
        MigrationStoreError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for MigrationStoreError {
    fn from(err: toml::de::Error) -> Self {
        MigrationStoreError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = MigrationStoreError::Configuration("COUCHDB_URL must be set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: COUCHDB_URL must be set"
        );
    }

    #[test]
    fn test_connection_timeout_display() {
        let err = MigrationStoreError::ConnectionTimeout {
            url: "http://localhost:5984/".to_string(),
            waited_ms: 500,
        };
        assert_eq!(
            err.to_string(),
            "CouchDB at http://localhost:5984/ not reachable after 500ms"
        );
        assert!(err.is_connection_timeout());
        assert!(!err.is_write_conflict());
    }

    #[test]
    fn test_write_conflict_predicate() {
        let err = MigrationStoreError::WriteConflict("Document update conflict.".to_string());
        assert!(err.is_write_conflict());
        assert!(!err.is_connection_timeout());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: MigrationStoreError = io_err.into();
        assert!(matches!(err, MigrationStoreError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: MigrationStoreError = json_err.into();
        assert!(matches!(err, MigrationStoreError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: MigrationStoreError = toml_err.into();
        assert!(matches!(err, MigrationStoreError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = MigrationStoreError::Query("boom".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
