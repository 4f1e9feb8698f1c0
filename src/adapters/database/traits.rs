//! Migration store abstraction
//!
//! This module defines the trait a storage backend implements to persist the
//! state of a migration runner.

use crate::domain::{MigrationState, Result};
use async_trait::async_trait;

/// Storage backend for migration state
///
/// A store holds exactly one state document. Neither operation takes a key:
/// `save` always replaces the single document and `load` always returns it.
#[async_trait]
pub trait MigrationStore: Send + Sync {
    /// Persist `state`, replacing any previously saved state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable, its storage cannot be
    /// prepared, or the write is rejected. A failed save leaves no partial
    /// document behind.
    async fn save(&self, state: &MigrationState) -> Result<()>;

    /// Load the most recently saved state
    ///
    /// # Returns
    ///
    /// `Ok(None)` when nothing was saved yet. Callers treat that as a fresh
    /// migration run, not as a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or the read fails.
    async fn load(&self) -> Result<Option<MigrationState>>;

    /// Load the saved state, or an empty state when nothing was saved yet
    ///
    /// # Errors
    ///
    /// Same as [`MigrationStore::load`].
    async fn load_or_default(&self) -> Result<MigrationState> {
        Ok(self.load().await?.unwrap_or_default())
    }
}
