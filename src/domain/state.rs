//! Migration state model
//!
//! The state is a single document: the identifier of the last migration run
//! and the ordered history of applied migrations.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One applied migration
///
/// Unknown fields are ignored on deserialization, so records read from a
/// runner's own bookkeeping are reduced to `title` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// Migration title as known to the runner
    pub title: String,

    /// When the migration was applied
    pub timestamp: String,
}

impl MigrationRecord {
    /// Create a record from a title and a timestamp
    pub fn new(title: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Create a record stamped with the current UTC time (RFC 3339)
    pub fn applied_now(title: impl Into<String>) -> Self {
        Self::new(
            title,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }
}

/// Persisted state of a migration runner
///
/// # Examples
///
/// ```
/// use couchdb_migration_store::domain::{MigrationRecord, MigrationState};
///
/// let state = MigrationState::new("2024-01-01")
///     .with_migration(MigrationRecord::new("init", "2024-01-01T00:00:00Z"));
///
/// assert_eq!(state.last_run, "2024-01-01");
/// assert_eq!(state.migrations.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationState {
    /// Identifier of the most recently executed migration
    #[serde(rename = "lastRun")]
    pub last_run: String,

    /// Applied migrations, in application order
    #[serde(default)]
    pub migrations: Vec<MigrationRecord>,
}

impl MigrationState {
    /// Create a state with an empty history
    pub fn new(last_run: impl Into<String>) -> Self {
        Self {
            last_run: last_run.into(),
            migrations: Vec::new(),
        }
    }

    /// Append a migration to the history
    pub fn with_migration(mut self, record: MigrationRecord) -> Self {
        self.migrations.push(record);
        self
    }

    /// Title of the latest applied migration, if any
    pub fn latest_migration(&self) -> Option<&MigrationRecord> {
        self.migrations.last()
    }
}
