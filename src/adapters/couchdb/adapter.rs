//! CouchDB implementation of [`MigrationStore`]
//!
//! Every operation runs the same sequence: wait for the server, make sure the
//! migrations database exists, then perform one document read or write.

use crate::adapters::couchdb::client::CouchDbClient;
use crate::adapters::couchdb::models::{StoredDocument, STATE_DOCUMENT_ID};
use crate::adapters::couchdb::readiness::ReadinessGate;
use crate::adapters::database::traits::MigrationStore;
use crate::config::{CouchDbConfig, EnsurePolicy, LoadErrorPolicy};
use crate::domain::{MigrationState, MigrationStoreError, Result};
use async_trait::async_trait;

/// Migration store backed by a CouchDB database
///
/// # Example
///
/// ```no_run
/// use couchdb_migration_store::adapters::couchdb::CouchDbMigrationStore;
/// use couchdb_migration_store::adapters::database::MigrationStore;
/// use couchdb_migration_store::domain::{MigrationRecord, MigrationState};
///
/// # async fn example() -> couchdb_migration_store::domain::Result<()> {
/// let store = CouchDbMigrationStore::from_env()?;
///
/// let state = MigrationState::new("1700000000-init.js")
///     .with_migration(MigrationRecord::applied_now("1700000000-init.js"));
/// store.save(&state).await?;
///
/// let loaded = store.load().await?;
/// assert_eq!(loaded, Some(state));
/// # Ok(())
/// # }
/// ```
pub struct CouchDbMigrationStore {
    client: CouchDbClient,
    gate: ReadinessGate,
    database: String,
    ensure_policy: EnsurePolicy,
    load_error_policy: LoadErrorPolicy,
}

impl CouchDbMigrationStore {
    /// Create a store from configuration
    ///
    /// # Errors
    ///
    /// Returns [`MigrationStoreError::Configuration`] if the configuration is
    /// invalid, most notably when no URL is set. Nothing is sent over the
    /// network. A zero wait window is replaced by the default.
    pub fn new(mut config: CouchDbConfig) -> Result<Self> {
        config.normalize();
        config
            .validate()
            .map_err(MigrationStoreError::Configuration)?;

        let client = CouchDbClient::new(&config)?;

        if config.ensure_policy == EnsurePolicy::RecreateOnSave {
            tracing::warn!(
                database = %config.database,
                "recreate_on_save drops the database on every save; concurrent writers will lose data"
            );
        }

        Ok(Self {
            client,
            gate: ReadinessGate::new(config.wait_time_ms),
            database: config.database,
            ensure_policy: config.ensure_policy,
            load_error_policy: config.load_error_policy,
        })
    }

    /// Create a store from `COUCHDB_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns [`MigrationStoreError::Configuration`] if `COUCHDB_URL` is not
    /// set or another variable is invalid.
    pub fn from_env() -> Result<Self> {
        Self::new(CouchDbConfig::from_env()?)
    }

    /// Replace the readiness gate (e.g. to shorten the poll interval)
    pub fn with_gate(mut self, gate: ReadinessGate) -> Self {
        self.gate = gate;
        self
    }

    /// Name of the migrations database
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Server URL without credentials
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Block until the server is reachable or the wait window closes
    ///
    /// # Errors
    ///
    /// Returns [`MigrationStoreError::ConnectionTimeout`] on timeout.
    pub async fn wait_until_ready(&self) -> Result<()> {
        self.gate.wait_until_ready(&self.client).await
    }

    /// Create the migrations database if it does not exist
    ///
    /// Safe to call repeatedly and from several processes: existing data is
    /// never touched, and losing a creation race is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationStoreError::Container`] if listing or creating the
    /// database fails.
    pub async fn ensure_database(&self) -> Result<()> {
        let databases = self.client.list_databases().await?;
        if databases.iter().any(|db| db == &self.database) {
            tracing::debug!(database = %self.database, "Database already exists");
            return Ok(());
        }

        tracing::info!(database = %self.database, "Creating database");
        if self.client.create_database(&self.database).await? {
            tracing::info!(database = %self.database, "Database created successfully");
        } else {
            tracing::debug!(database = %self.database, "Database was created concurrently");
        }

        Ok(())
    }

    /// Drop the migrations database (if any) and create it empty
    async fn recreate_database(&self) -> Result<()> {
        tracing::warn!(database = %self.database, "Recreating database; all documents are dropped");

        if !self.client.delete_database(&self.database).await? {
            tracing::debug!(database = %self.database, "No database to drop");
        }

        // A concurrent saver may recreate it between our delete and create.
        self.client.create_database(&self.database).await?;
        Ok(())
    }

    async fn prepare_for_save(&self) -> Result<Option<String>> {
        match self.ensure_policy {
            EnsurePolicy::IdempotentCreate => {
                self.ensure_database().await?;
                self.client
                    .get_revision(&self.database, STATE_DOCUMENT_ID)
                    .await
            }
            EnsurePolicy::RecreateOnSave => {
                self.recreate_database().await?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl MigrationStore for CouchDbMigrationStore {
    async fn save(&self, state: &MigrationState) -> Result<()> {
        tracing::debug!(
            database = %self.database,
            last_run = %state.last_run,
            migrations_count = state.migrations.len(),
            "Saving migration state"
        );

        self.wait_until_ready().await?;
        let rev = self.prepare_for_save().await?;

        let document = StoredDocument::from_state(state).with_rev(rev.clone());
        let new_rev = self.client.put_document(&self.database, &document).await?;

        tracing::info!(
            database = %self.database,
            previous_rev = rev.as_deref().unwrap_or("none"),
            rev = %new_rev,
            migrations_count = document.migrations.len(),
            "Migration state saved"
        );

        Ok(())
    }

    async fn load(&self) -> Result<Option<MigrationState>> {
        tracing::debug!(database = %self.database, "Loading migration state");

        self.wait_until_ready().await?;
        self.ensure_database().await?;

        match self.client.find_one::<StoredDocument>(&self.database).await {
            Ok(Some(document)) => {
                tracing::debug!(
                    database = %self.database,
                    last_run = %document.last_run,
                    migrations_count = document.migrations.len(),
                    "Migration state loaded"
                );
                Ok(Some(document.into_state()))
            }
            Ok(None) => {
                tracing::debug!(database = %self.database, "No migration state found (first run)");
                Ok(None)
            }
            Err(e) => match self.load_error_policy {
                LoadErrorPolicy::Surface => Err(e),
                LoadErrorPolicy::Swallow => {
                    tracing::warn!(
                        database = %self.database,
                        error = %e,
                        "Ignoring migration state query failure"
                    );
                    Ok(None)
                }
            },
        }
    }
}
