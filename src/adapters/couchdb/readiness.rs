//! Readiness gate
//!
//! Blocks until the CouchDB server answers a `HEAD /` with a 2xx status, or
//! the configured wait window closes.

use crate::adapters::couchdb::client::CouchDbClient;
use crate::domain::{MigrationStoreError, Result};
use std::time::Duration;
use tokio::time::Instant;

/// Delay between two probes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Polls the server until it is reachable
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    wait: Duration,
    interval: Duration,
}

impl ReadinessGate {
    /// Gate with a wait window of `wait_ms` milliseconds
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait: Duration::from_millis(wait_ms),
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the delay between probes
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Length of the wait window
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Wait until `client` reaches its server
    ///
    /// At least one probe is always sent. No probe outlives the window.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationStoreError::ConnectionTimeout`] when the window
    /// closes without a successful probe.
    pub async fn wait_until_ready(&self, client: &CouchDbClient) -> Result<()> {
        let started = Instant::now();
        let deadline = started + self.wait;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            let probe_timeout = remaining.max(Duration::from_millis(1));

            if client.probe(probe_timeout).await {
                tracing::debug!(
                    endpoint = %client.endpoint(),
                    attempts = attempts,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "CouchDB is ready"
                );
                return Ok(());
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(
                    endpoint = %client.endpoint(),
                    attempts = attempts,
                    wait_ms = self.wait.as_millis() as u64,
                    "Gave up waiting for CouchDB"
                );
                return Err(MigrationStoreError::ConnectionTimeout {
                    url: client.endpoint().to_string(),
                    waited_ms: self.wait.as_millis() as u64,
                });
            }

            tokio::time::sleep(self.interval.min(remaining)).await;
        }
    }
}
