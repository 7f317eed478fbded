//! Periodic removal of lapsed revocation entries
//!
//! Only stores that keep lapsed entries around (the relational backend) need
//! sweeping. Sweeping reclaims space; `is_revoked` stays correct without it.

use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::errors::TokenError;
use crate::repositories::RevocationStore;

/// Result of a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of entries deleted
    pub removed: u64,
    /// Backend that was swept
    pub backend: &'static str,
    /// Wall time spent, in milliseconds
    pub elapsed_ms: u128,
}

/// Background sweeper for a revocation store
pub struct RevocationSweeper {
    store: Arc<dyn RevocationStore>,
    interval_seconds: u64,
}

impl RevocationSweeper {
    pub fn new(store: Arc<dyn RevocationStore>, interval_seconds: u64) -> Self {
        Self {
            store,
            interval_seconds,
        }
    }

    /// Whether a background task would do anything
    pub fn is_enabled(&self) -> bool {
        self.interval_seconds > 0 && self.store.requires_sweep()
    }

    /// Run a single sweep
    pub async fn run_once(&self) -> Result<SweepResult, TokenError> {
        let started = Instant::now();
        let removed = self.store.sweep_expired().await?;
        let result = SweepResult {
            removed,
            backend: self.store.backend_name(),
            elapsed_ms: started.elapsed().as_millis(),
        };

        if removed > 0 {
            info!(
                removed,
                backend = result.backend,
                elapsed_ms = result.elapsed_ms as u64,
                "Swept lapsed revocation entries"
            );
        } else {
            debug!(backend = result.backend, "No lapsed revocation entries");
        }

        Ok(result)
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the store expires entries on its own or the
    /// interval is zero.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.is_enabled() {
            info!(
                backend = self.store.backend_name(),
                "Revocation sweeper not started"
            );
            return None;
        }

        let interval = std::time::Duration::from_secs(self.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                backend = self.store.backend_name(),
                interval_seconds = self.interval_seconds,
                "Revocation sweeper started"
            );

            let mut timer = tokio::time::interval(interval);
            loop {
                timer.tick().await;
                if let Err(e) = self.run_once().await {
                    error!(error = %e, "Revocation sweep failed");
                }
            }
        }))
    }
}
