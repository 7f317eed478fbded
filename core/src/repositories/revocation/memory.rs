//! In-process implementation of RevocationStore
//!
//! Behaves like the relational backend: entries stay until swept, but
//! `is_revoked` answers `false` for entries whose `revoked_until` has passed.
//! Used by tests and single-node development setups.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::token::RevocationEntry;
use crate::errors::TokenError;

use super::r#trait::RevocationStore;

/// Revocation store backed by a map of token id to expiry
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRevocationStore {
    /// Create a new store reading time from the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a new store reading time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of entries currently held, lapsed or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, entry: &RevocationEntry) -> Result<(), TokenError> {
        let mut entries = self.entries.write().await;
        // First write wins, like INSERT IGNORE
        entries
            .entry(entry.token_id.clone())
            .or_insert(entry.revoked_until);
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, TokenError> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(token_id)
            .map(|until| *until >= now)
            .unwrap_or(false))
    }

    async fn sweep_expired(&self) -> Result<u64, TokenError> {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, until| *until >= now);
        Ok((before - entries.len()) as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn requires_sweep(&self) -> bool {
        true
    }
}
