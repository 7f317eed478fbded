//! Redis-backed revocation store
//!
//! Each revoked token id becomes `<prefix><jti>` holding a sentinel value,
//! with a TTL equal to the seconds the token had left. Redis drops the key
//! when the token would have expired anyway, so no sweep is needed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use ak_core::domain::clock::{Clock, SystemClock};
use ak_core::domain::entities::token::{short_token_id, RevocationEntry};
use ak_core::errors::TokenError;
use ak_core::repositories::RevocationStore;

use super::redis_client::RedisClient;

/// Default key prefix for revoked token ids
pub const DEFAULT_KEY_PREFIX: &str = "blacklist:jti:";

const SENTINEL: &str = "1";

/// TTL-native revocation store
pub struct RedisRevocationStore {
    client: RedisClient,
    key_prefix: String,
    clock: Arc<dyn Clock>,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self::with_clock(client, key_prefix, Arc::new(SystemClock))
    }

    pub fn with_clock(client: RedisClient, key_prefix: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
            clock,
        }
    }

    pub fn key_for(&self, token_id: &str) -> String {
        revocation_key(&self.key_prefix, token_id)
    }
}

/// Redis key for a revoked token id
pub fn revocation_key(prefix: &str, token_id: &str) -> String {
    format!("{}{}", prefix, token_id)
}

/// Seconds the key should live, `None` once the entry has lapsed
///
/// One extra second keeps the key through `revoked_until` itself, the last
/// second the verifier still accepts the token.
pub fn key_ttl(entry: &RevocationEntry, now: DateTime<Utc>) -> Option<u64> {
    if entry.is_lapsed(now) {
        return None;
    }
    Some(entry.remaining_ttl_seconds(now) as u64 + 1)
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, entry: &RevocationEntry) -> Result<(), TokenError> {
        let Some(ttl) = key_ttl(entry, self.clock.now()) else {
            tracing::debug!(
                jti = %short_token_id(&entry.token_id),
                "Token already expired, skipping revocation write"
            );
            return Ok(());
        };

        self.client
            .set_with_expiry(&self.key_for(&entry.token_id), SENTINEL, ttl)
            .await?;

        tracing::debug!(
            jti = %short_token_id(&entry.token_id),
            ttl_seconds = ttl,
            "Revocation recorded in Redis"
        );
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, TokenError> {
        Ok(self.client.exists(&self.key_for(token_id)).await?)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
