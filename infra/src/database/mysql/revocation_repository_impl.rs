//! MySQL implementation of the RevocationStore trait.
//!
//! Revoked token ids live in the `blacklist_jti` table:
//!
//! ```sql
//! CREATE TABLE blacklist_jti (
//!     jti        VARCHAR(64) NOT NULL PRIMARY KEY,
//!     account_id BIGINT      NOT NULL,
//!     expires_at DATETIME    NOT NULL,
//!     INDEX idx_blacklist_jti_expires_at (expires_at)
//! );
//! ```
//!
//! Rows are not removed when the token expires; `sweep_expired` deletes them.

use async_trait::async_trait;
use sqlx::MySqlPool;
use std::sync::Arc;

use ak_core::domain::clock::{Clock, SystemClock};
use ak_core::domain::entities::token::{short_token_id, RevocationEntry};
use ak_core::errors::TokenError;
use ak_core::repositories::RevocationStore;

/// Revocation store persisted in MySQL
pub struct MySqlRevocationStore {
    /// Database connection pool
    pool: MySqlPool,
    clock: Arc<dyn Clock>,
}

impl MySqlRevocationStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: MySqlPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn unavailable(action: &str, e: sqlx::Error) -> TokenError {
    tracing::error!("Failed to {}: {}", action, e);
    TokenError::store_unavailable(format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl RevocationStore for MySqlRevocationStore {
    async fn revoke(&self, entry: &RevocationEntry) -> Result<(), TokenError> {
        // Primary key on jti makes a repeated revoke a no-op
        let query = r#"
            INSERT IGNORE INTO blacklist_jti (jti, account_id, expires_at)
            VALUES (?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&entry.token_id)
            .bind(entry.account_id)
            .bind(entry.revoked_until)
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("record revocation", e))?;

        tracing::debug!(
            jti = %short_token_id(&entry.token_id),
            inserted = result.rows_affected(),
            "Revocation recorded in MySQL"
        );
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, TokenError> {
        let query = "SELECT COUNT(*) FROM blacklist_jti WHERE jti = ?";

        let count: i64 = sqlx::query_scalar(query)
            .bind(token_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unavailable("check revocation", e))?;

        Ok(count > 0)
    }

    async fn sweep_expired(&self) -> Result<u64, TokenError> {
        let query = "DELETE FROM blacklist_jti WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(self.clock.now())
            .execute(&self.pool)
            .await
            .map_err(|e| unavailable("sweep revocations", e))?;

        Ok(result.rows_affected())
    }

    fn backend_name(&self) -> &'static str {
        "mysql"
    }

    fn requires_sweep(&self) -> bool {
        true
    }
}
