//! Revocation store trait defining the denylist capability.

use async_trait::async_trait;

use crate::domain::entities::token::RevocationEntry;
use crate::errors::TokenError;

/// Denylist of token ids that must be treated as invalid before their natural expiry
///
/// Two backends satisfy the contract: a TTL-native cache where entries vanish
/// on their own, and a relational table that needs `sweep_expired` to reclaim
/// space. Both guarantee that `revoke` followed by `is_revoked` on the same id
/// returns `true`. Once an entry's `revoked_until` has passed, `is_revoked`
/// may return either answer; the verifier rejects such tokens as expired first.
///
/// # Disabled mode
///
/// `DisabledRevocationStore` accepts every `revoke` and answers `false` to
/// every `is_revoked`. Selecting it turns revocation off for the whole process:
/// logout and rotation no longer stop a refresh token from being reused until
/// it expires. This is an explicit configuration choice, not an error path.
///
/// # Concurrency
///
/// Implementations hold no in-process lock across backend I/O and rely on the
/// backend's own atomicity (`SETEX`, `INSERT IGNORE`). Two concurrent revokes
/// of the same id both succeed.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record that `entry.token_id` is revoked until `entry.revoked_until`
    ///
    /// Idempotent: revoking an already revoked id is a no-op.
    ///
    /// # Returns
    /// * `Ok(())` - Entry recorded, or already present
    /// * `Err(TokenError::StoreUnavailable)` - Backend unreachable
    async fn revoke(&self, entry: &RevocationEntry) -> Result<(), TokenError>;

    /// Whether `token_id` has been revoked
    ///
    /// # Returns
    /// * `Ok(false)` - Unknown id, or its revocation has lapsed
    /// * `Ok(true)` - Revoked
    /// * `Err(TokenError::StoreUnavailable)` - Backend unreachable
    async fn is_revoked(&self, token_id: &str) -> Result<bool, TokenError>;

    /// Delete entries whose token has expired anyway
    ///
    /// TTL-native backends reclaim space on their own and return 0.
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of entries removed
    async fn sweep_expired(&self) -> Result<u64, TokenError> {
        Ok(0)
    }

    /// Short backend name for log lines
    fn backend_name(&self) -> &'static str;

    /// Whether lapsed entries stay around until `sweep_expired` runs
    fn requires_sweep(&self) -> bool {
        false
    }
}
