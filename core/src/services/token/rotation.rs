//! Refresh flow: verify, revoke the presented token, issue a new pair.

use std::sync::Arc;

use ak_shared::config::StoreFailurePolicy;

use crate::domain::entities::token::{short_token_id, RevocationEntry, TokenPair, TokenType};
use crate::errors::TokenError;
use crate::repositories::RevocationStore;

use super::issuer::TokenIssuer;
use super::verifier::TokenVerifier;

/// Outcome of a successful refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationResult {
    /// Subject of the rotated token
    pub account_id: i64,
    /// Replacement access and refresh tokens
    pub tokens: TokenPair,
}

/// Runs the refresh state machine
///
/// A refresh token is ACTIVE until it is either rotated (revoked here on first
/// use) or expires. Presenting a rotated token again fails with
/// `RevokedToken` and is logged as possible reuse; other tokens of the same
/// account are left alone.
///
/// Two concurrent refreshes with the same token can both pass verification
/// before either revoke lands. Both then succeed, since revoke is idempotent.
/// Only the client that keeps using its new pair matters afterwards.
pub struct RotationCoordinator {
    verifier: Arc<TokenVerifier>,
    issuer: Arc<TokenIssuer>,
    store: Arc<dyn RevocationStore>,
    failure_policy: StoreFailurePolicy,
}

impl RotationCoordinator {
    pub fn new(
        verifier: Arc<TokenVerifier>,
        issuer: Arc<TokenIssuer>,
        store: Arc<dyn RevocationStore>,
        failure_policy: StoreFailurePolicy,
    ) -> Self {
        Self {
            verifier,
            issuer,
            store,
            failure_policy,
        }
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// Verification failures are returned unchanged. Under fail-closed, a
    /// store failure while revoking aborts before anything is issued.
    pub async fn refresh(&self, presented: &str) -> Result<RotationResult, TokenError> {
        let claims = match self.verifier.verify(presented, TokenType::Refresh).await {
            Ok(claims) => claims,
            Err(TokenError::RevokedToken) => {
                self.log_reuse(presented);
                return Err(TokenError::RevokedToken);
            }
            Err(e) => return Err(e),
        };

        let entry = RevocationEntry::from_claims(&claims, self.verifier.leeway_seconds())?;
        if let Err(e) = self.store.revoke(&entry).await {
            match self.failure_policy {
                StoreFailurePolicy::FailClosed => {
                    tracing::error!(
                        error = %e,
                        backend = self.store.backend_name(),
                        jti = %short_token_id(&entry.token_id),
                        "Failed to revoke rotated refresh token"
                    );
                    return Err(e);
                }
                StoreFailurePolicy::FailOpen => {
                    tracing::warn!(
                        error = %e,
                        backend = self.store.backend_name(),
                        jti = %short_token_id(&entry.token_id),
                        "Failed to revoke rotated refresh token, continuing"
                    );
                }
            }
        }

        let tokens = self.issuer.issue_token_pair(entry.account_id)?;

        tracing::info!(
            account_id = entry.account_id,
            rotated = %short_token_id(&entry.token_id),
            "Refresh token rotated"
        );

        Ok(RotationResult {
            account_id: entry.account_id,
            tokens,
        })
    }

    fn log_reuse(&self, presented: &str) {
        match self.reused_token_owner(presented) {
            Some((account_id, jti)) => tracing::warn!(
                account_id,
                jti = %jti,
                "Revoked refresh token presented, possible token reuse"
            ),
            None => tracing::warn!("Revoked refresh token presented, possible token reuse"),
        }
    }

    /// Account id and short jti of a token the verifier reported as revoked
    ///
    /// The verifier has already checked the signature; this decode only
    /// recovers the claims it discarded.
    pub(super) fn reused_token_owner(&self, presented: &str) -> Option<(i64, String)> {
        let claims = self.verifier.codec().decode(presented).ok()?;
        let account_id = claims.account_id().ok()?;
        Some((account_id, short_token_id(&claims.jti).to_string()))
    }
}
