//! Logout: revoke the refresh token presented by the client.

use std::sync::Arc;

use ak_shared::config::StoreFailurePolicy;

use crate::domain::entities::token::{short_token_id, RevocationEntry};
use crate::errors::TokenError;
use crate::repositories::RevocationStore;

use super::codec::ClaimsCodec;

/// What logout did with the presented token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Nothing to revoke
    NoTokenPresented,
    /// Token id written to the revocation store
    Revoked { account_id: i64 },
    /// Store failed under fail-open; the token stays usable until expiry
    RevocationSkipped { account_id: i64 },
}

/// Revokes the refresh token presented at logout
///
/// The signature is checked so that forged tokens cannot plant entries in the
/// store, but expiry, type and prior revocation are not: logging out with a
/// token that is already unusable is harmless and succeeds.
pub struct LogoutHandler {
    codec: Arc<ClaimsCodec>,
    store: Arc<dyn RevocationStore>,
    leeway_seconds: i64,
    failure_policy: StoreFailurePolicy,
}

impl LogoutHandler {
    pub fn new(
        codec: Arc<ClaimsCodec>,
        store: Arc<dyn RevocationStore>,
        leeway_seconds: i64,
        failure_policy: StoreFailurePolicy,
    ) -> Self {
        Self {
            codec,
            store,
            leeway_seconds: leeway_seconds.max(0),
            failure_policy,
        }
    }

    /// # Returns
    ///
    /// * `Ok(LogoutOutcome)` - Logout completed from the caller's perspective
    /// * `Err(TokenError::MalformedToken)` - Token present but not decodable
    /// * `Err(TokenError::StoreUnavailable)` - Store failed under fail-closed
    pub async fn logout(&self, presented: Option<&str>) -> Result<LogoutOutcome, TokenError> {
        let token = match presented.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(LogoutOutcome::NoTokenPresented),
        };

        let claims = self
            .codec
            .decode(token)
            .map_err(|_| TokenError::MalformedToken)?;
        let entry = RevocationEntry::from_claims(&claims, self.leeway_seconds)?;

        match self.store.revoke(&entry).await {
            Ok(()) => {
                tracing::info!(
                    account_id = entry.account_id,
                    jti = %short_token_id(&entry.token_id),
                    "Refresh token revoked at logout"
                );
                Ok(LogoutOutcome::Revoked {
                    account_id: entry.account_id,
                })
            }
            Err(e) => match self.failure_policy {
                StoreFailurePolicy::FailClosed => {
                    tracing::error!(
                        error = %e,
                        backend = self.store.backend_name(),
                        "Failed to revoke refresh token at logout"
                    );
                    Err(e)
                }
                StoreFailurePolicy::FailOpen => {
                    tracing::warn!(
                        error = %e,
                        backend = self.store.backend_name(),
                        "Failed to revoke refresh token at logout, continuing"
                    );
                    Ok(LogoutOutcome::RevocationSkipped {
                        account_id: entry.account_id,
                    })
                }
            },
        }
    }
}
