//! Verification of presented tokens.

use std::sync::Arc;

use ak_shared::config::StoreFailurePolicy;

use crate::domain::clock::Clock;
use crate::domain::entities::token::{short_token_id, Claims, TokenType};
use crate::errors::TokenError;
use crate::repositories::RevocationStore;

use super::codec::ClaimsCodec;

/// Checks signature, expiry, declared type and, for refresh tokens, revocation
///
/// Access tokens are never looked up in the revocation store. They are not
/// individually revocable; their short lifetime bounds exposure and keeps the
/// per-request path free of store I/O.
pub struct TokenVerifier {
    codec: Arc<ClaimsCodec>,
    store: Arc<dyn RevocationStore>,
    clock: Arc<dyn Clock>,
    leeway_seconds: i64,
    failure_policy: StoreFailurePolicy,
}

impl TokenVerifier {
    pub fn new(
        codec: Arc<ClaimsCodec>,
        store: Arc<dyn RevocationStore>,
        clock: Arc<dyn Clock>,
        leeway_seconds: i64,
        failure_policy: StoreFailurePolicy,
    ) -> Self {
        Self {
            codec,
            store,
            clock,
            leeway_seconds: leeway_seconds.max(0),
            failure_policy,
        }
    }

    /// Verify `token` as a token of type `expected`
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Token is valid
    /// * `Err(TokenError)` - First failing check, in order: structure and
    ///   signature, expiry, type, revocation
    pub async fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::MissingToken);
        }

        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(self.clock.timestamp(), self.leeway_seconds) {
            return Err(TokenError::ExpiredToken);
        }

        if claims.token_type != expected {
            return Err(TokenError::WrongTokenType {
                expected,
                found: claims.token_type,
            });
        }

        if expected == TokenType::Refresh && self.is_revoked(&claims.jti).await? {
            return Err(TokenError::RevokedToken);
        }

        Ok(claims)
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, TokenError> {
        match self.store.is_revoked(token_id).await {
            Ok(revoked) => Ok(revoked),
            Err(e) => match self.failure_policy {
                StoreFailurePolicy::FailClosed => {
                    tracing::error!(
                        error = %e,
                        backend = self.store.backend_name(),
                        jti = %short_token_id(token_id),
                        "Revocation lookup failed, rejecting token"
                    );
                    Err(e)
                }
                StoreFailurePolicy::FailOpen => {
                    tracing::warn!(
                        error = %e,
                        backend = self.store.backend_name(),
                        jti = %short_token_id(token_id),
                        "Revocation lookup failed, treating token as not revoked"
                    );
                    Ok(false)
                }
            },
        }
    }

    /// Seconds of clock skew tolerated past `exp`
    pub fn leeway_seconds(&self) -> i64 {
        self.leeway_seconds
    }

    pub fn codec(&self) -> &ClaimsCodec {
        &self.codec
    }
}
