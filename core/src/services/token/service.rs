//! Main token service implementation

use std::sync::Arc;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;

use super::codec::ClaimsCodec;
use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::logout::{LogoutHandler, LogoutOutcome};
use super::rotation::{RotationCoordinator, RotationResult};
use super::verifier::TokenVerifier;

/// Token lifecycle wired around one revocation store
///
/// Built once at startup and shared behind an `Arc`. Signing keys are
/// read-only after construction; the store is the only shared mutable state.
pub struct TokenService {
    issuer: Arc<TokenIssuer>,
    verifier: Arc<TokenVerifier>,
    rotation: RotationCoordinator,
    logout: LogoutHandler,
    store: Arc<dyn RevocationStore>,
}

impl TokenService {
    /// Creates a new token service reading time from the system clock
    ///
    /// # Arguments
    ///
    /// * `config` - Keys, lifetimes and store failure policy
    /// * `store` - Revocation store selected at startup
    pub fn new(
        config: TokenServiceConfig,
        store: Arc<dyn RevocationStore>,
    ) -> Result<Self, DomainError> {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    /// Creates a new token service reading time from `clock`
    pub fn with_clock(
        config: TokenServiceConfig,
        store: Arc<dyn RevocationStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let codec = Arc::new(ClaimsCodec::new(&config)?);
        let issuer = Arc::new(TokenIssuer::new(
            codec.clone(),
            clock.clone(),
            config.access_ttl(),
            config.refresh_ttl(),
        ));
        let verifier = Arc::new(TokenVerifier::new(
            codec.clone(),
            store.clone(),
            clock,
            config.leeway_seconds,
            config.failure_policy,
        ));
        let rotation = RotationCoordinator::new(
            verifier.clone(),
            issuer.clone(),
            store.clone(),
            config.failure_policy,
        );
        let logout = LogoutHandler::new(
            codec,
            store.clone(),
            config.leeway_seconds,
            config.failure_policy,
        );

        tracing::debug!(
            backend = store.backend_name(),
            failure_policy = ?config.failure_policy,
            leeway_seconds = config.leeway_seconds,
            "Token service initialized"
        );

        Ok(Self {
            issuer,
            verifier,
            rotation,
            logout,
            store,
        })
    }

    pub fn issue_token_pair(&self, account_id: i64) -> Result<TokenPair, TokenError> {
        self.issuer.issue_token_pair(account_id)
    }

    pub async fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        self.verifier.verify(token, expected).await
    }

    pub async fn verify_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verifier.verify(token, TokenType::Access).await
    }

    pub async fn verify_refresh_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verifier.verify(token, TokenType::Refresh).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<RotationResult, TokenError> {
        self.rotation.refresh(refresh_token).await
    }

    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<LogoutOutcome, TokenError> {
        self.logout.logout(refresh_token).await
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    #[cfg(test)]
    pub(super) fn rotation(&self) -> &RotationCoordinator {
        &self.rotation
    }

    pub fn store(&self) -> Arc<dyn RevocationStore> {
        self.store.clone()
    }

    /// Access token lifetime in seconds
    pub fn access_expires_in(&self) -> i64 {
        self.issuer.access_ttl().num_seconds()
    }

    /// Refresh token lifetime in seconds, used for the cookie max-age
    pub fn refresh_expires_in(&self) -> i64 {
        self.issuer.refresh_ttl().num_seconds()
    }
}
