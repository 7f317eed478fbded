//! Configuration for the token service

use ak_shared::config::{JwtConfig, RevocationConfig, StoreFailurePolicy};
use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::domain::entities::token::TokenType;
use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret signing access tokens
    pub access_secret: String,
    /// Secret signing refresh tokens
    pub refresh_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
    /// Clock-skew tolerance for expiry checks, in seconds
    pub leeway_seconds: i64,
    /// What to do when the revocation store cannot be reached
    pub failure_policy: StoreFailurePolicy,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            access_secret: jwt.access_secret.clone(),
            refresh_secret: jwt.refresh_secret().to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry_minutes: jwt.access_token_expiry_minutes,
            refresh_token_expiry_days: jwt.refresh_token_expiry_days,
            leeway_seconds: jwt.leeway_seconds,
            failure_policy: StoreFailurePolicy::default(),
        }
    }
}

impl TokenServiceConfig {
    /// Single secret for both token types, default lifetimes
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        Self {
            access_secret: secret.clone(),
            refresh_secret: secret,
            ..Default::default()
        }
    }

    /// Build from the loaded application settings
    ///
    /// Fails when the configured algorithm is not an HMAC algorithm.
    pub fn from_settings(jwt: &JwtConfig, revocation: &RevocationConfig) -> Result<Self, DomainError> {
        let algorithm = parse_hmac_algorithm(&jwt.algorithm)?;
        Ok(Self {
            access_secret: jwt.access_secret.clone(),
            refresh_secret: jwt.refresh_secret().to_string(),
            algorithm,
            access_token_expiry_minutes: jwt.access_token_expiry_minutes,
            refresh_token_expiry_days: jwt.refresh_token_expiry_days,
            leeway_seconds: jwt.leeway_seconds.max(0),
            failure_policy: revocation.failure_policy,
        })
    }

    pub fn with_refresh_secret(mut self, secret: impl Into<String>) -> Self {
        self.refresh_secret = secret.into();
        self
    }

    pub fn with_leeway_seconds(mut self, seconds: i64) -> Self {
        self.leeway_seconds = seconds.max(0);
        self
    }

    pub fn with_failure_policy(mut self, policy: StoreFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Secret for the given token type
    pub fn secret_for(&self, token_type: TokenType) -> &str {
        match token_type {
            TokenType::Access => &self.access_secret,
            TokenType::Refresh => &self.refresh_secret,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_minutes)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }
}

fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, DomainError> {
    match name.to_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(DomainError::Validation {
            message: format!("Unsupported JWT algorithm: {}", other),
        }),
    }
}
