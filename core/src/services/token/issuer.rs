//! Issuance of access and refresh tokens.

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::errors::TokenError;

use super::codec::ClaimsCodec;

/// Builds claim sets and signs them
///
/// Issuing never touches the revocation store.
pub struct TokenIssuer {
    codec: Arc<ClaimsCodec>,
    clock: Arc<dyn Clock>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(
        codec: Arc<ClaimsCodec>,
        clock: Arc<dyn Clock>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            codec,
            clock,
            access_ttl,
            refresh_ttl,
        }
    }

    fn build_claims(&self, account_id: i64, token_type: TokenType) -> Claims {
        let now = self.clock.now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        Claims {
            sub: account_id.to_string(),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn issue_access_token(&self, account_id: i64) -> Result<String, TokenError> {
        self.codec
            .encode(&self.build_claims(account_id, TokenType::Access))
    }

    pub fn issue_refresh_token(&self, account_id: i64) -> Result<String, TokenError> {
        self.codec
            .encode(&self.build_claims(account_id, TokenType::Refresh))
    }

    /// Access and refresh token for `account_id`, each with its own `jti`
    pub fn issue_token_pair(&self, account_id: i64) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(account_id)?,
            refresh_token: self.issue_refresh_token(account_id)?,
            access_expires_in: self.access_ttl.num_seconds(),
            refresh_expires_in: self.refresh_ttl.num_seconds(),
        })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}
