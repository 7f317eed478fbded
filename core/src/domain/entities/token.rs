//! Token entities for JWT-based authentication.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TokenError;

/// Kind of credential a token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential presented on every request
    Access,
    /// Long-lived credential used only to obtain new access tokens
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenType::Access),
            "refresh" => Ok(TokenType::Refresh),
            _ => Err(TokenError::MalformedToken),
        }
    }
}

/// Claims structure for JWT payload
///
/// Fixed shape: every field is required, and decoding a token that lacks
/// one of them fails instead of producing a partially filled record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id, string-encoded integer)
    pub sub: String,

    /// Token type
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID, the revocation key
    pub jti: String,
}

impl Claims {
    /// Gets the account id from the subject
    ///
    /// # Returns
    ///
    /// `Ok(i64)` if the subject is an integer, `TokenError::MalformedToken` otherwise
    pub fn account_id(&self) -> Result<i64, TokenError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| TokenError::MalformedToken)
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether the claims have expired at `now`, tolerating `leeway_seconds` of skew
    pub fn is_expired_at(&self, now: i64, leeway_seconds: i64) -> bool {
        self.exp.saturating_add(leeway_seconds) < now
    }

    /// Seconds of validity left at `now`, never negative
    pub fn remaining_seconds(&self, now: i64) -> i64 {
        (self.exp - now).max(0)
    }
}

/// Access and refresh tokens issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

/// Denylist record: the token with `token_id` is revoked until `revoked_until`
///
/// `revoked_until` is the revoked token's expiry plus the verifier's expiry
/// leeway: the last instant at which the token could still pass verification.
/// An entry never outlives the token it blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// `jti` of the revoked token
    pub token_id: String,

    /// Account the token was issued to
    pub account_id: i64,

    /// Last instant the revoked token could still verify
    pub revoked_until: DateTime<Utc>,
}

impl RevocationEntry {
    pub fn new(token_id: impl Into<String>, account_id: i64, revoked_until: DateTime<Utc>) -> Self {
        Self {
            token_id: token_id.into(),
            account_id,
            revoked_until,
        }
    }

    /// Builds the entry for a decoded token
    ///
    /// `leeway_seconds` must match the leeway the verifier applies to `exp`,
    /// otherwise the token verifies again once the entry lapses.
    pub fn from_claims(claims: &Claims, leeway_seconds: i64) -> Result<Self, TokenError> {
        let expires_at = claims.expires_at();
        let revoked_until = expires_at
            .checked_add_signed(chrono::Duration::seconds(leeway_seconds.max(0)))
            .unwrap_or(expires_at);
        Ok(Self::new(claims.jti.clone(), claims.account_id()?, revoked_until))
    }

    /// Seconds until the entry becomes garbage, clamped to zero
    pub fn remaining_ttl_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.revoked_until - now).num_seconds().max(0)
    }

    /// Whether the revoked token would have expired on its own by `now`
    pub fn is_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.revoked_until < now
    }
}

/// Shortened token id for log lines
pub fn short_token_id(token_id: &str) -> &str {
    let end = token_id
        .char_indices()
        .nth(8)
        .map(|(idx, _)| idx)
        .unwrap_or(token_id.len());
    &token_id[..end]
}
