//! Domain-specific error types for authentication and token handling
//!
//! Token failures split into two groups. Client errors are the result of what
//! the caller presented and always surface as a uniform authentication failure.
//! `StoreUnavailable` is a server-side failure of the revocation backend.

use thiserror::Error;

use crate::domain::entities::TokenType;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// Token subject no longer resolves to an active account
    #[error("Account not found")]
    AccountNotFound,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token missing")]
    MissingToken,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Wrong token type: expected {expected}, found {found}")]
    WrongTokenType { expected: TokenType, found: TokenType },

    #[error("Token revoked")]
    RevokedToken,

    #[error("Revocation store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Token signing failed")]
    SigningFailed,
}

impl TokenError {
    /// Whether the failure was caused by the presented token
    ///
    /// Client errors map to a uniform 401 and are logged at debug.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            TokenError::StoreUnavailable { .. } | TokenError::SigningFailed
        )
    }

    /// Stable code for server-side logs
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MissingToken => "missing_token",
            TokenError::MalformedToken => "malformed_token",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::ExpiredToken => "expired_token",
            TokenError::WrongTokenType { .. } => "wrong_token_type",
            TokenError::RevokedToken => "revoked_token",
            TokenError::StoreUnavailable { .. } => "store_unavailable",
            TokenError::SigningFailed => "signing_failed",
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        TokenError::StoreUnavailable {
            message: message.into(),
        }
    }
}
