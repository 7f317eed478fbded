//! Maps domain errors onto HTTP responses
//!
//! Every client-side authentication failure becomes the same 401 body so a
//! caller cannot tell an expired token from a revoked or forged one. The
//! specific kind is logged at debug level instead.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use ak_core::errors::{AuthError, DomainError, TokenError};
use ak_shared::errors::{error_codes, ErrorResponse};

/// Error type returned by route handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid request: {0}")]
    Validation(#[from] ValidationErrors),
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Domain(DomainError::Token(err))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => domain_status(err),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(err) => handle_domain_error(err),
            ApiError::Validation(errors) => {
                tracing::debug!("Request validation failed: {}", errors);
                HttpResponse::BadRequest().json(ErrorResponse::new(
                    error_codes::VALIDATION_ERROR,
                    validation_message(errors),
                ))
            }
        }
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Token(token_err) => token_status(token_err),
        DomainError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::EmailAlreadyRegistered) => StatusCode::CONFLICT,
        DomainError::Auth(AuthError::AccountNotFound) => StatusCode::NOT_FOUND,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn token_status(err: &TokenError) -> StatusCode {
    match err {
        TokenError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        TokenError::SigningFailed => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNAUTHORIZED,
    }
}

/// Convert a domain error into an HTTP response
pub fn handle_domain_error(err: &DomainError) -> HttpResponse {
    match err {
        DomainError::Token(token_err) => handle_token_error(token_err),
        DomainError::Auth(AuthError::InvalidCredentials) => {
            tracing::debug!("Login rejected: invalid credentials");
            HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
        }
        DomainError::Auth(AuthError::EmailAlreadyRegistered) => HttpResponse::Conflict()
            .json(ErrorResponse::new(error_codes::CONFLICT, "Email already registered")),
        DomainError::Auth(AuthError::AccountNotFound) => HttpResponse::NotFound()
            .json(ErrorResponse::new(error_codes::NOT_FOUND, "Account not found")),
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())),
        DomainError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            internal_error()
        }
    }
}

/// Convert a token error into an HTTP response
pub fn handle_token_error(err: &TokenError) -> HttpResponse {
    match err {
        TokenError::StoreUnavailable { message } => {
            tracing::error!("Revocation store unavailable: {}", message);
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable",
            ))
        }
        TokenError::SigningFailed => {
            tracing::error!("Token signing failed");
            internal_error()
        }
        other => {
            tracing::debug!(reason = other.code(), "Token rejected");
            HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
        }
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}

fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();
    format!("Invalid fields: {}", fields.join(", "))
}
