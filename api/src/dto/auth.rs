//! Request and response bodies for the auth endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use ak_core::domain::entities::account::Account;
use ak_core::domain::entities::token::TokenPair;

/// Request for POST /api/v1/auth/signup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
}

/// Request for POST /api/v1/auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
}

/// Optional body for refresh and logout
///
/// Browser clients send the refresh token as a cookie and leave this empty;
/// other clients may put it here instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Access token handed back to the client
///
/// The refresh token itself travels in the cookie. `refresh_token` is only
/// populated for clients that asked for it in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    pub fn from_pair(tokens: &TokenPair, include_refresh: bool) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            token_type: String::from("Bearer"),
            expires_in: tokens.access_expires_in,
            refresh_token: include_refresh.then(|| tokens.refresh_token.clone()),
        }
    }
}

/// Response for POST /api/v1/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub account_id: i64,
    #[serde(flatten)]
    pub tokens: TokenResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Account fields exposed to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            created_at: account.created_at,
        }
    }
}

/// Response for POST /api/v1/auth/signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub account: AccountResponse,
}

/// Response for GET /api/v1/auth/me
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub account: AccountResponse,
    /// Unix timestamp at which the presented access token expires
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let empty_password = LoginRequest {
            email: "user@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            email: "ada@example.com".to_string(),
            password: "analytical".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_password = SignupRequest {
            password: "short".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let no_name = SignupRequest {
            first_name: String::new(),
            ..valid
        };
        let errors = no_name.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn test_account_response_omits_password_hash() {
        let account = Account::new(42, "ada@example.com", "$2b$04$hash").with_name("Ada", "Lovelace");
        let value = serde_json::to_value(AccountResponse::from(account)).unwrap();
        assert_eq!(value["id"], 42);
        assert_eq!(value["last_name"], "Lovelace");
        assert!(value.get("password_hash").is_none());
    }

    #[test]
    fn test_refresh_request_accepts_empty_body() {
        let request: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.refresh_token.is_none());
    }

    #[test]
    fn test_token_response_hides_refresh_token_by_default() {
        let pair = TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            access_expires_in: 900,
            refresh_expires_in: 2_592_000,
        };

        let value = serde_json::to_value(TokenResponse::from_pair(&pair, false)).unwrap();
        assert_eq!(value["token_type"], "Bearer");
        assert_eq!(value["expires_in"], 900);
        assert!(value.get("refresh_token").is_none());

        let value = serde_json::to_value(TokenResponse::from_pair(&pair, true)).unwrap();
        assert_eq!(value["refresh_token"], "r");
    }
}
