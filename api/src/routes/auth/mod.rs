//! Authentication route handlers
//!
//! - Signup
//! - Login with email and password
//! - Token refresh (rotation)
//! - Logout
//! - Current account lookup

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod signup;

use actix_web::HttpRequest;
use std::sync::Arc;

use ak_core::repositories::AccountRepository;
use ak_core::services::auth::{AuthService, PasswordVerifier};
use ak_shared::config::CookieConfig;

use crate::cookies::refresh_token_from_cookie;
use crate::dto::RefreshTokenRequest;
use crate::health::HealthChecks;

/// Application state shared by the auth handlers
pub struct AppState<A, P>
where
    A: AccountRepository,
    P: PasswordVerifier,
{
    pub auth_service: Arc<AuthService<A, P>>,
    pub cookie: CookieConfig,
    pub health: HealthChecks,
}

impl<A, P> AppState<A, P>
where
    A: AccountRepository,
    P: PasswordVerifier,
{
    pub fn new(auth_service: Arc<AuthService<A, P>>, cookie: CookieConfig) -> Self {
        Self {
            auth_service,
            cookie,
            health: HealthChecks::new(),
        }
    }

    pub fn with_health_checks(mut self, health: HealthChecks) -> Self {
        self.health = health;
        self
    }
}

/// Where the presented refresh token came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PresentedToken {
    Cookie(String),
    Body(String),
}

impl PresentedToken {
    pub(crate) fn value(&self) -> &str {
        match self {
            PresentedToken::Cookie(token) | PresentedToken::Body(token) => token,
        }
    }

    pub(crate) fn from_body(&self) -> bool {
        matches!(self, PresentedToken::Body(_))
    }
}

/// Refresh token from the cookie, falling back to the JSON body
pub(crate) fn presented_refresh_token(
    req: &HttpRequest,
    cookie: &CookieConfig,
    body: Option<&RefreshTokenRequest>,
) -> Option<PresentedToken> {
    if let Some(token) = refresh_token_from_cookie(req, cookie) {
        return Some(PresentedToken::Cookie(token));
    }

    body.and_then(|b| b.refresh_token.as_deref())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| PresentedToken::Body(token.to_string()))
}
