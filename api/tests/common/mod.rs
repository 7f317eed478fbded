//! Shared fixtures for the API integration tests
#![allow(dead_code)]

use actix_web::{cookie::Cookie, dev::ServiceResponse, test, web};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use ak_api::routes::auth::AppState;
use ak_core::domain::clock::{Clock, ManualClock};
use ak_core::domain::entities::account::Account;
use ak_core::domain::entities::token::RevocationEntry;
use ak_core::errors::TokenError;
use ak_core::repositories::{InMemoryAccountRepository, InMemoryRevocationStore, RevocationStore};
use ak_core::services::auth::{AuthService, PasswordVerifier};
use ak_core::services::token::{TokenService, TokenServiceConfig};
use ak_infra::BcryptPasswordVerifier;
use ak_shared::config::{CookieConfig, StoreFailurePolicy};

pub const ACCOUNT_ID: i64 = 42;
pub const EMAIL: &str = "user@example.com";
pub const PASSWORD: &str = "correct-horse-battery-staple";
pub const ACCESS_SECRET: &str = "integration-access-secret";
pub const REFRESH_SECRET: &str = "integration-refresh-secret";
pub const COOKIE_NAME: &str = "refresh_token";

pub type TestState = AppState<InMemoryAccountRepository, BcryptPasswordVerifier>;

/// App state over the given store and clock with one known account
pub fn build_state(
    store: Arc<dyn RevocationStore>,
    policy: StoreFailurePolicy,
    clock: Arc<dyn Clock>,
) -> web::Data<TestState> {
    web::Data::new(test_state(store, policy, clock))
}

/// Unwrapped state, for tests that adjust it before serving
pub fn test_state(
    store: Arc<dyn RevocationStore>,
    policy: StoreFailurePolicy,
    clock: Arc<dyn Clock>,
) -> TestState {
    let verifier = BcryptPasswordVerifier::with_cost(4);
    let hash = verifier.hash(PASSWORD).unwrap();
    let accounts = InMemoryAccountRepository::with_accounts([
        Account::new(ACCOUNT_ID, EMAIL, hash).with_name("Grace", "Hopper"),
    ]);

    let config = TokenServiceConfig::new(ACCESS_SECRET)
        .with_refresh_secret(REFRESH_SECRET)
        .with_failure_policy(policy);
    let token_service = Arc::new(TokenService::with_clock(config, store, clock).unwrap());

    let auth_service = Arc::new(AuthService::new(
        Arc::new(accounts),
        Arc::new(verifier),
        token_service,
    ));

    AppState::new(auth_service, CookieConfig::default())
}

/// In-memory store, fail-closed
pub fn default_state() -> web::Data<TestState> {
    clocked_state().0
}

/// In-memory store, fail-closed, driven by a manual clock
pub fn clocked_state() -> (web::Data<TestState>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_now());
    let state = build_state(
        Arc::new(InMemoryRevocationStore::with_clock(clock.clone())),
        StoreFailurePolicy::FailClosed,
        clock.clone(),
    );
    (state, clock)
}

pub fn login_request() -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": EMAIL, "password": PASSWORD }))
}

pub fn signup_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/v1/auth/signup").set_json(json!({
        "email": email,
        "password": password,
        "first_name": "Ada",
        "last_name": "Lovelace",
    }))
}

pub fn refresh_with_cookie(token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new(COOKIE_NAME, token.to_string()))
}

pub fn logout_with_cookie(token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .cookie(Cookie::new(COOKIE_NAME, token.to_string()))
}

pub fn me_with_bearer(token: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
}

/// Value of the refresh cookie set on a response
pub fn refresh_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == COOKIE_NAME)
        .map(|c| c.into_owned())
}

/// Store whose reads and writes always fail
pub struct UnreachableStore;

#[async_trait]
impl RevocationStore for UnreachableStore {
    async fn revoke(&self, _entry: &RevocationEntry) -> Result<(), TokenError> {
        Err(TokenError::store_unavailable("connection refused"))
    }

    async fn is_revoked(&self, _token_id: &str) -> Result<bool, TokenError> {
        Err(TokenError::store_unavailable("connection refused"))
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}
