//! Unit tests for logout

use chrono::Duration;

use ak_shared::config::StoreFailurePolicy;

use crate::errors::TokenError;
use crate::services::token::{LogoutOutcome, TokenService, TokenServiceConfig};
use crate::repositories::InMemoryRevocationStore;

use super::mocks::{fixture, flaky_fixture};

#[tokio::test]
async fn test_logout_without_token_succeeds() {
    let f = fixture();
    assert_eq!(f.service.logout(None).await, Ok(LogoutOutcome::NoTokenPresented));
    assert_eq!(
        f.service.logout(Some("")).await,
        Ok(LogoutOutcome::NoTokenPresented)
    );
    assert!(f.store.is_empty().await);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let f = fixture();
    let pair = f.service.issue_token_pair(42).unwrap();

    assert_eq!(
        f.service.logout(Some(&pair.refresh_token)).await,
        Ok(LogoutOutcome::Revoked { account_id: 42 })
    );
    assert_eq!(
        f.service.verify_refresh_token(&pair.refresh_token).await,
        Err(TokenError::RevokedToken)
    );
}

#[tokio::test]
async fn test_logout_twice_is_harmless() {
    let f = fixture();
    let pair = f.service.issue_token_pair(42).unwrap();

    assert!(f.service.logout(Some(&pair.refresh_token)).await.is_ok());
    assert!(f.service.logout(Some(&pair.refresh_token)).await.is_ok());
    assert_eq!(f.store.len().await, 1);
}

#[tokio::test]
async fn test_logout_with_expired_token_succeeds() {
    let f = fixture();
    let pair = f.service.issue_token_pair(42).unwrap();
    f.clock.advance(Duration::days(30));

    assert!(f.service.logout(Some(&pair.refresh_token)).await.is_ok());
}

#[tokio::test]
async fn test_logout_rejects_undecodable_token() {
    let f = fixture();
    assert_eq!(
        f.service.logout(Some("not.a.token")).await,
        Err(TokenError::MalformedToken)
    );

    // Forged elsewhere: signature does not verify
    let foreign = TokenService::new(
        TokenServiceConfig::new("other-secret"),
        std::sync::Arc::new(InMemoryRevocationStore::new()),
    )
    .unwrap();
    let forged = foreign.issue_token_pair(42).unwrap();
    assert_eq!(
        f.service.logout(Some(&forged.refresh_token)).await,
        Err(TokenError::MalformedToken)
    );
    assert!(f.store.is_empty().await);
}

#[tokio::test]
async fn test_logout_store_failure_policies() {
    let (closed, closed_store) = flaky_fixture(StoreFailurePolicy::FailClosed);
    let pair = closed.issue_token_pair(42).unwrap();
    closed_store.fail_writes(true);
    assert!(matches!(
        closed.logout(Some(&pair.refresh_token)).await,
        Err(TokenError::StoreUnavailable { .. })
    ));

    let (open, open_store) = flaky_fixture(StoreFailurePolicy::FailOpen);
    let pair = open.issue_token_pair(42).unwrap();
    open_store.fail_writes(true);
    assert_eq!(
        open.logout(Some(&pair.refresh_token)).await,
        Ok(LogoutOutcome::RevocationSkipped { account_id: 42 })
    );
}

#[tokio::test]
async fn test_logout_inside_expiry_leeway_blocks_token() {
    let f = fixture();
    let pair = f.service.issue_token_pair(7).unwrap();

    f.clock.advance(Duration::days(7) + Duration::seconds(1));
    assert!(f.service.verify_refresh_token(&pair.refresh_token).await.is_ok());

    assert_eq!(
        f.service.logout(Some(&pair.refresh_token)).await,
        Ok(LogoutOutcome::Revoked { account_id: 7 })
    );
    assert_eq!(
        f.service.verify_refresh_token(&pair.refresh_token).await,
        Err(TokenError::RevokedToken)
    );
    assert_eq!(f.store.len().await, 1);
}
