//! Unit tests for refresh token rotation

use chrono::Duration;

use ak_shared::config::StoreFailurePolicy;

use crate::domain::entities::token::short_token_id;
use crate::errors::TokenError;

use super::mocks::{fixture, flaky_fixture};

#[tokio::test]
async fn test_refresh_rotates_presented_token() {
    let f = fixture();
    let pair = f.service.issue_token_pair(42).unwrap();

    let rotated = f.service.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(rotated.account_id, 42);
    assert_ne!(rotated.tokens.refresh_token, pair.refresh_token);

    assert_eq!(
        f.service.refresh(&pair.refresh_token).await,
        Err(TokenError::RevokedToken)
    );

    let access = f
        .service
        .verify_access_token(&rotated.tokens.access_token)
        .await
        .unwrap();
    assert_eq!(access.sub, "42");
    assert!(f
        .service
        .verify_refresh_token(&rotated.tokens.refresh_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_rotated_chain_keeps_working() {
    let f = fixture();
    let mut refresh_token = f.service.issue_token_pair(9).unwrap().refresh_token;

    for _ in 0..3 {
        f.clock.advance(Duration::hours(1));
        refresh_token = f.service.refresh(&refresh_token).await.unwrap().tokens.refresh_token;
    }

    assert_eq!(f.store.len().await, 3);
    assert!(f.service.verify_refresh_token(&refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_reuse_does_not_revoke_newer_tokens() {
    let f = fixture();
    let pair = f.service.issue_token_pair(42).unwrap();
    let rotated = f.service.refresh(&pair.refresh_token).await.unwrap();

    assert_eq!(
        f.service.refresh(&pair.refresh_token).await,
        Err(TokenError::RevokedToken)
    );
    assert!(f
        .service
        .verify_refresh_token(&rotated.tokens.refresh_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_verification_failures_pass_through() {
    let f = fixture();
    let pair = f.service.issue_token_pair(42).unwrap();

    assert!(matches!(
        f.service.refresh(&pair.access_token).await,
        Err(TokenError::WrongTokenType { .. })
    ));
    assert_eq!(
        f.service.refresh("garbage").await,
        Err(TokenError::MalformedToken)
    );

    f.clock.advance(Duration::days(8));
    assert_eq!(
        f.service.refresh(&pair.refresh_token).await,
        Err(TokenError::ExpiredToken)
    );
    assert!(f.store.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_refresh_same_token() {
    let f = fixture();
    let pair = f.service.issue_token_pair(42).unwrap();

    let (first, second) = tokio::join!(
        f.service.refresh(&pair.refresh_token),
        f.service.refresh(&pair.refresh_token)
    );

    // Both may win the race; at least one must
    assert!(first.is_ok() || second.is_ok());
    assert_eq!(f.store.len().await, 1);
    assert_eq!(
        f.service.refresh(&pair.refresh_token).await,
        Err(TokenError::RevokedToken)
    );
}

#[tokio::test]
async fn test_revoke_failure_fail_closed_issues_nothing() {
    let (service, store) = flaky_fixture(StoreFailurePolicy::FailClosed);
    let pair = service.issue_token_pair(42).unwrap();
    store.fail_writes(true);

    assert!(matches!(
        service.refresh(&pair.refresh_token).await,
        Err(TokenError::StoreUnavailable { .. })
    ));

    store.fail_writes(false);
    assert!(service.refresh(&pair.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_revoke_failure_fail_open_still_rotates() {
    let (service, store) = flaky_fixture(StoreFailurePolicy::FailOpen);
    let pair = service.issue_token_pair(42).unwrap();
    store.fail_writes(true);

    let rotated = service.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(rotated.account_id, 42);
    // Nothing was recorded, so the old token still works
    store.fail_writes(false);
    assert!(service.verify_refresh_token(&pair.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_rotation_inside_expiry_leeway_blocks_replay() {
    let f = fixture();
    let pair = f.service.issue_token_pair(42).unwrap();

    // Past exp, still inside the 5s leeway
    f.clock.advance(Duration::days(7) + Duration::seconds(2));
    let rotated = f.service.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(rotated.account_id, 42);

    assert_eq!(
        f.service.refresh(&pair.refresh_token).await,
        Err(TokenError::RevokedToken)
    );

    f.clock.advance(Duration::seconds(3));
    assert_eq!(
        f.service.refresh(&pair.refresh_token).await,
        Err(TokenError::RevokedToken)
    );

    f.clock.advance(Duration::seconds(1));
    assert_eq!(
        f.service.refresh(&pair.refresh_token).await,
        Err(TokenError::ExpiredToken)
    );
}

#[tokio::test]
async fn test_reused_token_owner_identifies_account() {
    let f = fixture();
    let pair = f.service.issue_token_pair(42).unwrap();
    let claims = f.service.verify_refresh_token(&pair.refresh_token).await.unwrap();
    f.service.refresh(&pair.refresh_token).await.unwrap();

    assert_eq!(
        f.service.rotation().reused_token_owner(&pair.refresh_token),
        Some((42, short_token_id(&claims.jti).to_string()))
    );
    assert_eq!(f.service.rotation().reused_token_owner("garbage"), None);
}
