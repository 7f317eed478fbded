//! Unit tests for the authentication service

use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{InMemoryAccountRepository, InMemoryRevocationStore};
use crate::services::token::{TokenService, TokenServiceConfig};

use super::{AuthService, PasswordVerifier, SignupInput};

/// Treats the stored hash as `plain:<password>`
struct PlainPasswordVerifier;

impl PasswordVerifier for PlainPasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
        match password_hash.strip_prefix("plain:") {
            Some(expected) => Ok(expected == password),
            None => Err(DomainError::Internal {
                message: "unreadable hash".to_string(),
            }),
        }
    }

    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", password))
    }
}

fn service() -> AuthService<InMemoryAccountRepository, PlainPasswordVerifier> {
    let accounts = InMemoryAccountRepository::with_accounts([
        Account::new(42, "ada@example.com", "plain:correct horse").with_name("Ada", "Lovelace"),
        Account::new(7, "broken@example.com", "$2b$corrupt"),
    ]);
    let tokens = TokenService::new(
        TokenServiceConfig::new("auth-test-secret"),
        Arc::new(InMemoryRevocationStore::new()),
    )
    .unwrap();

    AuthService::new(
        Arc::new(accounts),
        Arc::new(PlainPasswordVerifier),
        Arc::new(tokens),
    )
}

#[tokio::test]
async fn test_login_issues_verifiable_pair() {
    let auth = service();
    let result = auth.login("Ada@Example.com", "correct horse").await.unwrap();
    assert_eq!(result.account_id, 42);

    let claims = auth
        .token_service()
        .verify_access_token(&result.tokens.access_token)
        .await
        .unwrap();
    assert_eq!(claims.account_id(), Ok(42));
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let auth = service();
    let unknown = auth.login("nobody@example.com", "whatever").await.unwrap_err();
    let wrong = auth.login("ada@example.com", "wrong").await.unwrap_err();

    assert_eq!(unknown, DomainError::Auth(AuthError::InvalidCredentials));
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let auth = service();
    assert!(matches!(
        auth.login("  ", "x").await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        auth.login("ada@example.com", "").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_unreadable_hash_is_internal() {
    let auth = service();
    assert!(matches!(
        auth.login("broken@example.com", "x").await,
        Err(DomainError::Internal { .. })
    ));
}

#[tokio::test]
async fn test_refresh_and_logout_pass_through() {
    let auth = service();
    let login = auth.login("ada@example.com", "correct horse").await.unwrap();

    let rotated = auth.refresh(&login.tokens.refresh_token).await.unwrap();
    assert_eq!(rotated.account_id, 42);
    assert_eq!(
        auth.refresh(&login.tokens.refresh_token).await,
        Err(DomainError::Token(TokenError::RevokedToken))
    );

    auth.logout(Some(&rotated.tokens.refresh_token)).await.unwrap();
    assert_eq!(
        auth.refresh(&rotated.tokens.refresh_token).await,
        Err(DomainError::Token(TokenError::RevokedToken))
    );
}

fn signup_input(email: &str, password: &str) -> SignupInput {
    SignupInput {
        email: email.to_string(),
        password: password.to_string(),
        first_name: " Grace ".to_string(),
        last_name: "Hopper".to_string(),
    }
}

#[tokio::test]
async fn test_signup_stores_hashed_password_then_logs_in() {
    let auth = service();
    let account = auth
        .signup(signup_input(" grace@example.com ", "cobol forever"))
        .await
        .unwrap();

    assert_eq!(account.id, 43);
    assert_eq!(account.email, "grace@example.com");
    assert_eq!(account.first_name, "Grace");
    assert_eq!(account.password_hash, "plain:cobol forever");

    let login = auth.login("grace@example.com", "cobol forever").await.unwrap();
    assert_eq!(login.account_id, 43);
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let auth = service();
    assert_eq!(
        auth.signup(signup_input("ADA@example.com", "another one")).await,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    );
}

#[tokio::test]
async fn test_signup_requires_email_and_password() {
    let auth = service();
    assert!(matches!(
        auth.signup(signup_input("", "pw")).await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        auth.signup(signup_input("new@example.com", "")).await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_current_account_resolves_record() {
    let auth = service();
    let account = auth.current_account(42).await.unwrap();
    assert_eq!(account.email, "ada@example.com");
    assert_eq!(account.last_name, "Lovelace");

    assert_eq!(
        auth.current_account(999).await,
        Err(DomainError::Auth(AuthError::AccountNotFound))
    );
}
