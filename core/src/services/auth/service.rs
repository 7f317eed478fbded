//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::account::{Account, NewAccount};
use crate::domain::entities::token::TokenPair;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::token::{LogoutOutcome, RotationResult, TokenService};

use super::password::PasswordVerifier;

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    /// Authenticated account
    pub account_id: i64,
    /// Freshly issued tokens
    pub tokens: TokenPair,
}

/// Profile fields supplied at signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Authentication service for signup, login and token-backed identity
pub struct AuthService<A, P>
where
    A: AccountRepository,
    P: PasswordVerifier,
{
    /// Account storage
    account_repository: Arc<A>,
    /// Password hashing and verification
    password_verifier: Arc<P>,
    /// Token lifecycle
    token_service: Arc<TokenService>,
}

impl<A, P> AuthService<A, P>
where
    A: AccountRepository,
    P: PasswordVerifier,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `account_repository` - Repository for account storage
    /// * `password_verifier` - Hasher and verifier for passwords
    /// * `token_service` - Service for JWT token management
    pub fn new(
        account_repository: Arc<A>,
        password_verifier: Arc<P>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            account_repository,
            password_verifier,
            token_service,
        }
    }

    /// Register a new account
    ///
    /// Fails with `AuthError::EmailAlreadyRegistered` when the email is taken.
    /// No tokens are issued; the client logs in afterwards.
    pub async fn signup(&self, input: SignupInput) -> DomainResult<Account> {
        let email = input.email.trim();
        if email.is_empty() || input.password.is_empty() {
            return Err(DomainError::Validation {
                message: "Email and password are required".to_string(),
            });
        }

        if self.account_repository.find_by_email(email).await?.is_some() {
            tracing::debug!("Signup attempt for registered email");
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.password_verifier.hash(&input.password)?;
        let account = self
            .account_repository
            .create(NewAccount {
                email: email.to_string(),
                password_hash,
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
            })
            .await?;

        tracing::info!(account_id = account.id, "Account created");
        Ok(account)
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password both fail with
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResult> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation {
                message: "Email and password are required".to_string(),
            });
        }

        let account = match self.account_repository.find_by_email(email).await? {
            Some(account) => account,
            None => {
                tracing::debug!("Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self
            .password_verifier
            .verify(password, &account.password_hash)?
        {
            tracing::debug!(account_id = account.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.token_service.issue_token_pair(account.id)?;
        tracing::info!(account_id = account.id, "Account logged in");

        Ok(LoginResult {
            account_id: account.id,
            tokens,
        })
    }

    /// Account record for an authenticated subject
    ///
    /// The access token may outlive its account; a missing or deleted account
    /// fails with `AuthError::AccountNotFound`.
    pub async fn current_account(&self, account_id: i64) -> DomainResult<Account> {
        match self.account_repository.find_by_id(account_id).await? {
            Some(account) => Ok(account),
            None => {
                tracing::debug!(account_id, "Authenticated account no longer exists");
                Err(AuthError::AccountNotFound.into())
            }
        }
    }

    /// Rotate a refresh token
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<RotationResult> {
        Ok(self.token_service.refresh(refresh_token).await?)
    }

    /// Revoke the presented refresh token, if any
    pub async fn logout(&self, refresh_token: Option<&str>) -> DomainResult<LogoutOutcome> {
        Ok(self.token_service.logout(refresh_token).await?)
    }

    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }
}
