//! Account repository trait used by signup, login and profile lookup.

use async_trait::async_trait;

use crate::domain::entities::account::{Account, NewAccount};
use crate::errors::DomainError;

/// Storage of account records
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an active account by email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No active account with that email
    /// * `Err(DomainError)` - Lookup failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an active account by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError>;

    /// Insert a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - Stored account with its assigned id
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email taken,
    ///   including when a concurrent signup wins the race
    /// * `Err(DomainError)` - Insert failed
    async fn create(&self, account: NewAccount) -> Result<Account, DomainError>;
}
