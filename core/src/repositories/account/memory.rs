//! In-process account storage for tests and local runs

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::account::{Account, NewAccount};
use crate::errors::{AuthError, DomainError};

use super::r#trait::AccountRepository;

/// Account repository keyed by lowercase email
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Build a repository holding `accounts`
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let map = accounts
            .into_iter()
            .map(|account| (account.email.to_lowercase(), account))
            .collect();
        Self {
            accounts: RwLock::new(map),
        }
    }

    pub async fn insert(&self, account: Account) {
        self.accounts
            .write()
            .await
            .insert(account.email.to_lowercase(), account);
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&email.to_lowercase()).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|account| account.id == id).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;
        let key = account.email.to_lowercase();
        if accounts.contains_key(&key) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let id = accounts.values().map(|a| a.id).max().unwrap_or(0) + 1;
        let stored = Account {
            id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };
        accounts.insert(key, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let repo = InMemoryAccountRepository::with_accounts([Account::new(41, "old@example.com", "h")]);
        let created = repo.create(new_account("ada@example.com")).await.unwrap();
        assert_eq!(created.id, 42);

        let found = repo.find_by_id(42).await.unwrap().unwrap();
        assert_eq!(found.email, "ada@example.com");
        assert_eq!(found.first_name, "Ada");
        assert!(repo.find_by_id(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email_case_insensitively() {
        let repo = InMemoryAccountRepository::new();
        repo.create(new_account("ada@example.com")).await.unwrap();
        assert_eq!(
            repo.create(new_account("ADA@example.com")).await,
            Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
        );
    }
}
