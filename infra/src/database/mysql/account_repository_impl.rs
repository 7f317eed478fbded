//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ak_core::domain::entities::account::{Account, NewAccount};
use ak_core::errors::{AuthError, DomainError};
use ak_core::repositories::AccountRepository;

/// Accounts stored in the `account` table
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        };

        let id: i64 = row.try_get("id").map_err(|e| column("id", e))?;
        let email: String = row.try_get("email").map_err(|e| column("email", e))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| column("password_hash", e))?;
        let first_name: String = row.try_get("first_name").map_err(|e| column("first_name", e))?;
        let last_name: String = row.try_get("last_name").map_err(|e| column("last_name", e))?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(|e| column("created_at", e))?;

        Ok(Account {
            id,
            email,
            first_name,
            last_name,
            password_hash,
            created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, first_name, last_name, created_at
            FROM account
            WHERE email = ? AND deleted_at IS NULL
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by email: {}", e),
            })?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, first_name, last_name, created_at
            FROM account
            WHERE id = ? AND deleted_at IS NULL
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by id: {}", e),
            })?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO account (email, password_hash, first_name, last_name)
            VALUES (?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                // Unique index on email; a concurrent signup got there first
                Some(db) if db.is_unique_violation() => {
                    DomainError::from(AuthError::EmailAlreadyRegistered)
                }
                _ => DomainError::Internal {
                    message: format!("Failed to create account: {}", e),
                },
            })?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id).await?.ok_or_else(|| DomainError::Internal {
            message: format!("Account {} missing after insert", id),
        })
    }
}
