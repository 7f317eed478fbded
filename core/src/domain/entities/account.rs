//! Account record shared by signup, login and profile lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account id, used as the token subject
    pub id: i64,

    /// Login email
    pub email: String,

    pub first_name: String,

    pub last_name: String,

    /// Stored password hash; never serialized back to clients
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: i64, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Subject claim value for this account
    pub fn subject(&self) -> String {
        self.id.to_string()
    }
}

/// Account about to be created; the store assigns id and creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}
