//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the AuthKeep backend.
//! It provides concrete implementations of the capabilities declared in
//! `ak_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client and the TTL-native revocation store
//! - **Database**: MySQL pool, the swept revocation table and account storage
//! - **Security**: bcrypt password hashing and verification
//! - **Revocation**: startup factory selecting the configured store

use ak_core::errors::{DomainError, TokenError};

/// Cache module - Redis client and revocation store
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Revocation store selection
pub mod revocation;

/// Password hashing
pub mod security;

pub use cache::{RedisClient, RedisRevocationStore};
pub use database::{DatabasePool, MySqlAccountRepository, MySqlRevocationStore};
pub use revocation::{build_revocation_store, RevocationSetup};
pub use security::BcryptPasswordVerifier;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for TokenError {
    fn from(err: InfrastructureError) -> Self {
        TokenError::store_unavailable(err.to_string())
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
