//! Shared configuration and response types for the AuthKeep server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response envelopes and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CookieConfig, DatabaseConfig, Environment, JwtConfig,
    LoggingConfig, RevocationBackend, RevocationConfig, RevocationMode, ServerConfig,
    StoreFailurePolicy,
};
pub use errors::{error_codes, ErrorResponse};
