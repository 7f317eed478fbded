//! # AuthKeep Core
//!
//! Token lifecycle and revocation domain for the AuthKeep backend.
//! This crate contains the claim set and revocation entities, the error
//! taxonomy, the revocation store capability, and the services that issue,
//! verify, rotate and revoke tokens.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
