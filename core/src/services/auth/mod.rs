//! Authentication service module
//!
//! This module composes the token lifecycle with account storage:
//! - Signup with a hashed password
//! - Email and password login issuing a token pair
//! - Resolving the account behind an authenticated subject
//! - Refresh and logout pass-through to the token service

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::PasswordVerifier;
pub use service::{AuthService, LoginResult, SignupInput};
