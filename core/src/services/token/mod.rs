//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Signing and decoding claim sets with per-type keys
//! - Issuing access and refresh tokens
//! - Verifying presented tokens against expiry, type and revocation
//! - Rotating refresh tokens and revoking them at logout
//! - Background sweeping of lapsed revocation entries

mod codec;
mod config;
mod issuer;
mod logout;
mod rotation;
mod service;
mod sweeper;
mod verifier;

#[cfg(test)]
mod tests;

pub use codec::ClaimsCodec;
pub use config::TokenServiceConfig;
pub use issuer::TokenIssuer;
pub use logout::{LogoutHandler, LogoutOutcome};
pub use rotation::{RotationCoordinator, RotationResult};
pub use service::TokenService;
pub use sweeper::{RevocationSweeper, SweepResult};
pub use verifier::TokenVerifier;
