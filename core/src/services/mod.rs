//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, LoginResult, PasswordVerifier, SignupInput};
pub use token::{
    ClaimsCodec, LogoutHandler, LogoutOutcome, RevocationSweeper, RotationCoordinator,
    RotationResult, SweepResult, TokenIssuer, TokenService, TokenServiceConfig, TokenVerifier,
};
