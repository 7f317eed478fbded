pub mod auth;

pub use auth::*;
pub use ak_shared::errors::ErrorResponse;
