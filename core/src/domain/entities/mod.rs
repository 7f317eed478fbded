//! Domain entities representing core business objects.

pub mod account;
pub mod token;

// Re-export commonly used types
pub use account::{Account, NewAccount};
pub use token::{Claims, RevocationEntry, TokenPair, TokenType};
