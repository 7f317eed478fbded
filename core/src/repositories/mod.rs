pub mod account;
pub mod revocation;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use revocation::{DisabledRevocationStore, InMemoryRevocationStore, RevocationStore};
