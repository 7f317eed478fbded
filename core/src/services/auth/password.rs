//! Password hashing capability.

use crate::errors::DomainError;

/// Hashes new passwords and checks plaintext passwords against stored hashes
///
/// Hashing is CPU-bound and synchronous; implementations live in the
/// infrastructure layer.
pub trait PasswordVerifier: Send + Sync {
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match
    /// * `Err(DomainError)` - Stored hash unreadable
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError>;

    /// Hash a password for storage
    fn hash(&self, password: &str) -> Result<String, DomainError>;
}
