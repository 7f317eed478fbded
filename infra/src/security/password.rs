//! bcrypt implementation of the PasswordVerifier trait.

use ak_core::errors::DomainError;
use ak_core::services::PasswordVerifier;

/// Hashes and verifies passwords with bcrypt
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordVerifier {
    cost: u32,
}

impl BcryptPasswordVerifier {
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Verifier hashing at `cost`; low costs are only for tests
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordVerifier for BcryptPasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(password, password_hash).map_err(|e| {
            tracing::error!("Stored password hash could not be read: {}", e);
            DomainError::Internal {
                message: format!("Failed to verify password: {}", e),
            }
        })
    }

    /// Hash `password` at this verifier's cost
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let verifier = BcryptPasswordVerifier::with_cost(4);
        let hash = verifier.hash("correct horse").unwrap();

        assert!(verifier.verify("correct horse", &hash).unwrap());
        assert!(!verifier.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_error() {
        let verifier = BcryptPasswordVerifier::new();
        assert!(verifier.verify("anything", "not-a-bcrypt-hash").is_err());
    }
}
