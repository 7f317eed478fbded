//! Revocation store used when revocation is switched off by configuration.

use async_trait::async_trait;

use crate::domain::entities::token::{short_token_id, RevocationEntry};
use crate::errors::TokenError;

use super::r#trait::RevocationStore;

/// Fail-open store: accepts every revoke, reports nothing as revoked
///
/// With this store in place a logged-out or rotated refresh token keeps
/// working until it expires naturally.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRevocationStore;

impl DisabledRevocationStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RevocationStore for DisabledRevocationStore {
    async fn revoke(&self, entry: &RevocationEntry) -> Result<(), TokenError> {
        tracing::debug!(
            jti = %short_token_id(&entry.token_id),
            "Revocation disabled, ignoring revoke"
        );
        Ok(())
    }

    async fn is_revoked(&self, _token_id: &str) -> Result<bool, TokenError> {
        Ok(false)
    }

    fn backend_name(&self) -> &'static str {
        "disabled"
    }
}
