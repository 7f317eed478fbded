//! Startup selection of the revocation store

use std::sync::Arc;

use ak_core::repositories::{DisabledRevocationStore, RevocationStore};
use ak_shared::config::{CacheConfig, RevocationBackend, RevocationConfig, RevocationMode};

use crate::cache::{RedisClient, RedisRevocationStore};
use crate::database::{DatabasePool, MySqlRevocationStore};
use crate::InfrastructureError;

/// Selected revocation store and the Redis connection behind it, if any
pub struct RevocationSetup {
    pub store: Arc<dyn RevocationStore>,
    /// Set only for the Redis backend; used by the health endpoint
    pub redis: Option<RedisClient>,
}

/// Build the revocation store named by `config`
///
/// Called once at startup. `RevocationMode::Disabled` wins over the backend
/// choice and yields the fail-open `DisabledRevocationStore`. The Redis
/// backend connects here; the MySQL backend shares `database`.
pub async fn build_revocation_store(
    config: &RevocationConfig,
    cache: &CacheConfig,
    database: &DatabasePool,
) -> Result<RevocationSetup, InfrastructureError> {
    if config.mode == RevocationMode::Disabled {
        tracing::warn!(
            "Token revocation is DISABLED: logout and rotation will not stop refresh token reuse"
        );
        return Ok(RevocationSetup {
            store: Arc::new(DisabledRevocationStore::new()),
            redis: None,
        });
    }

    let setup = match config.backend {
        RevocationBackend::Redis => {
            let client = RedisClient::new(cache).await?;
            RevocationSetup {
                store: Arc::new(RedisRevocationStore::new(client.clone(), config.key_prefix.clone())),
                redis: Some(client),
            }
        }
        RevocationBackend::Mysql => RevocationSetup {
            store: Arc::new(MySqlRevocationStore::new(database.get_pool().clone())),
            redis: None,
        },
    };

    tracing::info!(
        backend = setup.store.backend_name(),
        failure_policy = ?config.failure_policy,
        "Revocation store ready"
    );
    Ok(setup)
}
