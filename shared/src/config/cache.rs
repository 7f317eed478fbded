//! Redis connection settings for the TTL revocation backend

use serde::{Deserialize, Serialize};

use super::env::{parsed_or, string_or};

const DEFAULT_URL: &str = "redis://localhost:6379/0";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub url: String,

    /// Seconds allowed for each connection attempt
    pub connection_timeout: u64,

    /// Attempts per connect or command before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay in milliseconds, doubled per attempt
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

impl CacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connection_timeout: 5,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }

    /// `REDIS_URL`, `REDIS_CONNECTION_TIMEOUT`, `REDIS_MAX_RETRIES`, `REDIS_RETRY_DELAY_MS`
    pub fn from_env() -> Self {
        let defaults = Self::new(string_or("REDIS_URL", DEFAULT_URL));
        Self {
            connection_timeout: parsed_or("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            max_retries: parsed_or("REDIS_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: parsed_or("REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms),
            ..defaults
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}
