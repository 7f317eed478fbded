//! Revocation store configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::env::{parsed_or, string_or};

/// Whether revocation is enforced at all.
///
/// `Disabled` is a deliberate fail-open switch: revoking becomes a no-op and
/// every token id reports "not revoked", so logout and rotation no longer
/// prevent reuse of a refresh token before its natural expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationMode {
    #[default]
    Enforced,
    Disabled,
}

/// Storage backend for revocation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// Redis keys expiring on their own TTL
    #[default]
    Redis,
    /// MySQL `blacklist_jti` table reclaimed by a periodic sweep
    Mysql,
}

/// What to do when the revocation backend cannot be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreFailurePolicy {
    /// Deny: surface the failure and refuse the operation
    #[default]
    FailClosed,
    /// Allow: log the failure and treat the token as not revoked
    FailOpen,
}

impl FromStr for RevocationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enforced" | "on" | "true" => Ok(RevocationMode::Enforced),
            "disabled" | "off" | "false" => Ok(RevocationMode::Disabled),
            _ => Err(format!("Invalid revocation mode: {}", s)),
        }
    }
}

impl FromStr for RevocationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" | "cache" => Ok(RevocationBackend::Redis),
            "mysql" | "database" | "db" => Ok(RevocationBackend::Mysql),
            _ => Err(format!("Invalid revocation backend: {}", s)),
        }
    }
}

impl FromStr for StoreFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fail_closed" | "closed" => Ok(StoreFailurePolicy::FailClosed),
            "fail_open" | "open" => Ok(StoreFailurePolicy::FailOpen),
            _ => Err(format!("Invalid store failure policy: {}", s)),
        }
    }
}

impl fmt::Display for RevocationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevocationBackend::Redis => write!(f, "redis"),
            RevocationBackend::Mysql => write!(f, "mysql"),
        }
    }
}

/// Revocation store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Enforcement switch
    #[serde(default)]
    pub mode: RevocationMode,

    /// Backend holding revocation entries
    #[serde(default)]
    pub backend: RevocationBackend,

    /// Behaviour when the backend is unreachable
    #[serde(default)]
    pub failure_policy: StoreFailurePolicy,

    /// Sweep interval for the durable backend in seconds (0 disables the sweeper)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Redis key prefix for revoked token ids
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            mode: RevocationMode::default(),
            backend: RevocationBackend::default(),
            failure_policy: StoreFailurePolicy::default(),
            sweep_interval_seconds: default_sweep_interval(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl RevocationConfig {
    /// Read `REVOCATION_*` variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            mode: parsed_or("REVOCATION_MODE", defaults.mode),
            backend: parsed_or("REVOCATION_BACKEND", defaults.backend),
            failure_policy: parsed_or("REVOCATION_FAILURE_POLICY", defaults.failure_policy),
            sweep_interval_seconds: parsed_or(
                "REVOCATION_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
            key_prefix: string_or("REVOCATION_KEY_PREFIX", &defaults.key_prefix),
        }
    }

    pub fn is_enforced(&self) -> bool {
        self.mode == RevocationMode::Enforced
    }

    pub fn with_mode(mut self, mode: RevocationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_backend(mut self, backend: RevocationBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_failure_policy(mut self, policy: StoreFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

fn default_sweep_interval() -> u64 {
    3600 // hourly
}

fn default_key_prefix() -> String {
    String::from("blacklist:jti:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revocation_config_default() {
        let config = RevocationConfig::default();
        assert!(config.is_enforced());
        assert_eq!(config.backend, RevocationBackend::Redis);
        assert_eq!(config.failure_policy, StoreFailurePolicy::FailClosed);
        assert_eq!(config.sweep_interval_seconds, 3600);
        assert_eq!(config.key_prefix, "blacklist:jti:");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("enforced".parse::<RevocationMode>().unwrap(), RevocationMode::Enforced);
        assert_eq!("OFF".parse::<RevocationMode>().unwrap(), RevocationMode::Disabled);
        assert_eq!("false".parse::<RevocationMode>().unwrap(), RevocationMode::Disabled);
        assert!("maybe".parse::<RevocationMode>().is_err());
    }

    #[test]
    fn test_backend_and_policy_from_str() {
        assert_eq!("MySQL".parse::<RevocationBackend>().unwrap(), RevocationBackend::Mysql);
        assert_eq!("redis".parse::<RevocationBackend>().unwrap(), RevocationBackend::Redis);
        assert!("memcached".parse::<RevocationBackend>().is_err());

        assert_eq!(
            "fail-open".parse::<StoreFailurePolicy>().unwrap(),
            StoreFailurePolicy::FailOpen
        );
        assert_eq!(
            "fail_closed".parse::<StoreFailurePolicy>().unwrap(),
            StoreFailurePolicy::FailClosed
        );
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&StoreFailurePolicy::FailOpen).unwrap();
        assert_eq!(json, "\"fail_open\"");
        let mode: RevocationMode = serde_json::from_str("\"disabled\"").unwrap();
        assert_eq!(mode, RevocationMode::Disabled);
    }
}
