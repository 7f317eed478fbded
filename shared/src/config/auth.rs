//! Authentication configuration: signing keys, token lifetimes and cookies

use serde::{Deserialize, Serialize};

use super::env::{first_set, parsed_or, string_or};
use super::environment::Environment;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
///
/// Access and refresh tokens may be signed with distinct keys. When no
/// refresh secret is configured the access secret signs both types.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,

    /// Secret used to sign refresh tokens (falls back to `access_secret`)
    #[serde(default)]
    pub refresh_secret: Option<String>,

    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,

    /// Clock-skew tolerance applied to expiry checks, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_seconds: i64,

    /// HMAC algorithm name (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_SECRET),
            refresh_secret: None,
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
            leeway_seconds: default_leeway(),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a single secret for both token types
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            access_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Read `JWT_*` variables; `JWT_ACCESS_SECRET` falls back to `JWT_SECRET`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_secret: first_set(&["JWT_ACCESS_SECRET", "JWT_SECRET"])
                .unwrap_or(defaults.access_secret),
            refresh_secret: first_set(&["JWT_REFRESH_SECRET"]),
            access_token_expiry_minutes: parsed_or(
                "JWT_ACCESS_TOKEN_EXPIRY_MINUTES",
                defaults.access_token_expiry_minutes,
            ),
            refresh_token_expiry_days: parsed_or(
                "JWT_REFRESH_TOKEN_EXPIRY_DAYS",
                defaults.refresh_token_expiry_days,
            ),
            leeway_seconds: parsed_or("JWT_LEEWAY_SECONDS", defaults.leeway_seconds).max(0),
            algorithm: string_or("JWT_ALGORITHM", &defaults.algorithm),
        }
    }

    /// Use a dedicated secret for refresh tokens
    pub fn with_refresh_secret(mut self, secret: impl Into<String>) -> Self {
        self.refresh_secret = Some(secret.into());
        self
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }

    /// Set the clock-skew tolerance
    pub fn with_leeway_seconds(mut self, seconds: i64) -> Self {
        self.leeway_seconds = seconds.max(0);
        self
    }

    /// Secret used for refresh tokens after applying the fallback
    pub fn refresh_secret(&self) -> &str {
        self.refresh_secret.as_deref().unwrap_or(&self.access_secret)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_SECRET || self.refresh_secret() == DEFAULT_SECRET
    }
}

/// Refresh-token cookie attributes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name
    pub name: String,

    /// Path scope; limits the cookie to refresh/logout capable routes
    pub path: String,

    /// Secure flag (HTTPS only); enabled in production
    pub secure: bool,

    /// SameSite attribute
    pub same_site: String,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("refresh_token"),
            path: String::from("/api/v1/auth"),
            secure: false,
            same_site: String::from("Lax"),
            http_only: default_http_only(),
        }
    }
}

impl CookieConfig {
    /// Cookie settings for an environment; `Secure` only in production
    pub fn for_environment(env: Environment) -> Self {
        Self {
            secure: env.is_production(),
            ..Default::default()
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh-token cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env(env: Environment) -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cookie: CookieConfig::for_environment(env),
        }
    }

    pub fn for_environment(env: Environment) -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookie: CookieConfig::for_environment(env),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

fn default_leeway() -> i64 {
    5
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_http_only() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry_minutes, 15);
        assert_eq!(config.refresh_token_expiry_days, 7);
        assert_eq!(config.leeway_seconds, 5);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_refresh_secret_falls_back_to_access_secret() {
        let config = JwtConfig::new("shared-secret");
        assert_eq!(config.refresh_secret(), "shared-secret");

        let config = config.with_refresh_secret("refresh-only");
        assert_eq!(config.access_secret, "shared-secret");
        assert_eq!(config.refresh_secret(), "refresh-only");
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14)
            .with_leeway_seconds(-3);

        assert_eq!(config.access_token_expiry_minutes, 30);
        assert_eq!(config.refresh_token_expiry_days, 14);
        assert_eq!(config.leeway_seconds, 0);
    }

    #[test]
    fn test_cookie_secure_only_in_production() {
        assert!(!CookieConfig::for_environment(Environment::Development).secure);
        assert!(!CookieConfig::for_environment(Environment::Staging).secure);

        let prod = CookieConfig::for_environment(Environment::Production);
        assert!(prod.secure);
        assert!(prod.http_only);
        assert_eq!(prod.same_site, "Lax");
        assert_eq!(prod.path, "/api/v1/auth");
    }
}
