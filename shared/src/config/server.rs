//! HTTP listener settings

use serde::{Deserialize, Serialize};

use super::env::{parsed_or, string_or};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Actix worker count; 0 keeps the actix default
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 8080)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            workers: 0,
        }
    }

    /// `SERVER_HOST`, `SERVER_PORT`, `SERVER_WORKERS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: string_or("SERVER_HOST", &defaults.host),
            port: parsed_or("SERVER_PORT", defaults.port),
            workers: parsed_or("SERVER_WORKERS", defaults.workers),
        }
    }

    /// `host:port` for `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("0.0.0.0", 9000);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.workers, 0);
        assert_eq!(ServerConfig::default().bind_address(), "127.0.0.1:8080");
    }
}
