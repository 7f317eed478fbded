//! Dependency health checks behind `GET /health`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

use ak_infra::{DatabasePool, InfrastructureError, RedisClient};

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual service health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl ServiceHealth {
    fn from_check(result: Result<bool, InfrastructureError>, started: Instant) -> Self {
        let response_time_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(true) => Self {
                status: HealthStatus::Healthy,
                message: None,
                response_time_ms,
            },
            Ok(false) => Self {
                status: HealthStatus::Unhealthy,
                message: Some("unexpected response".to_string()),
                response_time_ms,
            },
            Err(e) => Self {
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
                response_time_ms,
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Unhealthy when any checked service is
    pub status: HealthStatus,
    pub services: HashMap<String, ServiceHealth>,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn from_services(services: HashMap<String, ServiceHealth>) -> Self {
        let status = if services
            .values()
            .all(|service| service.status == HealthStatus::Healthy)
        {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Self {
            status,
            services,
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Backing services checked on each health request
///
/// Only registered services are checked. Redis is registered only when it
/// backs the revocation store.
#[derive(Clone, Default)]
pub struct HealthChecks {
    database: Option<DatabasePool>,
    redis: Option<RedisClient>,
}

impl HealthChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }

    pub fn with_redis(mut self, redis: Option<RedisClient>) -> Self {
        self.redis = redis;
        self
    }

    pub async fn run(&self) -> HealthResponse {
        let mut services = HashMap::new();

        if let Some(database) = &self.database {
            let started = Instant::now();
            let result = database.health_check().await;
            services.insert("database".to_string(), ServiceHealth::from_check(result, started));
        }

        if let Some(redis) = &self.redis {
            let started = Instant::now();
            let result = redis.health_check().await;
            services.insert("redis".to_string(), ServiceHealth::from_check(result, started));
        }

        let response = HealthResponse::from_services(services);
        if !response.is_healthy() {
            tracing::warn!(services = ?response.services, "Health check failed");
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_check_marks_response_unhealthy() {
        let started = Instant::now();
        let mut services = HashMap::new();
        services.insert(
            "database".to_string(),
            ServiceHealth::from_check(Ok(true), started),
        );
        services.insert(
            "redis".to_string(),
            ServiceHealth::from_check(
                Err(InfrastructureError::Config("connection refused".to_string())),
                started,
            ),
        );

        let response = HealthResponse::from_services(services);
        assert_eq!(response.status, HealthStatus::Unhealthy);
        assert_eq!(response.services["database"].status, HealthStatus::Healthy);
        assert_eq!(
            response.services["redis"].message.as_deref(),
            Some("Configuration error: connection refused")
        );
    }

    #[test]
    fn test_unexpected_reply_is_unhealthy() {
        let health = ServiceHealth::from_check(Ok(false), Instant::now());
        assert_eq!(health.status, HealthStatus::Unhealthy);
    }

    #[actix_web::test]
    async fn test_nothing_registered_is_healthy() {
        let response = HealthChecks::new().run().await;
        assert!(response.is_healthy());
        assert!(response.services.is_empty());
    }
}
