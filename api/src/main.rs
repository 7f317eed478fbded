use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use ak_api::app::create_app;
use ak_api::health::HealthChecks;
use ak_api::routes::auth::AppState;
use ak_api::telemetry::init_tracing;
use ak_core::services::auth::AuthService;
use ak_core::services::token::{RevocationSweeper, TokenService, TokenServiceConfig};
use ak_infra::{build_revocation_store, BcryptPasswordVerifier, DatabasePool, MySqlAccountRepository};
use ak_shared::config::{AppConfig, Environment, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Subscriber first so rejected settings below are logged
    init_tracing(&LoggingConfig::from_env(Environment::from_env()));
    let config = AppConfig::from_env();

    tracing::info!(environment = ?config.environment, "Starting AuthKeep API server");

    if config.auth.jwt.is_using_default_secret() {
        if config.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        tracing::warn!("Using the default JWT secret; set JWT_SECRET before deploying");
    }

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;

    let revocation = build_revocation_store(&config.revocation, &config.cache, &database)
        .await
        .context("failed to build the revocation store")?;
    let store = revocation.store;

    let token_config = TokenServiceConfig::from_settings(&config.auth.jwt, &config.revocation)
        .context("invalid token configuration")?;
    let token_service = Arc::new(
        TokenService::new(token_config, store.clone()).context("failed to build token service")?,
    );

    let sweeper = Arc::new(RevocationSweeper::new(
        store,
        config.revocation.sweep_interval_seconds,
    ));
    let _sweeper_handle = sweeper.start_background_task();

    let auth_service = Arc::new(AuthService::new(
        Arc::new(MySqlAccountRepository::new(database.get_pool().clone())),
        Arc::new(BcryptPasswordVerifier::new()),
        token_service,
    ));
    let health = HealthChecks::new()
        .with_database(database.clone())
        .with_redis(revocation.redis);
    let app_state = web::Data::new(
        AppState::new(auth_service, config.auth.cookie.clone()).with_health_checks(health),
    );

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    // Zero keeps the actix default of one worker per core
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    Ok(())
}
