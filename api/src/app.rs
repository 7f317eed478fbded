//! Application factory
//!
//! Builds the Actix-web application from an `AppState`. The server binary and
//! the integration tests both go through `create_app`.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use ak_core::repositories::AccountRepository;
use ak_core::services::auth::PasswordVerifier;
use ak_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{
    login::login, logout::logout, me::me, refresh::refresh, signup::signup, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<A, P>(
    app_state: web::Data<AppState<A, P>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    P: PasswordVerifier + 'static,
{
    // JwtAuth looks the token service up by type
    let token_service = web::Data::from(app_state.auth_service.token_service().clone());

    App::new()
        .app_data(app_state)
        .app_data(token_service)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<A, P>))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/signup", web::post().to(signup::<A, P>))
                    .route("/login", web::post().to(login::<A, P>))
                    .route("/refresh", web::post().to(refresh::<A, P>))
                    .route("/logout", web::post().to(logout::<A, P>))
                    .service(
                        web::resource("/me")
                            .wrap(JwtAuth::new())
                            .route(web::get().to(me::<A, P>)),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// 503 when any registered backing service fails its check.
async fn health_check<A, P>(state: web::Data<AppState<A, P>>) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: PasswordVerifier + 'static,
{
    let response = state.health.run().await;
    if response.is_healthy() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
