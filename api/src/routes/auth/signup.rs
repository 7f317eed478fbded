use actix_web::{web, HttpResponse};
use validator::Validate;

use ak_core::repositories::AccountRepository;
use ak_core::services::auth::{PasswordVerifier, SignupInput};

use crate::dto::{SignupRequest, SignupResponse};
use crate::handlers::error_handler::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/signup
///
/// Creates the account and returns it. No tokens are issued.
///
/// ## Errors
/// - 400 Bad Request: Malformed email, short password or missing names
/// - 409 Conflict: Email already registered
pub async fn signup<A, P>(
    state: web::Data<AppState<A, P>>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    P: PasswordVerifier + 'static,
{
    request.validate()?;

    let request = request.into_inner();
    let account = state
        .auth_service
        .signup(SignupInput {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
        })
        .await?;

    Ok(HttpResponse::Created().json(SignupResponse {
        account: account.into(),
    }))
}
