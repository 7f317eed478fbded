use actix_web::{web, HttpResponse};
use validator::Validate;

use ak_core::repositories::AccountRepository;
use ak_core::services::auth::PasswordVerifier;

use crate::cookies::refresh_cookie;
use crate::dto::{LoginRequest, LoginResponse, TokenResponse};
use crate::handlers::error_handler::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Checks email and password, then issues an access token in the body and a
/// refresh token in an HttpOnly cookie.
///
/// ## Errors
/// - 400 Bad Request: Malformed email or empty password
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
/// - 500 Internal Server Error: Account lookup or signing failure
pub async fn login<A, P>(
    state: web::Data<AppState<A, P>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    P: PasswordVerifier + 'static,
{
    request.validate()?;

    let result = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    let cookie = refresh_cookie(
        &state.cookie,
        &result.tokens.refresh_token,
        result.tokens.refresh_expires_in,
    );

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        account_id: result.account_id,
        tokens: TokenResponse::from_pair(&result.tokens, false),
    }))
}
