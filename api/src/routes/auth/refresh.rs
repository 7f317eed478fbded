use actix_web::{web, HttpRequest, HttpResponse};

use ak_core::errors::TokenError;
use ak_core::repositories::AccountRepository;
use ak_core::services::auth::PasswordVerifier;

use crate::cookies::refresh_cookie;
use crate::dto::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error_handler::ApiError;

use super::{presented_refresh_token, AppState};

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the presented refresh token: the old one is revoked and a new pair
/// is issued. The token is read from the cookie, or from a JSON body of the
/// form `{"refresh_token": "..."}`. Body callers get the new refresh token in
/// the response body as well as the cookie.
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired, wrong-type or revoked token
/// - 503 Service Unavailable: Revocation store unreachable under fail-closed
pub async fn refresh<A, P>(
    req: HttpRequest,
    state: web::Data<AppState<A, P>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    P: PasswordVerifier + 'static,
{
    let presented = presented_refresh_token(&req, &state.cookie, body.as_deref())
        .ok_or(TokenError::MissingToken)?;

    let rotated = state.auth_service.refresh(presented.value()).await?;

    let cookie = refresh_cookie(
        &state.cookie,
        &rotated.tokens.refresh_token,
        rotated.tokens.refresh_expires_in,
    );

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(TokenResponse::from_pair(&rotated.tokens, presented.from_body())))
}
