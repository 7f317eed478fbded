use actix_web::{web, HttpRequest, HttpResponse};

use ak_core::repositories::AccountRepository;
use ak_core::services::auth::PasswordVerifier;
use ak_core::services::token::LogoutOutcome;

use crate::cookies::clear_refresh_cookie;
use crate::dto::{LogoutResponse, RefreshTokenRequest};
use crate::handlers::error_handler::ApiError;

use super::{presented_refresh_token, AppState};

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented refresh token and clears the cookie. Logging out
/// without a token succeeds. Access tokens already handed out stay valid
/// until they expire.
///
/// ## Errors
/// - 401 Unauthorized: Token present but not signed by this server
/// - 503 Service Unavailable: Revocation store unreachable under fail-closed
pub async fn logout<A, P>(
    req: HttpRequest,
    state: web::Data<AppState<A, P>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    P: PasswordVerifier + 'static,
{
    let presented = presented_refresh_token(&req, &state.cookie, body.as_deref());

    let outcome = state
        .auth_service
        .logout(presented.as_ref().map(|token| token.value()))
        .await?;

    if let LogoutOutcome::RevocationSkipped { account_id } = outcome {
        tracing::warn!(account_id, "Logout completed without revocation");
    }

    Ok(HttpResponse::Ok()
        .cookie(clear_refresh_cookie(&state.cookie))
        .json(LogoutResponse {
            message: String::from("Logged out successfully"),
        }))
}
