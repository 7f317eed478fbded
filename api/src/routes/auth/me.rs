use actix_web::{web, HttpResponse};

use ak_core::repositories::AccountRepository;
use ak_core::services::auth::PasswordVerifier;

use crate::dto::MeResponse;
use crate::handlers::error_handler::ApiError;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/auth/me
///
/// Requires a valid access token; see `JwtAuth`. Responds 404 when the
/// token outlived its account.
pub async fn me<A, P>(
    state: web::Data<AppState<A, P>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    P: PasswordVerifier + 'static,
{
    let account = state.auth_service.current_account(auth.account_id).await?;

    Ok(HttpResponse::Ok().json(MeResponse {
        account: account.into(),
        expires_at: auth.expires_at,
    }))
}
