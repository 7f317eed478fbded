//! Refresh-token cookie handling

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

use ak_shared::config::CookieConfig;

/// Cookie carrying a freshly issued refresh token
pub fn refresh_cookie(config: &CookieConfig, token: &str, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(config.name.clone(), token.to_string())
        .path(config.path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(&config.same_site))
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// Expired, empty cookie that makes the browser drop the refresh token
pub fn clear_refresh_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build(config.name.clone(), String::new())
        .path(config.path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(&config.same_site))
        .max_age(Duration::ZERO)
        .finish()
}

/// Refresh token from the cookie, ignoring an empty value
pub fn refresh_token_from_cookie(req: &HttpRequest, config: &CookieConfig) -> Option<String> {
    req.cookie(&config.name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

fn same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}
