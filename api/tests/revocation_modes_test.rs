use actix_web::{http::StatusCode, test};
use serde_json::Value;
use std::sync::Arc;

use ak_api::app::create_app;
use ak_api::dto::LoginResponse;
use ak_core::domain::clock::SystemClock;
use ak_core::repositories::DisabledRevocationStore;
use ak_shared::config::StoreFailurePolicy;

mod common;
use common::*;

#[actix_web::test]
async fn test_disabled_mode_accepts_replayed_refresh_tokens() {
    let state = build_state(
        Arc::new(DisabledRevocationStore),
        StoreFailurePolicy::FailClosed,
        Arc::new(SystemClock),
    );
    let app = test::init_service(create_app(state)).await;

    let resp = test::call_service(&app, login_request().to_request()).await;
    let refresh_token = refresh_cookie(&resp).unwrap().value().to_string();

    let resp = test::call_service(&app, logout_with_cookie(&refresh_token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Nothing was recorded, so the token keeps working after logout and rotation
    for _ in 0..2 {
        let resp = test::call_service(&app, refresh_with_cookie(&refresh_token).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn test_unreachable_store_fails_closed() {
    let state = build_state(
        Arc::new(UnreachableStore),
        StoreFailurePolicy::FailClosed,
        Arc::new(SystemClock),
    );
    let app = test::init_service(create_app(state)).await;

    // Login and access checks never touch the store
    let resp = test::call_service(&app, login_request().to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let refresh_token = refresh_cookie(&resp).unwrap().value().to_string();
    let login: LoginResponse = test::read_body_json(resp).await;

    let resp = test::call_service(&app, me_with_bearer(&login.tokens.access_token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, refresh_with_cookie(&refresh_token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SERVICE_UNAVAILABLE");

    let resp = test::call_service(&app, logout_with_cookie(&refresh_token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_unreachable_store_fails_open() {
    let state = build_state(
        Arc::new(UnreachableStore),
        StoreFailurePolicy::FailOpen,
        Arc::new(SystemClock),
    );
    let app = test::init_service(create_app(state)).await;

    let resp = test::call_service(&app, login_request().to_request()).await;
    let refresh_token = refresh_cookie(&resp).unwrap().value().to_string();

    let resp = test::call_service(&app, refresh_with_cookie(&refresh_token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, logout_with_cookie(&refresh_token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
