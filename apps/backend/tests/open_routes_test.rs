//! The health check and the API banner are reachable without a token.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use serde_json::Value;

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let state = web::Data::new(AppState::without_db(SecurityConfig::default()));
    let app = test::init_service(App::new().app_data(state).configure(routes::configure)).await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn health_needs_no_token() {
    let (status, body) = get_json("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
}

#[actix_web::test]
async fn banner_lists_endpoints() {
    let (status, body) = get_json("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sales Management API");
    let endpoints = body["endpoints"].as_array().expect("endpoints array");
    assert!(endpoints
        .iter()
        .any(|e| e == "POST /api/auth/login"));
}
