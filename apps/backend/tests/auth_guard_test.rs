//! End-to-end tests for the access guard: token extraction, verification
//! and claim propagation to handlers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use actix_http::Request;
use actix_web::body::{to_bytes, BoxBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, Error};
use backend::auth::jwt::mint_token;
use backend::extractors::current_user::CurrentUser;
use backend::middleware::auth_guard::AuthGuard;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use serde_json::Value;

const HOUR: Duration = Duration::from_secs(60 * 60);

/// Protected handler that records each invocation and echoes the caller.
async fn me(user: CurrentUser, hits: web::Data<Arc<AtomicUsize>>) -> web::Json<CurrentUser> {
    hits.fetch_add(1, Ordering::SeqCst);
    web::Json(user)
}

async fn build_guarded_app(
    security: SecurityConfig,
    hits: Arc<AtomicUsize>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let state = web::Data::new(AppState::without_db(security));

    test::init_service(
        App::new()
            .app_data(state)
            .app_data(web::Data::new(hits))
            .service(
                web::scope("/api/private")
                    .wrap(AuthGuard)
                    .route("/me", web::get().to(me)),
            ),
    )
    .await
}

/// Call a request expected to be rejected by the guard; returns the status
/// and the JSON error body.
async fn call_and_capture_error<S>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let err = app.call(req).await.expect_err("expected guard rejection");
    let resp = err.error_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body()).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("JSON error body");
    (status, body)
}

#[actix_web::test]
async fn missing_header_is_401_and_handler_never_runs() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = build_guarded_app(SecurityConfig::default(), hits.clone()).await;

    let req = test::TestRequest::get().uri("/api/private/me").to_request();
    let (status, body) = call_and_capture_error(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access token required");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn malformed_header_counts_as_no_token() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = build_guarded_app(SecurityConfig::default(), hits.clone()).await;

    for header in ["Token abc", "Bearer", "Bearer "] {
        let req = test::TestRequest::get()
            .uri("/api/private/me")
            .insert_header(("Authorization", header))
            .to_request();
        let (status, body) = call_and_capture_error(&app, req).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {header:?}");
        assert_eq!(body["error"], "Access token required");
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn garbage_token_is_403_and_handler_never_runs() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = build_guarded_app(SecurityConfig::default(), hits.clone()).await;

    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let (status, body) = call_and_capture_error(&app, req).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid token");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn wrong_secret_is_403() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = build_guarded_app(SecurityConfig::new("secret-A".as_bytes()), hits.clone()).await;

    let other = SecurityConfig::new("secret-B".as_bytes());
    let token = mint_token(1, "a@b.com", None, HOUR, SystemTime::now(), &other).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let (status, body) = call_and_capture_error(&app, req).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid token");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn expired_token_is_403() {
    let security = SecurityConfig::default();
    let hits = Arc::new(AtomicUsize::new(0));
    let app = build_guarded_app(security.clone(), hits.clone()).await;

    // Issued two hours ago with a one-hour TTL
    let issued_at = SystemTime::now() - 2 * HOUR;
    let token = mint_token(42, "a@b.com", None, HOUR, issued_at, &security).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let (status, body) = call_and_capture_error(&app, req).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid token");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_claims() {
    let security = SecurityConfig::default();
    let hits = Arc::new(AtomicUsize::new(0));
    let app = build_guarded_app(security.clone(), hits.clone()).await;

    let token = mint_token(
        42,
        "a@b.com",
        Some("Ana"),
        HOUR,
        SystemTime::now(),
        &security,
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let user: CurrentUser = test::read_body_json(resp).await;
    assert_eq!(user.user_id, 42);
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.name.as_deref(), Some("Ana"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
