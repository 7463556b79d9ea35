// crates/backend-lib/tests/http_api.rs
//! Route-level tests driven through the router with `tower::ServiceExt`.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use backend_lib::http::create_router;
use backend_lib::store::CredentialStore;
use common::{backend, TestBackend};

const PASSWORD: &str = "correct horse battery staple";

fn router(b: &TestBackend) -> Router {
    create_router(b.state.clone())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn signup_returns_created_profile_with_camel_case_fields() {
    let b = backend();
    let app = router(&b);

    let (status, body) = post_json(
        &app,
        "/auth/signUp",
        json!({
            "email": "Ada@Example.com",
            "password": PASSWORD,
            "firstName": "Ada",
            "lastName": "Lovelace",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["lastName"], "Lovelace");
    assert!(body["id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
    assert!(body["accountId"]
        .as_str()
        .unwrap()
        .parse::<uuid::Uuid>()
        .is_ok());
}

#[tokio::test]
async fn signup_rejects_invalid_payloads() {
    let b = backend();
    let app = router(&b);

    let cases = [
        json!({"email": "not-an-email", "password": PASSWORD, "firstName": "Ada", "lastName": "Lovelace"}),
        json!({"email": "ada@example.com", "password": "short", "firstName": "Ada", "lastName": "Lovelace"}),
        json!({"email": "ada@example.com", "password": PASSWORD, "firstName": "<script>", "lastName": "Lovelace"}),
        json!({"email": "ada@example.com", "password": PASSWORD, "firstName": "Ada", "lastName": "Lovelace", "preference": 0}),
        json!({"email": "ada@example.com", "password": PASSWORD, "firstName": "Ada", "lastName": "Lovelace", "preference": 11}),
    ];

    for case in cases {
        let (status, body) = post_json(&app, "/auth/signUp", case.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {case}");
        assert_eq!(error_code(&body), "VAL_001", "payload: {case}");
    }

    // nothing was created along the way
    assert!(b
        .credentials
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_signup_is_forbidden() {
    let b = backend();
    let app = router(&b);

    let payload = json!({
        "email": "ada@example.com",
        "password": PASSWORD,
        "firstName": "Ada",
        "lastName": "Lovelace",
    });

    let (status, _) = post_json(&app, "/auth/signUp", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/auth/signUp", payload).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "ACCT_001");
}

#[tokio::test]
async fn login_distinguishes_unverified_from_unknown() {
    let b = backend();
    let app = router(&b);

    let (status, body) = post_json(
        &app,
        "/auth/login",
        json!({"email": "nobody@example.com", "password": PASSWORD}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "AUTH_001");

    post_json(
        &app,
        "/auth/signUp",
        json!({
            "email": "ada@example.com",
            "password": PASSWORD,
            "firstName": "Ada",
            "lastName": "Lovelace",
        }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/auth/login",
        json!({"email": "ada@example.com", "password": PASSWORD}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "AUTH_002");
}

#[tokio::test]
async fn verification_flow_over_http() {
    let b = backend();
    let app = router(&b);

    post_json(
        &app,
        "/auth/signUp",
        json!({
            "email": "ada@example.com",
            "password": PASSWORD,
            "firstName": "Ada",
            "lastName": "Lovelace",
        }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/auth/verifyEmail/verify",
        json!({"email": "ada@example.com", "code": "000000"}),
    )
    .await;
    // six digits of the wrong value pass validation but fail verification
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "VERIFY_002");

    let code = b.email.last_code().await.unwrap();
    let (status, body) = post_json(
        &app,
        "/auth/verifyEmail/verify",
        json!({"email": "Ada@Example.com", "code": code}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["accessToken"].as_str().unwrap().is_empty());

    // a verified account cannot verify or resend again
    let (status, body) = post_json(
        &app,
        "/auth/verifyEmail/verify",
        json!({"email": "ada@example.com", "code": code}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "VERIFY_001");

    let (status, body) = post_json(
        &app,
        "/auth/verifyEmail/resend",
        json!({"email": "ada@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "VERIFY_001");

    let (status, body) = post_json(
        &app,
        "/auth/login",
        json!({"email": "ada@example.com", "password": PASSWORD}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["accessToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn resend_reports_dispatch_status() {
    let b = backend();
    let app = router(&b);

    let (status, body) = post_json(
        &app,
        "/auth/verifyEmail/resend",
        json!({"email": "nobody@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "ACCT_002");

    post_json(
        &app,
        "/auth/signUp",
        json!({
            "email": "ada@example.com",
            "password": PASSWORD,
            "firstName": "Ada",
            "lastName": "Lovelace",
        }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/auth/verifyEmail/resend",
        json!({"email": "ada@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    b.email.set_failing(true);
    let (status, body) = post_json(
        &app,
        "/auth/verifyEmail/resend",
        json!({"email": "ada@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn password_reset_over_http() {
    let b = backend();
    let app = router(&b);

    // unknown emails get the same fixed success
    let (status, body) = post_json(
        &app,
        "/auth/password/forgot",
        json!({"email": "nobody@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "FORGOT_PASSWORD_SUCCESS");

    post_json(
        &app,
        "/auth/signUp",
        json!({
            "email": "ada@example.com",
            "password": PASSWORD,
            "firstName": "Ada",
            "lastName": "Lovelace",
        }),
    )
    .await;
    let code = b.email.last_code().await.unwrap();
    post_json(
        &app,
        "/auth/verifyEmail/verify",
        json!({"email": "ada@example.com", "code": code}),
    )
    .await;

    // resetting before any forgot request finds no token
    let (status, body) = post_json(
        &app,
        "/auth/password/reset",
        json!({"email": "ada@example.com", "password": "a different password", "code": "123456"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "RESET_001");

    let (status, body) = post_json(
        &app,
        "/auth/password/forgot",
        json!({"email": "ada@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "FORGOT_PASSWORD_SUCCESS");
    let reset_code = b.email.last_code().await.unwrap();

    let wrong_code = if reset_code == "999999" { "000000" } else { "999999" };
    let (status, body) = post_json(
        &app,
        "/auth/password/reset",
        json!({"email": "ada@example.com", "password": "a different password", "code": wrong_code}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "RESET_002");

    let (status, body) = post_json(
        &app,
        "/auth/password/reset",
        json!({"email": "ada@example.com", "password": "a different password", "code": reset_code}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "FORGOT_PASSWORD_RESET_SUCCESS");

    let (status, _) = post_json(
        &app,
        "/auth/login",
        json!({"email": "ada@example.com", "password": "a different password"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn transport_level_rejections() {
    let b = backend();
    let app = router(&b);

    // missing field
    let (status, _) = post_json(&app, "/auth/login", json!({"email": "ada@example.com"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // invalid JSON syntax
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // missing content type
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    // unknown routes fall through
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/unknown")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
