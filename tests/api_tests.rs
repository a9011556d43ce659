// HTTP-surface tests that exercise the router without a database: the auth
// gate, input validation, and the logo upload filter all fail before any
// repository call.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use common::{extract_json, multipart_body, test_app};

const BOUNDARY: &str = "test-boundary-7f93a1";

fn multipart_request(uri: &str, method: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_liveness_returns_ok() {
    let request = Request::builder()
        .uri("/api/health/live")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response).await;
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_profile_without_token_is_unauthorized() {
    let request = Request::builder()
        .uri("/api/companies/profile")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = extract_json(response).await;
    assert_eq!(body["message"], "Access token required");
}

#[tokio::test]
async fn test_profile_with_corrupted_token_is_forbidden() {
    let request = Request::builder()
        .uri("/api/companies/profile")
        .header("Authorization", "Bearer e30.e30.corrupted")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = extract_json(response).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_update_profile_without_token_is_unauthorized() {
    let body = multipart_body(BOUNDARY, &[("city", "Pune")], None);
    let request = multipart_request("/api/companies/profile", "PUT", body);
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_with_missing_fields_is_rejected() {
    let body = multipart_body(BOUNDARY, &[("name", "Acme Exports")], None);
    let request = multipart_request("/api/companies/register", "POST", body);
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response).await;
    assert_eq!(body["message"], "Name, email, phone, and password are required");
}

#[tokio::test]
async fn test_register_with_oversized_logo_is_rejected() {
    let oversized = vec![0u8; 6 * 1024 * 1024];
    let body = multipart_body(
        BOUNDARY,
        &[
            ("name", "Acme Exports"),
            ("email", "ops@acme.example"),
            ("phone", "9876543210"),
            ("password", "testpassword123"),
        ],
        Some(("image/png", &oversized)),
    );
    let request = multipart_request("/api/companies/register", "POST", body);
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response).await;
    assert_eq!(body["message"], "File too large");
}

#[tokio::test]
async fn test_register_with_non_image_logo_is_rejected() {
    let body = multipart_body(
        BOUNDARY,
        &[
            ("name", "Acme Exports"),
            ("email", "ops@acme.example"),
            ("phone", "9876543210"),
            ("password", "testpassword123"),
        ],
        Some(("text/plain", b"not an image")),
    );
    let request = multipart_request("/api/companies/register", "POST", body);
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response).await;
    assert_eq!(body["message"], "Only image files are allowed!");
}

#[tokio::test]
async fn test_register_with_bad_incorporation_date_is_rejected() {
    let body = multipart_body(
        BOUNDARY,
        &[
            ("name", "Acme Exports"),
            ("email", "ops@acme.example"),
            ("phone", "9876543210"),
            ("password", "testpassword123"),
            ("incorporation_date", "01/04/2019"),
        ],
        None,
    );
    let request = multipart_request("/api/companies/register", "POST", body);
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_missing_fields_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/companies/login")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response).await;
    assert_eq!(body["message"], "Email and password are required");
}

#[tokio::test]
async fn test_otp_endpoints_are_not_implemented() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/companies/otp/send")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"phone": "9876543210"}"#))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

    let request = Request::builder()
        .method("POST")
        .uri("/api/companies/otp/verify")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"phone": "9876543210", "code": "123456"}"#))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}
