//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use marquee_api::error::AppError;
use marquee_core::error::CoreError;
use marquee_gateway::GatewayError;
use marquee_session::SessionError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Character",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Character with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("page must be at least 1".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "page must be at least 1");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("invalid body".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid body");
}

#[tokio::test]
async fn internal_error_hides_details() {
    let err = AppError::Core(CoreError::Internal("lock poisoned".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn catalog_error_returns_502_with_user_message() {
    let err = AppError::Catalog(GatewayError::Status {
        status: 429,
        body: "slow down".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "CATALOG_ERROR");
    assert_eq!(json["error"], "API Error: 429");
}

#[tokio::test]
async fn session_unavailable_returns_503() {
    let (status, json) = error_to_response(AppError::SessionUnavailable).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SESSION_UNAVAILABLE");
}

#[test]
fn session_errors_convert_by_kind() {
    let invalid = SessionError::Invalid(CoreError::Validation("bad".into()));
    assert_matches!(AppError::from(invalid), AppError::Core(CoreError::Validation(_)));
    assert_matches!(AppError::from(SessionError::Closed), AppError::SessionUnavailable);
    assert_matches!(AppError::from(SessionError::Timeout), AppError::SessionUnavailable);
}
