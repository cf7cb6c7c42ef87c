//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use drivesafe_api::error::AppError;
use drivesafe_core::error::{CoreError, FieldIssue};
use drivesafe_db::StoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 with NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "sensor readings",
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No sensor readings found");
    assert!(json.get("details").is_none());
}

// ---------------------------------------------------------------------------
// Test: CoreError::InvalidSample maps to 400 with field details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_sample_returns_400_with_details() {
    let err = AppError::Core(CoreError::InvalidSample(vec![
        FieldIssue::new("speed", "Required"),
        FieldIssue::new("isCrash", "Expected boolean, received number"),
    ]));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid sensor data format");
    assert_eq!(
        json["details"],
        serde_json::json!([
            { "field": "speed", "message": "Required" },
            { "field": "isCrash", "message": "Expected boolean, received number" },
        ])
    );
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Unknown alert type: Drift".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Unknown alert type: Drift");
}

// ---------------------------------------------------------------------------
// Test: storage errors map to 500 and do not leak details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn storage_error_returns_500_and_sanitizes_message() {
    let err = AppError::Storage(StoreError::Unavailable(
        "password authentication failed for user drivesafe".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
    assert_eq!(json["error"], "Storage is unavailable");
    assert!(
        !json.to_string().contains("password"),
        "Storage error response must not leak driver details"
    );
}

#[tokio::test]
async fn sqlx_errors_convert_to_storage_errors() {
    let err: AppError = StoreError::from(sqlx::Error::PoolTimedOut).into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
}
