#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use drivesafe_api::config::ServerConfig;
use drivesafe_api::router::build_app_router;
use drivesafe_api::state::AppState;
use drivesafe_api::ws::WsManager;
use drivesafe_core::alert::{AlertDraft, AlertKind};
use drivesafe_core::telemetry::TelemetrySample;
use drivesafe_core::thresholds::DEFAULT_THRESHOLDS;
use drivesafe_db::models::alert::Alert;
use drivesafe_db::models::sensor_reading::SensorReading;
use drivesafe_db::{MemoryReadingStore, ReadingStore, StoreError};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
        memory_store_capacity: 1_000,
    }
}

/// Application state around the given store with a fresh subscriber registry.
pub fn test_state(store: Arc<dyn ReadingStore>) -> AppState {
    AppState {
        store,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        thresholds: Arc::new(DEFAULT_THRESHOLDS),
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

/// Router plus state backed by a fresh in-memory store.
pub fn memory_app() -> (Router, AppState) {
    let state = test_state(Arc::new(MemoryReadingStore::new()));
    (build_test_app(state.clone()), state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A sample body with every value inside the safe range.
pub fn safe_body() -> serde_json::Value {
    serde_json::json!({
        "speed": 60.0,
        "acceleration": 1.0,
        "braking": 0.5,
        "tilt": 3.0,
        "rotationRate": 10.0,
        "isCrash": false,
    })
}

/// Store double that delegates to memory but can be told to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryReadingStore,
    /// Fail every `append_reading`.
    pub fail_readings: bool,
    /// Fail `append_alert` for these alert kinds only.
    pub fail_alert_kinds: Vec<AlertKind>,
    /// Fail every read.
    pub fail_reads: bool,
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl ReadingStore for FlakyStore {
    async fn append_reading(&self, sample: &TelemetrySample) -> Result<SensorReading, StoreError> {
        if self.fail_readings {
            return Err(unavailable());
        }
        self.inner.append_reading(sample).await
    }

    async fn append_alert(&self, draft: &AlertDraft) -> Result<Alert, StoreError> {
        if self.fail_alert_kinds.contains(&draft.kind) {
            return Err(unavailable());
        }
        self.inner.append_alert(draft).await
    }

    async fn recent_readings(&self, limit: i64) -> Result<Vec<SensorReading>, StoreError> {
        if self.fail_reads {
            return Err(unavailable());
        }
        self.inner.recent_readings(limit).await
    }

    async fn latest_reading(&self) -> Result<Option<SensorReading>, StoreError> {
        if self.fail_reads {
            return Err(unavailable());
        }
        self.inner.latest_reading().await
    }

    async fn recent_alerts(&self, limit: i64) -> Result<Vec<Alert>, StoreError> {
        if self.fail_reads {
            return Err(unavailable());
        }
        self.inner.recent_alerts(limit).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.fail_reads {
            return Err(unavailable());
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}
