//! Route definitions for telemetry ingestion.

use axum::routing::post;
use axum::Router;

use crate::handlers::telemetry;
use crate::state::AppState;

/// ```text
/// POST /telemetry     -> ingest_telemetry
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/telemetry", post(telemetry::ingest_telemetry))
}
