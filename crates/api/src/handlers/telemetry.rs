//! Handler for device telemetry ingestion.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use drivesafe_core::telemetry::TelemetrySample;
use drivesafe_db::models::alert::Alert;
use drivesafe_db::models::sensor_reading::SensorReading;
use serde::Serialize;

use crate::error::AppResult;
use crate::ingest::ingest;
use crate::state::AppState;

/// Response body for a successful ingest.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub reading: SensorReading,
    pub alerts: Vec<Alert>,
}

/// POST /api/telemetry
///
/// Validate one sample, persist it, raise and persist alerts, and push the
/// update to connected dashboards. The body is taken as raw bytes so every
/// shape problem comes back as a field-level 400, including bodies that
/// are not JSON at all.
pub async fn ingest_telemetry(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<IngestResponse>> {
    let sample = TelemetrySample::from_slice(&body).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected telemetry payload");
    })?;

    let outcome = ingest(
        state.store.as_ref(),
        &state.ws_manager,
        &state.thresholds,
        &sample,
    )
    .await?;

    Ok(Json(IngestResponse {
        success: true,
        reading: outcome.reading,
        alerts: outcome.alerts,
    }))
}
