//! Handlers for the sensor reading query endpoints.

use axum::extract::{Query, State};
use axum::Json;
use drivesafe_core::error::CoreError;
use drivesafe_db::models::sensor_reading::SensorReading;

use crate::error::AppResult;
use crate::query::LimitParams;
use crate::state::AppState;

/// GET /api/sensor-readings?limit=N
///
/// Most recent readings, newest first.
pub async fn list_recent(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<Vec<SensorReading>>> {
    let readings = state.store.recent_readings(params.resolve()).await?;
    Ok(Json(readings))
}

/// GET /api/sensor-readings/latest
///
/// The single most recent reading, or 404 when nothing has been ingested.
pub async fn get_latest(State(state): State<AppState>) -> AppResult<Json<SensorReading>> {
    let reading = state
        .store
        .latest_reading()
        .await?
        .ok_or(CoreError::NotFound {
            entity: "sensor readings",
        })?;
    Ok(Json(reading))
}
