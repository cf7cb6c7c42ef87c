pub mod alerts;
pub mod health;
pub mod readings;
pub mod telemetry;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /telemetry                  ingest one sample (POST)
///
/// /sensor-readings            recent readings (?limit=N)
/// /sensor-readings/latest     latest reading
///
/// /alerts                     recent alerts (?limit=N)
/// ```
///
/// The real-time channel (`/ws`) and `/health` live at the root.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(telemetry::router())
        .merge(readings::router())
        .merge(alerts::router())
}
