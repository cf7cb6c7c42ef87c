//! Route definitions for sensor reading queries.

use axum::routing::get;
use axum::Router;

use crate::handlers::readings;
use crate::state::AppState;

/// ```text
/// GET /sensor-readings           -> list_recent
/// GET /sensor-readings/latest    -> get_latest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sensor-readings", get(readings::list_recent))
        .route("/sensor-readings/latest", get(readings::get_latest))
}
