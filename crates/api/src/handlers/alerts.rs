//! Handler for the alert query endpoint.

use axum::extract::{Query, State};
use axum::Json;
use drivesafe_db::models::alert::Alert;

use crate::error::AppResult;
use crate::query::LimitParams;
use crate::state::AppState;

/// GET /api/alerts?limit=N
///
/// Most recent alerts, newest first.
pub async fn list_recent(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<Vec<Alert>>> {
    let alerts = state.store.recent_alerts(params.resolve()).await?;
    Ok(Json(alerts))
}
