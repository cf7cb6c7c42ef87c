//! Route definitions for alert queries.

use axum::routing::get;
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// ```text
/// GET /alerts     -> list_recent
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/alerts", get(alerts::list_recent))
}
