//! Repository for the `alerts` table.

use drivesafe_core::alert::AlertDraft;
use sqlx::PgPool;

use crate::models::alert::Alert;

/// Column list for `alerts` SELECT queries.
const COLUMNS: &str = "id, \"type\", severity, value, unit, message, \"timestamp\"";

/// Provides insert and recent-window queries for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert one alert draft; the database assigns `id` and `timestamp`.
    pub async fn insert(pool: &PgPool, draft: &AlertDraft) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (\"type\", severity, value, unit, message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(draft.kind.as_str())
            .bind(draft.severity.as_str())
            .bind(draft.value)
            .bind(&draft.unit)
            .bind(&draft.message)
            .fetch_one(pool)
            .await
    }

    /// List the most recent alerts, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts ORDER BY \"timestamp\" DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
