use drivesafe_core::alert::{AlertKind, Severity};
use drivesafe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `alerts` table (append-only).
///
/// Alerts carry no reference to the reading that raised them.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Alert {
    pub id: DbId,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub kind: AlertKind,
    #[sqlx(try_from = "String")]
    pub severity: Severity,
    pub value: f64,
    pub unit: String,
    pub message: String,
    pub timestamp: Timestamp,
}
