//! The Reading Store: append-only persistence for samples and alerts.
//!
//! The store alone assigns identity (`id`) and the server timestamp.
//! Reads always return newest first and never more than `limit` records.
//! There are no update or delete operations.

use async_trait::async_trait;
use drivesafe_core::alert::AlertDraft;
use drivesafe_core::telemetry::TelemetrySample;

use crate::models::alert::Alert;
use crate::models::sensor_reading::SensorReading;

mod memory;
mod postgres;

pub use memory::{MemoryReadingStore, DEFAULT_MEMORY_CAPACITY};
pub use postgres::PgReadingStore;

/// The backing persistence could not be reached or rejected a write.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Append-only store for telemetry samples and alerts.
///
/// Implementations must be safe to share across concurrent ingest calls.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Persist a validated sample and return it with its id and timestamp.
    async fn append_reading(&self, sample: &TelemetrySample) -> Result<SensorReading, StoreError>;

    /// Persist one alert draft and return it with its id and timestamp.
    async fn append_alert(&self, draft: &AlertDraft) -> Result<Alert, StoreError>;

    /// Most recent readings, newest first, at most `limit` entries.
    async fn recent_readings(&self, limit: i64) -> Result<Vec<SensorReading>, StoreError>;

    /// The single most recent reading, if any has been stored.
    async fn latest_reading(&self) -> Result<Option<SensorReading>, StoreError>;

    /// Most recent alerts, newest first, at most `limit` entries.
    async fn recent_alerts(&self, limit: i64) -> Result<Vec<Alert>, StoreError>;

    /// Cheap reachability check used by the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Short backend label for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;
}
