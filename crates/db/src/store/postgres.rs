use async_trait::async_trait;
use drivesafe_core::alert::AlertDraft;
use drivesafe_core::telemetry::TelemetrySample;

use crate::models::alert::Alert;
use crate::models::sensor_reading::SensorReading;
use crate::repositories::{AlertRepo, SensorReadingRepo};
use crate::store::{ReadingStore, StoreError};
use crate::DbPool;

/// [`ReadingStore`] backed by PostgreSQL through the repository layer.
#[derive(Clone)]
pub struct PgReadingStore {
    pool: DbPool,
}

impl PgReadingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn append_reading(&self, sample: &TelemetrySample) -> Result<SensorReading, StoreError> {
        Ok(SensorReadingRepo::insert(&self.pool, sample).await?)
    }

    async fn append_alert(&self, draft: &AlertDraft) -> Result<Alert, StoreError> {
        Ok(AlertRepo::insert(&self.pool, draft).await?)
    }

    async fn recent_readings(&self, limit: i64) -> Result<Vec<SensorReading>, StoreError> {
        Ok(SensorReadingRepo::list_recent(&self.pool, limit).await?)
    }

    async fn latest_reading(&self) -> Result<Option<SensorReading>, StoreError> {
        Ok(SensorReadingRepo::latest(&self.pool).await?)
    }

    async fn recent_alerts(&self, limit: i64) -> Result<Vec<Alert>, StoreError> {
        Ok(AlertRepo::list_recent(&self.pool, limit).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
