//! Repository for the `sensor_readings` table (append-only time-series).

use drivesafe_core::telemetry::TelemetrySample;
use sqlx::PgPool;

use crate::models::sensor_reading::SensorReading;

/// Column list for `sensor_readings` SELECT queries.
const COLUMNS: &str = "\
    id, speed, acceleration, braking, tilt, rotation_rate, is_crash, \"timestamp\"";

/// Provides insert and recent-window queries for sensor readings.
pub struct SensorReadingRepo;

impl SensorReadingRepo {
    /// Insert one sample; the database assigns `id` and `timestamp`.
    pub async fn insert(
        pool: &PgPool,
        sample: &TelemetrySample,
    ) -> Result<SensorReading, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_readings \
                (speed, acceleration, braking, tilt, rotation_rate, is_crash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorReading>(&query)
            .bind(sample.speed)
            .bind(sample.acceleration)
            .bind(sample.braking)
            .bind(sample.tilt)
            .bind(sample.rotation_rate)
            .bind(sample.is_crash)
            .fetch_one(pool)
            .await
    }

    /// List the most recent readings, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<SensorReading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_readings \
             ORDER BY \"timestamp\" DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, SensorReading>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Fetch the single most recent reading, if any.
    pub async fn latest(pool: &PgPool) -> Result<Option<SensorReading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_readings \
             ORDER BY \"timestamp\" DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, SensorReading>(&query)
            .fetch_optional(pool)
            .await
    }
}
