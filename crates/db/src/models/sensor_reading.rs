use drivesafe_core::telemetry::TelemetrySample;
use drivesafe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sensor_readings` table (append-only).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub id: DbId,
    pub speed: f64,
    pub acceleration: f64,
    pub braking: f64,
    pub tilt: f64,
    pub rotation_rate: f64,
    pub is_crash: bool,
    pub timestamp: Timestamp,
}

impl SensorReading {
    /// The sensor values of this reading, without its stored identity.
    pub fn sample(&self) -> TelemetrySample {
        TelemetrySample {
            speed: self.speed,
            acceleration: self.acceleration,
            braking: self.braking,
            tilt: self.tilt,
            rotation_rate: self.rotation_rate,
            is_crash: self.is_crash,
        }
    }
}
