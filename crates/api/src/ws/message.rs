use drivesafe_core::messages::MSG_TYPE_SENSOR_UPDATE;
use drivesafe_db::models::alert::Alert;
use drivesafe_db::models::sensor_reading::SensorReading;
use serde::Serialize;

/// Payload pushed to subscribers after each successful ingest:
/// `{ "type": "sensor_update", "data": <reading>, "alerts": [...] }`.
#[derive(Debug, Serialize)]
pub struct SensorUpdate<'a> {
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    pub data: &'a SensorReading,
    pub alerts: &'a [Alert],
}

impl<'a> SensorUpdate<'a> {
    pub fn new(data: &'a SensorReading, alerts: &'a [Alert]) -> Self {
        Self {
            msg_type: MSG_TYPE_SENSOR_UPDATE,
            data,
            alerts,
        }
    }
}
