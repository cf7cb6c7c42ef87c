//! Client-side views of what the server sends.
//!
//! These mirror the server's JSON rather than sharing its storage models,
//! so the device tools depend only on the wire format.

use chrono::{DateTime, Utc};
use drivesafe_core::alert::{AlertKind, Severity};
use serde::Deserialize;

/// A stored sample as returned by the query endpoints and the real-time channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingView {
    pub id: i64,
    pub speed: f64,
    pub acceleration: f64,
    pub braking: f64,
    pub tilt: f64,
    pub rotation_rate: f64,
    pub is_crash: bool,
    pub timestamp: DateTime<Utc>,
}

/// A stored alert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlertView {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub value: f64,
    pub unit: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of a successful `POST /api/telemetry`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestReply {
    pub success: bool,
    pub reading: ReadingView,
    pub alerts: Vec<AlertView>,
}

/// Payload of a `sensor_update` frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorUpdate {
    pub data: ReadingView,
    #[serde(default)]
    pub alerts: Vec<AlertView>,
}

/// Just enough of any frame to route it by type.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
}
