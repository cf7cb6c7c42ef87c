//! Real-time channel message type names shared by the server and clients.

/// Pushed to every subscriber after a successful ingest.
pub const MSG_TYPE_SENSOR_UPDATE: &str = "sensor_update";
