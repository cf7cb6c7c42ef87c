//! Stored entity models. Rows come back with their store-assigned `id`
//! and `timestamp`.

pub mod alert;
pub mod sensor_reading;
