//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod alert_repo;
pub mod sensor_reading_repo;

pub use alert_repo::AlertRepo;
pub use sensor_reading_repo::SensorReadingRepo;
