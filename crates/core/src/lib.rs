//! Pure domain logic for the drivesafe telemetry service.
//!
//! Nothing in this crate performs I/O: it validates incoming samples,
//! evaluates them against the safety thresholds and defines the shared
//! vocabulary (alert kinds, severities, ids, timestamps) used by the
//! storage, API and device crates.

pub mod alert;
pub mod error;
pub mod messages;
pub mod search;
pub mod telemetry;
pub mod thresholds;
pub mod types;
