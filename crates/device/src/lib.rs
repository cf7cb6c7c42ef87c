//! `drivesafe-device` library crate.
//!
//! Device-side tooling for the telemetry service: a sample generator that
//! stands in for the vehicle unit, and a real-time subscriber that mirrors
//! the dashboard's view of the stream. The binaries live in `main.rs`
//! (`drivesafe-sim`) and `bin/watch.rs` (`drivesafe-watch`).

pub mod generator;
pub mod sender;
pub mod subscriber;
pub mod view;
