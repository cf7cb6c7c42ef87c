pub mod alerts;
pub mod readings;
pub mod telemetry;
