//! Threshold evaluation engine for vehicle telemetry.
//!
//! Pure logic, no storage access. The caller persists the sample, passes
//! its values in, and stores whatever drafts come back.

use crate::alert::{AlertDraft, AlertKind, Severity};
use crate::telemetry::TelemetrySample;

/// Fixed boundaries whose crossing defines a safety condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// km/h
    pub max_speed: f64,
    /// m/s²
    pub accel_threshold: f64,
    /// m/s²
    pub braking_threshold: f64,
    /// degrees, compared against |tilt|
    pub tilt_threshold: f64,
    /// deg/s, compared against |rotationRate|
    pub turn_threshold: f64,
}

/// Server-side defaults. These are not user-configurable.
pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    max_speed: 120.0,
    accel_threshold: 4.0,
    braking_threshold: 4.0,
    tilt_threshold: 45.0,
    turn_threshold: 35.0,
};

impl Default for Thresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

/// Evaluate one sample against the thresholds.
///
/// Every rule is checked independently, so a single sample can raise
/// several alerts. Output order is fixed: crash, speed, acceleration,
/// braking, tilt, turn. No state is carried between calls, so repeated
/// violations always alert again.
pub fn evaluate(sample: &TelemetrySample, thresholds: &Thresholds) -> Vec<AlertDraft> {
    let mut alerts = Vec::new();

    if sample.is_crash {
        alerts.push(draft(
            AlertKind::CrashDetection,
            Severity::Critical,
            1.0,
            "Event",
            "Impact detected!".to_string(),
        ));
    }

    if sample.speed > thresholds.max_speed {
        alerts.push(draft(
            AlertKind::OverSpeed,
            Severity::High,
            sample.speed,
            "km/h",
            format!("Speed exceeded {} km/h", thresholds.max_speed),
        ));
    }

    if sample.acceleration > thresholds.accel_threshold {
        alerts.push(draft(
            AlertKind::SuddenAcceleration,
            Severity::High,
            sample.acceleration,
            "m/s²",
            "Rapid acceleration detected".to_string(),
        ));
    }

    if sample.braking > thresholds.braking_threshold {
        alerts.push(draft(
            AlertKind::SuddenBraking,
            Severity::High,
            sample.braking,
            "m/s²",
            "Hard braking detected".to_string(),
        ));
    }

    // Tilt keeps its sign so the dashboard can show which way the vehicle leans.
    if sample.tilt.abs() > thresholds.tilt_threshold {
        alerts.push(draft(
            AlertKind::TiltAlert,
            Severity::Critical,
            sample.tilt,
            "deg",
            "Dangerous tilt angle detected".to_string(),
        ));
    }

    let rotation = sample.rotation_rate.abs();
    if rotation > thresholds.turn_threshold {
        alerts.push(draft(
            AlertKind::SharpTurn,
            Severity::High,
            rotation,
            "deg/s",
            "Aggressive turning detected".to_string(),
        ));
    }

    alerts
}

fn draft(
    kind: AlertKind,
    severity: Severity,
    value: f64,
    unit: &str,
    message: String,
) -> AlertDraft {
    AlertDraft {
        kind,
        severity,
        value,
        unit: unit.to_string(),
        message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
