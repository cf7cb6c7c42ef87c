//! Telemetry sample input contract.
//!
//! Device payloads arrive untyped. [`TelemetrySample::from_json`] checks the
//! shape field by field and either returns a typed sample or the complete
//! list of problems, so nothing downstream ever sees an unchecked value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, FieldIssue};

/// Wire names of the numeric fields, in reporting order.
pub const NUMERIC_FIELDS: [&str; 5] = ["speed", "acceleration", "braking", "tilt", "rotationRate"];

/// Wire name of the crash flag.
pub const CRASH_FIELD: &str = "isCrash";

/// A validated sensor reading as sent by the device (no id, no timestamp).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    /// km/h
    pub speed: f64,
    /// m/s²
    pub acceleration: f64,
    /// m/s²
    pub braking: f64,
    /// degrees, signed
    pub tilt: f64,
    /// deg/s, signed
    pub rotation_rate: f64,
    pub is_crash: bool,
}

impl TelemetrySample {
    /// Parse and validate a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            CoreError::InvalidSample(vec![FieldIssue::new("body", format!("Invalid JSON: {e}"))])
        })?;
        Self::from_json(&value)
    }

    /// Validate an already-parsed JSON value.
    ///
    /// Every numeric field must be present and a JSON number; `isCrash`
    /// must be a boolean when present and defaults to `false` otherwise.
    /// Unknown fields are ignored. All issues are reported together.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let Some(object) = value.as_object() else {
            return Err(CoreError::InvalidSample(vec![FieldIssue::new(
                "body",
                format!("Expected object, received {}", type_name(value)),
            )]));
        };

        let mut issues = Vec::new();
        let mut numbers = [0.0_f64; NUMERIC_FIELDS.len()];

        for (slot, field) in numbers.iter_mut().zip(NUMERIC_FIELDS) {
            match object.get(field) {
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(v) if v.is_finite() => *slot = v,
                    _ => issues.push(FieldIssue::new(field, "Expected a finite number")),
                },
                Some(other) => issues.push(FieldIssue::new(
                    field,
                    format!("Expected number, received {}", type_name(other)),
                )),
                None => issues.push(FieldIssue::new(field, "Required")),
            }
        }

        let is_crash = match object.get(CRASH_FIELD) {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                issues.push(FieldIssue::new(
                    CRASH_FIELD,
                    format!("Expected boolean, received {}", type_name(other)),
                ));
                false
            }
        };

        if !issues.is_empty() {
            return Err(CoreError::InvalidSample(issues));
        }

        let [speed, acceleration, braking, tilt, rotation_rate] = numbers;
        Ok(Self {
            speed,
            acceleration,
            braking,
            tilt,
            rotation_rate,
            is_crash,
        })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
