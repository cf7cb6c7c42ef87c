//! Alert vocabulary: the six safety conditions and their severities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The safety condition an alert reports.
///
/// Serialized with the human-readable labels the dashboard displays
/// (`"Over Speed"`, `"Tilt Alert"`, ...), which are also the values stored
/// in the `alerts.type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    #[serde(rename = "Over Speed")]
    OverSpeed,
    #[serde(rename = "Sudden Acceleration")]
    SuddenAcceleration,
    #[serde(rename = "Sudden Braking")]
    SuddenBraking,
    #[serde(rename = "Tilt Alert")]
    TiltAlert,
    #[serde(rename = "Sharp Turn")]
    SharpTurn,
    #[serde(rename = "Crash Detection")]
    CrashDetection,
}

impl AlertKind {
    pub const ALL: [AlertKind; 6] = [
        AlertKind::CrashDetection,
        AlertKind::OverSpeed,
        AlertKind::SuddenAcceleration,
        AlertKind::SuddenBraking,
        AlertKind::TiltAlert,
        AlertKind::SharpTurn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::OverSpeed => "Over Speed",
            AlertKind::SuddenAcceleration => "Sudden Acceleration",
            AlertKind::SuddenBraking => "Sudden Braking",
            AlertKind::TiltAlert => "Tilt Alert",
            AlertKind::SharpTurn => "Sharp Turn",
            AlertKind::CrashDetection => "Crash Detection",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlertKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown alert type: {s}")))
    }
}

impl TryFrom<String> for AlertKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How urgent an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Severity::High),
            "Critical" => Ok(Severity::Critical),
            other => Err(CoreError::Validation(format!("Unknown severity: {other}"))),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An alert produced by the evaluator, before the store assigns it an id
/// and a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertDraft {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub value: f64,
    pub unit: String,
    pub message: String,
}
