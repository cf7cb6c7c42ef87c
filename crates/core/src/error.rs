use serde::Serialize;

/// A single field-level problem found while validating an input payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Name of the offending field as it appears on the wire.
    pub field: String,
    /// Human-readable description of the mismatch.
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity}")]
    NotFound { entity: &'static str },

    #[error("Invalid sensor data format ({} issue(s))", .0.len())]
    InvalidSample(Vec<FieldIssue>),

    #[error("Validation failed: {0}")]
    Validation(String),
}
