//! # Error Types
//!
//! Defines record-level errors shared by the factory and the modifier.

use thiserror::Error;

/// Errors raised while interpreting a declarative record or patch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// A required field is absent or empty.
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    /// A field is present but structurally invalid.
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// The propagator tag is not one of the known kinds.
    #[error("Unknown propagator: {0}")]
    UnknownPropagator(String),
}

impl RecordError {
    /// Shorthand for `InvalidField`.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RecordError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The offending field name.
    pub fn field(&self) -> &str {
        match self {
            RecordError::MissingField { field } => field,
            RecordError::InvalidField { field, .. } => field,
            RecordError::UnknownPropagator(_) => "propagator",
        }
    }
}
