//! Error types for the factory and the type registry.

use shared_types::{ComponentKind, RecordError};
use sk_02_components::ComponentError;
use thiserror::Error;

/// Errors raised while turning records into live components.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactoryError {
    /// The `type` tag is not registered.
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    /// The tag resolves to a kind with no registered variant.
    #[error("Component type {0} is not implemented")]
    KindNotImplemented(ComponentKind),

    /// A required field is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but invalid.
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// One record of a document did not match the record shape.
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// The document itself could not be read.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The document file could not be read.
    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    /// An alias is already bound to another kind.
    #[error("Type alias {alias} already maps to {existing}")]
    AliasConflict {
        alias: String,
        existing: ComponentKind,
    },

    /// Creating the component failed.
    #[error(transparent)]
    Creation(#[from] ComponentError),
}

impl From<RecordError> for FactoryError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::MissingField { field } => FactoryError::MissingField(field),
            RecordError::InvalidField { field, reason } => FactoryError::InvalidField { field, reason },
            RecordError::UnknownPropagator(tag) => FactoryError::InvalidField {
                field: "propagator".to_string(),
                reason: format!("unknown propagator {tag}"),
            },
        }
    }
}
