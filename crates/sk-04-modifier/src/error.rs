//! Error types for the modifier.

use shared_scene::BackendError;
use shared_types::{ComponentKind, RecordError};
use sk_02_components::ComponentError;
use thiserror::Error;

/// Errors raised while patching a live component.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModifyError {
    /// `apply` or `set` called before `load`.
    #[error("No {0} loaded, call load() first")]
    NotLoaded(ComponentKind),

    /// Loading failed.
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// The field does not exist on this kind of component.
    #[error("{kind} components have no '{field}' field")]
    UnsupportedField { kind: ComponentKind, field: String },

    /// Orbit or step edits on a propagator that owns its own elements.
    #[error("Propagator {0} does not accept orbit or step edits")]
    UnsupportedPropagator(String),

    /// A patch field is present but invalid.
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// The patch could not be decoded.
    #[error("Malformed patch: {0}")]
    MalformedPatch(String),

    /// A backend call failed mid-patch.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl From<RecordError> for ModifyError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::UnknownPropagator(tag) => ModifyError::InvalidField {
                field: "propagator".to_string(),
                reason: format!("unknown propagator {tag}"),
            },
            RecordError::InvalidField { field, reason } => ModifyError::InvalidField { field, reason },
            RecordError::MissingField { field } => ModifyError::InvalidField {
                field: field.to_string(),
                reason: "missing".to_string(),
            },
        }
    }
}
