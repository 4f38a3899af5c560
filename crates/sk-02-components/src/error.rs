//! Error types for the component model.

use shared_scene::BackendError;
use shared_types::ComponentKind;
use thiserror::Error;

/// Errors raised by component lifecycle operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComponentError {
    /// Allocation, binding or configuration failed, or the attributes were
    /// structurally invalid.
    #[error("Failed to create {kind} '{name}': {reason}")]
    Creation {
        kind: ComponentKind,
        name: String,
        reason: String,
    },

    /// No live object at the component's path.
    #[error("Component not found: {path}")]
    NotFound { path: String },

    /// The operation needs a bound component.
    #[error("{kind} '{name}' is not bound to a live object")]
    NotBound { kind: ComponentKind, name: String },

    /// A backend call failed outside creation.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl ComponentError {
    pub(crate) fn creation(kind: ComponentKind, name: &str, reason: impl ToString) -> Self {
        ComponentError::Creation {
            kind,
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
