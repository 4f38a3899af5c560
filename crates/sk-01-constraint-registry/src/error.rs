//! Error types for the constraint registry.

use thiserror::Error;

/// Errors raised when extending the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The name is already bound to a different code.
    #[error("Constraint {name} is already registered with code {existing}, cannot rebind to {requested}")]
    NameConflict {
        name: String,
        existing: i32,
        requested: i32,
    },

    /// The code is already bound to a different name.
    #[error("Constraint code {code} is already used by {existing}")]
    CodeInUse { code: i32, existing: String },

    /// Names must be non-empty.
    #[error("Constraint name must not be empty")]
    EmptyName,
}
