//! Error types for the exporter.

use shared_scene::BackendError;
use thiserror::Error;

/// Errors that abort a whole export.
///
/// Per-component failures are not errors; they are listed in the manifest.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The scene's children could not be listed.
    #[error("Failed to enumerate scene objects: {0}")]
    Enumerate(#[from] BackendError),

    /// A directory or the manifest could not be written.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be serialized.
    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}
