//! Runtime errors.

use crate::container::ConfigError;
use sk_05_exporter::ExportError;
use thiserror::Error;

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input directory could not be listed.
    #[error("Failed to list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Export failed as a whole.
    #[error(transparent)]
    Export(#[from] ExportError),
}
