//! Exporter service.

mod exporter;

pub use exporter::{ExportedComponent, SceneExporter, SceneSnapshot, SUMMARY_FILE};
