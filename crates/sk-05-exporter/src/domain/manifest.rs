//! Export settings and the `summary.json` manifest.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Write under `components_<YYYYmmdd_HHMMSS>/` instead of directly into
    /// the destination.
    pub timestamped_subdir: bool,
    /// Give facility documents a human-readable `description`.
    pub describe_facilities: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            timestamped_subdir: true,
            describe_facilities: true,
        }
    }
}

impl ExportOptions {
    /// Write straight into the destination. Deterministic paths for tests.
    pub fn flat() -> Self {
        Self {
            timestamped_subdir: false,
            ..Self::default()
        }
    }
}

/// A component that was recognized but not exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFailure {
    /// `Class/Name` of the object.
    pub component: String,
    /// What went wrong.
    pub error: String,
}

/// Summary of one export, written as `summary.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    /// Local time, `%Y-%m-%d %H:%M:%S`.
    pub export_time: String,
    /// Recognized components found in the scene.
    pub total_components: usize,
    /// Count per class name.
    pub components_by_type: BTreeMap<String, usize>,
    /// Written documents, relative to the export directory.
    pub exported_files: Vec<String>,
    /// Components that could not be exported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ExportFailure>,
    /// Directory the export was written to.
    #[serde(skip)]
    pub directory: PathBuf,
}

impl ExportManifest {
    /// True when every recognized component was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_shape() {
        let mut manifest = ExportManifest {
            export_time: "2026-10-18 09:30:00".into(),
            total_components: 1,
            ..ExportManifest::default()
        };
        manifest.components_by_type.insert("Facility".into(), 1);
        manifest.exported_files.push("facility/Beijing_config.json".into());

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["components_by_type"]["Facility"], 1);
        assert!(json.get("failures").is_none());
        assert!(json.get("directory").is_none());
    }

    #[test]
    fn test_options_default_to_timestamped() {
        let options: ExportOptions = serde_json::from_str("{}").unwrap();
        assert!(options.timestamped_subdir);
        assert!(!ExportOptions::flat().timestamped_subdir);
    }
}
