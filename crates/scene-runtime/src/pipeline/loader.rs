//! Input documents: `<input_dir>/satellites/*.json` and
//! `<input_dir>/facilities/*.json`, loaded in file-name order.

use crate::error::RuntimeError;
use serde_json::Value;
use shared_types::{ComponentKind, ComponentRecord};
use sk_03_component_factory::{BatchReport, ComponentFactory, ComponentRegistry};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Subdirectories scanned for documents, in load order.
pub const INPUT_SUBDIRS: [&str; 2] = ["satellites", "facilities"];

/// Records that were created, keyed by kind and name. Later files win.
pub type SourceRecords = BTreeMap<(ComponentKind, String), ComponentRecord>;

/// One document and its batch outcome.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Document path.
    pub path: PathBuf,
    /// Batch outcome.
    pub report: BatchReport,
}

/// Outcome of loading every input document.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Documents that were read.
    pub files: Vec<LoadedFile>,
    /// Documents that could not be read at all.
    pub file_errors: Vec<(PathBuf, String)>,
    /// Created records, for round-trip verification.
    pub sources: SourceRecords,
}

impl LoadSummary {
    /// Components created across all documents.
    pub fn created(&self) -> usize {
        self.files.iter().map(|f| f.report.created.len()).sum()
    }

    /// Records that failed across all documents.
    pub fn failed(&self) -> usize {
        self.files.iter().map(|f| f.report.failures.len()).sum()
    }
}

/// Every `*.json` document under the input subdirectories.
pub fn document_paths(input_dir: &Path) -> Result<Vec<PathBuf>, RuntimeError> {
    let mut paths = Vec::new();
    for subdir in INPUT_SUBDIRS {
        let dir = input_dir.join(subdir);
        if !dir.is_dir() {
            debug!("[runtime] No {} directory", dir.display());
            continue;
        }
        let entries = std::fs::read_dir(&dir).map_err(|source| RuntimeError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let mut found: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        found.sort();
        paths.extend(found);
    }
    Ok(paths)
}

/// Load every input document into the factory.
pub fn load_inputs(
    factory: &mut ComponentFactory,
    registry: &ComponentRegistry,
    input_dir: &Path,
) -> Result<LoadSummary, RuntimeError> {
    let mut summary = LoadSummary::default();
    for path in document_paths(input_dir)? {
        match factory.create_from_json_file(&path) {
            Ok(report) => {
                info!(
                    "[runtime] {}: {} created, {} failed",
                    path.display(),
                    report.created.len(),
                    report.failures.len()
                );
                collect_sources(&path, &report, registry, &mut summary.sources);
                summary.files.push(LoadedFile { path, report });
            }
            Err(e) => {
                warn!("[runtime] Skipping {}: {}", path.display(), e);
                summary.file_errors.push((path, e.to_string()));
            }
        }
    }
    Ok(summary)
}

/// Remember the records of a document that were actually created.
fn collect_sources(
    path: &Path,
    report: &BatchReport,
    registry: &ComponentRegistry,
    sources: &mut SourceRecords,
) {
    let items = std::fs::read_to_string(path)
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .and_then(|mut doc| doc.get_mut("components").map(Value::take));
    let Some(Value::Array(items)) = items else {
        return;
    };
    let failed: BTreeSet<usize> = report.failures.iter().map(|f| f.index).collect();
    for (index, item) in items.into_iter().enumerate() {
        if failed.contains(&index) {
            continue;
        }
        let Ok(record) = serde_json::from_value::<ComponentRecord>(item) else {
            continue;
        };
        let kind = record.kind.as_deref().and_then(|tag| registry.resolve(tag).ok());
        if let (Some(kind), Some(name)) = (kind, record.name.clone()) {
            sources.insert((kind, name), record);
        }
    }
}
