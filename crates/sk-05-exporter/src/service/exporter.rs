//! # Scene Exporter
//!
//! Walks every live object, keeps the recognized kinds, and writes one
//! single-record document per component:
//!
//! ```text
//! <destination>/components_20261018_093000/
//! ├── satellite/Sat1_config.json
//! ├── facility/Beijing_config.json
//! └── summary.json
//! ```

use crate::domain::{normalize, ExportFailure, ExportManifest, ExportOptions};
use crate::error::ExportError;
use chrono::Local;
use shared_scene::ObjectHandle;
use shared_types::{ComponentDocument, ComponentKind, ComponentRecord};
use sk_02_components::{Component, SceneContext};
use sk_03_component_factory::ComponentRegistry;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name of the manifest file.
pub const SUMMARY_FILE: &str = "summary.json";

/// A normalized component ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedComponent {
    /// Component kind.
    pub kind: ComponentKind,
    /// Normalized record.
    pub record: ComponentRecord,
}

impl ExportedComponent {
    /// Component name.
    pub fn name(&self) -> &str {
        self.record.name.as_deref().unwrap_or_default()
    }
}

/// Normalized state of every recognized component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    /// Components that described and normalized cleanly.
    pub components: Vec<ExportedComponent>,
    /// Recognized components that could not be described.
    pub failures: Vec<ExportFailure>,
    /// Recognized components per class name, failed ones included.
    pub recognized: BTreeMap<String, usize>,
}

impl SceneSnapshot {
    /// Look up a component by kind and name.
    pub fn find(&self, kind: ComponentKind, name: &str) -> Option<&ComponentRecord> {
        self.components
            .iter()
            .find(|c| c.kind == kind && c.name() == name)
            .map(|c| &c.record)
    }
}

/// Exports the scene behind a context.
pub struct SceneExporter {
    context: SceneContext,
    registry: Arc<ComponentRegistry>,
    options: ExportOptions,
}

impl SceneExporter {
    /// Exporter with default options.
    pub fn new(context: SceneContext, registry: Arc<ComponentRegistry>) -> Self {
        Self {
            context,
            registry,
            options: ExportOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> ExportOptions {
        self.options
    }

    fn identify(&self, handle: ObjectHandle) -> Option<(String, String)> {
        let backend = self.context.backend();
        let class = match backend.class_name(handle) {
            Ok(class) => class,
            Err(e) => {
                warn!("[sk-05] Skipping {}: class unreadable: {}", handle, e);
                return None;
            }
        };
        match backend.instance_name(handle) {
            Ok(name) => Some((class, name)),
            Err(e) => {
                warn!("[sk-05] Skipping {} ({}): name unreadable: {}", handle, class, e);
                None
            }
        }
    }

    fn describe(&self, kind: ComponentKind, name: &str) -> Result<ComponentRecord, String> {
        let variant = self.registry.variant(kind).map_err(|e| e.to_string())?;
        let mut component = Component::with_variant(self.context.clone(), variant, name);
        component.load().map_err(|e| e.to_string())?;
        let description = component.describe().map_err(|e| e.to_string())?;
        Ok(normalize(&description))
    }

    /// Describe and normalize every recognized component.
    ///
    /// Unrecognized classes are skipped silently. A component that fails to
    /// describe is recorded and does not stop the walk.
    pub fn snapshot(&self) -> Result<SceneSnapshot, ExportError> {
        let mut snapshot = SceneSnapshot::default();
        for handle in self.context.backend().enumerate_children()? {
            let Some((class, name)) = self.identify(handle) else {
                continue;
            };
            let Some(kind) = self.registry.kind_for_class(&class) else {
                debug!("[sk-05] Skipping unrecognized {}/{}", class, name);
                continue;
            };
            *snapshot.recognized.entry(class.clone()).or_default() += 1;
            match self.describe(kind, &name) {
                Ok(record) => snapshot.components.push(ExportedComponent { kind, record }),
                Err(error) => {
                    warn!("[sk-05] Failed to describe {}/{}: {}", class, name, error);
                    snapshot.failures.push(ExportFailure {
                        component: format!("{class}/{name}"),
                        error,
                    });
                }
            }
        }
        Ok(snapshot)
    }

    /// Write every recognized component and a manifest under `destination`.
    pub fn export_all(&self, destination: impl AsRef<Path>) -> Result<ExportManifest, ExportError> {
        let now = Local::now();
        let directory = if self.options.timestamped_subdir {
            destination
                .as_ref()
                .join(format!("components_{}", now.format("%Y%m%d_%H%M%S")))
        } else {
            destination.as_ref().to_path_buf()
        };
        fs::create_dir_all(&directory).map_err(|source| ExportError::Io {
            path: directory.display().to_string(),
            source,
        })?;

        let snapshot = self.snapshot()?;
        let mut manifest = ExportManifest {
            export_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            total_components: snapshot.recognized.values().sum(),
            components_by_type: snapshot.recognized.clone(),
            exported_files: Vec::new(),
            failures: snapshot.failures.clone(),
            directory: directory.clone(),
        };

        let mut taken = BTreeSet::new();
        for component in &snapshot.components {
            match self.write_component(&directory, component, &mut taken) {
                Ok(relative) => manifest.exported_files.push(relative),
                Err(error) => {
                    warn!("[sk-05] Failed to export '{}': {}", component.name(), error);
                    manifest.failures.push(ExportFailure {
                        component: format!("{}/{}", component.kind.class_name(), component.name()),
                        error,
                    });
                }
            }
        }

        let summary = serde_json::to_string_pretty(&manifest).map_err(|source| {
            ExportError::Serialize {
                what: SUMMARY_FILE.to_string(),
                source,
            }
        })?;
        let summary_path = directory.join(SUMMARY_FILE);
        fs::write(&summary_path, summary).map_err(|source| ExportError::Io {
            path: summary_path.display().to_string(),
            source,
        })?;

        info!(
            "[sk-05] Exported {} of {} components to {}",
            manifest.exported_files.len(),
            manifest.total_components,
            directory.display()
        );
        Ok(manifest)
    }

    /// Write one document, returning its path relative to the export root.
    ///
    /// `taken` holds the lowercased relative paths already claimed by this
    /// export; a name whose file name is taken gets a numeric suffix.
    fn write_component(
        &self,
        root: &Path,
        component: &ExportedComponent,
        taken: &mut BTreeSet<String>,
    ) -> Result<String, String> {
        let subdir = component.kind.directory_name();
        let kind_dir = root.join(&subdir);
        fs::create_dir_all(&kind_dir).map_err(|e| format!("{}: {e}", kind_dir.display()))?;

        let name = component.name();
        let mut document = ComponentDocument::single(component.record.clone());
        if component.kind == ComponentKind::Facility && self.options.describe_facilities {
            document = document.with_description(format!("{name} ground station configuration"));
        }
        let json = document.to_json_pretty().map_err(|e| e.to_string())?;

        let stem = file_stem(name);
        let file_name = claim_file_name(&subdir, &stem, taken);
        if file_name != format!("{stem}_config.json") {
            warn!(
                "[sk-05] File name for '{}' already used, writing {}/{}",
                name, subdir, file_name
            );
        }
        let path = kind_dir.join(&file_name);
        fs::write(&path, json).map_err(|e| format!("{}: {e}", path.display()))?;
        debug!("[sk-05] Wrote {}", path.display());
        Ok(format!("{subdir}/{file_name}"))
    }
}

/// Component name made safe for use as a file name.
///
/// Separators become `_`, leading dots become `_` so no stem is hidden or
/// relative, and an empty name becomes `unnamed`.
fn file_stem(name: &str) -> String {
    let mut leading = true;
    let stem: String = name
        .chars()
        .map(|c| {
            let keep_dot = c == '.' && !leading;
            leading &= c == '.';
            match c {
                '/' | '\\' | ':' => '_',
                '.' if !keep_dot => '_',
                other => other,
            }
        })
        .collect();
    if stem.is_empty() {
        "unnamed".to_string()
    } else {
        stem
    }
}

/// First free `<stem>[_N]_config.json` in `subdir`, compared case-insensitively.
fn claim_file_name(subdir: &str, stem: &str, taken: &mut BTreeSet<String>) -> String {
    let mut file_name = format!("{stem}_config.json");
    let mut suffix = 2;
    while !taken.insert(format!("{subdir}/{file_name}").to_lowercase()) {
        file_name = format!("{stem}_{suffix}_config.json");
        suffix += 1;
    }
    file_name
}
