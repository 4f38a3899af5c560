//! Round-trip verification: export the live scene again and compare each
//! created component with the record it came from.

use crate::pipeline::loader::SourceRecords;
use shared_types::ComponentKind;
use sk_05_exporter::{drift, ExportError, FieldDrift, SceneExporter};
use tracing::{error, info};

/// Drift of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDrift {
    /// Component kind.
    pub kind: ComponentKind,
    /// Component name.
    pub name: String,
    /// Fields that did not survive.
    pub drifts: Vec<FieldDrift>,
}

/// Verification outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyReport {
    /// Components compared.
    pub checked: usize,
    /// Components with at least one drifting field.
    pub drifted: Vec<ComponentDrift>,
    /// Source components that were not exported.
    pub missing: Vec<String>,
}

impl VerifyReport {
    /// True when every source came back unchanged.
    pub fn is_clean(&self) -> bool {
        self.drifted.is_empty() && self.missing.is_empty()
    }
}

/// Compare the exported scene with the source records.
pub fn verify(exporter: &SceneExporter, sources: &SourceRecords) -> Result<VerifyReport, ExportError> {
    let snapshot = exporter.snapshot()?;
    let mut report = VerifyReport::default();
    for ((kind, name), expected) in sources {
        let Some(actual) = snapshot.find(*kind, name) else {
            error!("[runtime] {} '{}' missing from export", kind, name);
            report.missing.push(format!("{}/{}", kind.class_name(), name));
            continue;
        };
        report.checked += 1;
        let drifts = drift(*kind, expected, actual);
        if !drifts.is_empty() {
            for d in &drifts {
                error!(
                    "[runtime] Drift on {} '{}': {} expected {} got {}",
                    kind, name, d.field, d.expected, d.actual
                );
            }
            report.drifted.push(ComponentDrift {
                kind: *kind,
                name: name.clone(),
                drifts,
            });
        }
    }
    info!(
        "[runtime] Verified {} components, {} drifted, {} missing",
        report.checked,
        report.drifted.len(),
        report.missing.len()
    );
    Ok(report)
}
