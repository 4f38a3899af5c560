//! # Round-Trip Pipeline
//!
//! ```text
//! config/satellites/*.json ─┐
//!                           ├──→ factory ──→ scene ──→ exporter ──→ exports/
//! config/facilities/*.json ─┘                  │
//!                                              └──→ snapshot ──→ drift report
//! ```

pub mod loader;
pub mod verify;

pub use loader::{document_paths, load_inputs, LoadSummary, LoadedFile, SourceRecords};
pub use verify::{verify, ComponentDrift, VerifyReport};

use crate::container::{RuntimeConfig, SceneContainer};
use crate::error::RuntimeError;
use sk_03_component_factory::ComponentFactory;
use sk_05_exporter::ExportManifest;
use tracing::info;

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Input loading.
    pub load: LoadSummary,
    /// Export manifest.
    pub manifest: ExportManifest,
    /// Verification, when enabled.
    pub verification: Option<VerifyReport>,
}

impl RunSummary {
    /// True when every input loaded, exported and verified cleanly.
    pub fn is_clean(&self) -> bool {
        self.load.file_errors.is_empty()
            && self.load.failed() == 0
            && self.manifest.is_complete()
            && self.verification.as_ref().map_or(true, VerifyReport::is_clean)
    }
}

/// The scene engine runtime.
pub struct SceneRuntime {
    container: SceneContainer,
    factory: ComponentFactory,
}

impl SceneRuntime {
    /// Wire a runtime from configuration.
    pub fn new(config: RuntimeConfig) -> Self {
        let container = SceneContainer::new(config);
        let factory = container.factory();
        Self { container, factory }
    }

    /// Shared services.
    pub fn container(&self) -> &SceneContainer {
        &self.container
    }

    /// The factory holding every component created so far.
    pub fn factory(&self) -> &ComponentFactory {
        &self.factory
    }

    /// Load every input document.
    pub fn load(&mut self) -> Result<LoadSummary, RuntimeError> {
        load_inputs(
            &mut self.factory,
            &self.container.components,
            &self.container.config.input_dir,
        )
    }

    /// Export the scene.
    pub fn export(&self) -> Result<ExportManifest, RuntimeError> {
        Ok(self
            .container
            .exporter()
            .export_all(&self.container.config.export.dir)?)
    }

    /// Load, export and optionally verify.
    pub fn run(&mut self) -> Result<RunSummary, RuntimeError> {
        let load = self.load()?;
        info!(
            "[runtime] Loaded {} components from {} documents ({} failed records)",
            load.created(),
            load.files.len(),
            load.failed()
        );
        let manifest = self.export()?;
        let verification = if self.container.config.verify_round_trip {
            Some(verify(&self.container.exporter(), &load.sources)?)
        } else {
            None
        };
        Ok(RunSummary {
            load,
            manifest,
            verification,
        })
    }
}
