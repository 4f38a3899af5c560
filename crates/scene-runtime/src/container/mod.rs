//! # Scene Container
//!
//! Builds the registries and the scene once and hands out shared handles.

pub mod config;

pub use config::{ConfigError, ExportConfig, RuntimeConfig};

use shared_scene::InMemoryScene;
use sk_01_constraint_registry::ConstraintRegistry;
use sk_02_components::{simulated_context, SceneContext};
use sk_03_component_factory::{ComponentFactory, ComponentRegistry};
use sk_05_exporter::SceneExporter;
use std::sync::Arc;
use tracing::info;

/// Shared services of one runtime.
pub struct SceneContainer {
    /// Resolved configuration.
    pub config: RuntimeConfig,
    /// Scene context (backend + constraint registry).
    pub context: SceneContext,
    /// Concrete scene, for inspection.
    pub scene: Arc<InMemoryScene>,
    /// Component type registry.
    pub components: Arc<ComponentRegistry>,
}

impl SceneContainer {
    /// Wire the built-in registries to a fresh in-memory scene.
    pub fn new(config: RuntimeConfig) -> Self {
        let constraints = ConstraintRegistry::builtin();
        info!(
            "[runtime] Constraint registry ready ({} types)",
            constraints.len()
        );
        let (context, scene) = simulated_context(constraints);
        let components = Arc::new(ComponentRegistry::builtin());
        info!(
            "[runtime] Component types: {}",
            components.supported_types().join(", ")
        );
        Self {
            config,
            context,
            scene,
            components,
        }
    }

    /// Factory configured per the runtime settings.
    pub fn factory(&self) -> ComponentFactory {
        ComponentFactory::new(self.context.clone(), Arc::clone(&self.components))
            .with_config(self.config.factory)
    }

    /// Exporter configured per the runtime settings.
    pub fn exporter(&self) -> SceneExporter {
        SceneExporter::new(self.context.clone(), Arc::clone(&self.components))
            .with_options(self.config.export.options)
    }
}
