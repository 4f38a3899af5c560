//! # Integration Tests
//!
//! Every test runs against the in-memory scene, wired the same way the
//! runtime wires it.

pub mod factory_flows;
pub mod modify_flows;
pub mod replay;
pub mod round_trip;

use sk_02_components::{simulated_context, SceneContext};
use sk_01_constraint_registry::ConstraintRegistry;
use sk_03_component_factory::{ComponentFactory, ComponentRegistry};
use sk_05_exporter::{ExportOptions, SceneExporter};
use shared_scene::InMemoryScene;
use std::sync::Arc;

/// A factory and an exporter sharing one fresh scene.
pub struct SceneHarness {
    pub context: SceneContext,
    pub scene: Arc<InMemoryScene>,
    pub factory: ComponentFactory,
    pub exporter: SceneExporter,
}

impl SceneHarness {
    pub fn new() -> Self {
        let (context, scene) = simulated_context(ConstraintRegistry::builtin());
        let registry = Arc::new(ComponentRegistry::builtin());
        let factory = ComponentFactory::new(context.clone(), registry.clone());
        let exporter =
            SceneExporter::new(context.clone(), registry).with_options(ExportOptions::flat());
        Self {
            context,
            scene,
            factory,
            exporter,
        }
    }
}

impl Default for SceneHarness {
    fn default() -> Self {
        Self::new()
    }
}
