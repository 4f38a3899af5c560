//! In-memory scene wired to a constraint registry.

use crate::domain::SceneContext;
use shared_scene::{CatalogEntry, InMemoryScene};
use sk_01_constraint_registry::ConstraintRegistry;
use std::sync::Arc;

/// Build an in-memory scene able to instantiate every registered constraint.
pub fn simulated_scene(registry: &ConstraintRegistry) -> InMemoryScene {
    InMemoryScene::new(
        registry
            .entries()
            .map(|def| CatalogEntry::new(def.code.0, def.name.clone(), def.form.supports_bounds())),
    )
}

/// A context over a fresh in-memory scene, plus the scene for inspection.
pub fn simulated_context(registry: ConstraintRegistry) -> (SceneContext, Arc<InMemoryScene>) {
    let scene = Arc::new(simulated_scene(&registry));
    let context = SceneContext::new(scene.clone(), Arc::new(registry));
    (context, scene)
}
