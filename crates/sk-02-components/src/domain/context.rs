//! Shared handles every component operation runs against.

use shared_scene::SceneBackend;
use sk_01_constraint_registry::ConstraintRegistry;
use std::fmt;
use std::sync::Arc;

/// Backend plus constraint registry, cloned into every component.
#[derive(Clone)]
pub struct SceneContext {
    backend: Arc<dyn SceneBackend>,
    constraints: Arc<ConstraintRegistry>,
}

impl SceneContext {
    /// Bundle a backend with a registry.
    pub fn new(backend: Arc<dyn SceneBackend>, constraints: Arc<ConstraintRegistry>) -> Self {
        Self {
            backend,
            constraints,
        }
    }

    /// The scene backend.
    pub fn backend(&self) -> &dyn SceneBackend {
        self.backend.as_ref()
    }

    /// The constraint registry.
    pub fn constraints(&self) -> &ConstraintRegistry {
        self.constraints.as_ref()
    }

    /// Shared registry handle.
    pub fn constraints_handle(&self) -> Arc<ConstraintRegistry> {
        Arc::clone(&self.constraints)
    }
}

impl fmt::Debug for SceneContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneContext")
            .field("constraints", &self.constraints.len())
            .finish_non_exhaustive()
    }
}
