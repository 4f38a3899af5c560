//! # Component
//!
//! A named scene entity and its optional binding to a live backend object.
//!
//! ## Lifecycle
//!
//! ```text
//!   new ──create()/load()──▶ bound ──delete()──▶ unbound
//!    ▲                                              │
//!    └──────────────────────────────────────────────┘
//! ```
//!
//! The handle and the configuration interface live in one
//! [`LiveBinding`], so a component is never half-bound.

use crate::domain::SceneContext;
use crate::error::ComponentError;
use crate::ports::ComponentVariant;
use crate::variants::variant_for;
use crate::views::ConstraintReport;
use shared_scene::{BackendError, NodeRef, ObjectHandle, ObjectPath};
use shared_types::{ComponentDescription, ComponentKind, ComponentRecord};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handle and configuration interface of a bound component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveBinding {
    /// Backend object.
    pub handle: ObjectHandle,
    /// Kind-specific configuration interface.
    pub interface: NodeRef,
}

/// A satellite or facility, bound or not.
pub struct Component {
    kind: ComponentKind,
    name: String,
    binding: Option<LiveBinding>,
    context: SceneContext,
    variant: Arc<dyn ComponentVariant>,
}

impl Component {
    /// Unbound component of the given kind.
    pub fn new(context: SceneContext, kind: ComponentKind, name: impl Into<String>) -> Self {
        Self::with_variant(context, variant_for(kind), name)
    }

    /// Unbound component driven by a custom variant.
    pub fn with_variant(
        context: SceneContext,
        variant: Arc<dyn ComponentVariant>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: variant.kind(),
            name: name.into(),
            binding: None,
            context,
            variant,
        }
    }

    /// Unbound satellite.
    pub fn satellite(context: SceneContext, name: impl Into<String>) -> Self {
        Self::new(context, ComponentKind::Satellite, name)
    }

    /// Unbound facility.
    pub fn facility(context: SceneContext, name: impl Into<String>) -> Self {
        Self::new(context, ComponentKind::Facility, name)
    }

    /// Component kind.
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Live binding, if bound.
    pub fn binding(&self) -> Option<&LiveBinding> {
        self.binding.as_ref()
    }

    /// True when bound to a live object.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Scene context.
    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    /// Backend path of this component.
    pub fn path(&self) -> ObjectPath {
        ObjectPath::new(self.kind.class_name(), self.name.clone())
    }

    /// Bound configuration interface, or `NotBound`.
    pub fn interface(&self) -> Result<NodeRef, ComponentError> {
        self.binding
            .map(|binding| binding.interface)
            .ok_or_else(|| ComponentError::NotBound {
                kind: self.kind,
                name: self.name.clone(),
            })
    }

    fn bind(&mut self, handle: ObjectHandle) -> Result<(), BackendError> {
        let backend = self.context.backend();
        let interface = backend
            .query_interface(&NodeRef::object(handle), self.variant.interface())
            .ok_or_else(|| BackendError::NotSupported {
                facet: "Object".to_string(),
                member: format!("{:?}", self.variant.interface()),
            })?;
        self.binding = Some(LiveBinding { handle, interface });
        Ok(())
    }

    /// Allocate, bind and configure a new backend object.
    ///
    /// Attributes are validated before allocation. A failure during
    /// configuration leaves the component bound so it can still be deleted.
    pub fn create(&mut self, attributes: &ComponentRecord) -> Result<ConstraintReport, ComponentError> {
        let kind = self.kind;
        if self.is_bound() {
            return Err(ComponentError::creation(kind, &self.name, "already bound"));
        }
        self.variant
            .validate(attributes)
            .map_err(|e| ComponentError::creation(kind, &self.name, e))?;

        let handle = self
            .context
            .backend()
            .allocate_object(kind.object_code(), &self.name)
            .map_err(|e| ComponentError::creation(kind, &self.name, e))?;

        if let Err(e) = self.bind(handle) {
            if let Err(release) = self.context.backend().release_object(handle) {
                warn!("[sk-02] Failed to release unbindable '{}': {}", self.name, release);
            }
            return Err(ComponentError::creation(kind, &self.name, e));
        }

        let interface = self.interface()?;
        let report = self
            .variant
            .configure(&self.context, &interface, &self.name, attributes)
            .map_err(|e| ComponentError::creation(kind, &self.name, e))?;

        info!("[sk-02] Created {} '{}'", kind, self.name);
        Ok(report)
    }

    /// Bind to an existing object with this component's kind and name.
    pub fn load(&mut self) -> Result<(), ComponentError> {
        let path = self.path();
        let handle = self
            .context
            .backend()
            .resolve_object(&path)
            .map_err(|_| ComponentError::NotFound {
                path: path.to_string(),
            })?;
        self.bind(handle)?;
        debug!("[sk-02] Loaded {}", path);
        Ok(())
    }

    /// Resolve an existing object into a bound component.
    pub fn load_existing(
        context: SceneContext,
        kind: ComponentKind,
        name: impl Into<String>,
    ) -> Result<Self, ComponentError> {
        let mut component = Self::new(context, kind, name);
        component.load()?;
        Ok(component)
    }

    /// Read every managed attribute.
    ///
    /// Unreadable attributes become `Unavailable` readings.
    pub fn describe(&self) -> Result<ComponentDescription, ComponentError> {
        let interface = self.interface()?;
        let mut description = ComponentDescription::new(self.kind, self.name.clone());
        self.variant
            .describe(&self.context, &interface, &mut description);
        Ok(description)
    }

    /// Unload the backend object and unbind. Idempotent.
    pub fn delete(&mut self) -> Result<(), ComponentError> {
        let Some(binding) = self.binding else {
            return Ok(());
        };
        match self.context.backend().release_object(binding.handle) {
            Ok(()) | Err(BackendError::StaleHandle(_)) => {
                self.binding = None;
                info!("[sk-02] Deleted {} '{}'", self.kind, self.name);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether an object of this kind and name exists.
    pub fn exists(context: &SceneContext, kind: ComponentKind, name: &str) -> bool {
        context
            .backend()
            .resolve_object(&ObjectPath::new(kind.class_name(), name))
            .is_ok()
    }

    /// Unload an object by kind and name. Returns `false` when absent.
    pub fn delete_by_name(
        context: &SceneContext,
        kind: ComponentKind,
        name: &str,
    ) -> Result<bool, ComponentError> {
        let backend = context.backend();
        let handle = match backend.resolve_object(&ObjectPath::new(kind.class_name(), name)) {
            Ok(handle) => handle,
            Err(BackendError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        backend.release_object(handle)?;
        info!("[sk-02] Deleted {} '{}' by name", kind, name);
        Ok(true)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}
