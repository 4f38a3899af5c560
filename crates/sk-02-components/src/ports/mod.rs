//! # Ports Layer
//!
//! The seam between the generic component lifecycle and the per-kind
//! configuration logic.

use crate::domain::SceneContext;
use crate::views::ConstraintReport;
use shared_scene::{BackendError, InterfaceId, NodeRef};
use shared_types::{ComponentDescription, ComponentKind, ComponentRecord, RecordError};

/// Per-kind behavior plugged into [`Component`](crate::Component).
pub trait ComponentVariant: Send + Sync {
    /// Kind handled by this variant.
    fn kind(&self) -> ComponentKind;

    /// Configuration interface queried on the object root.
    fn interface(&self) -> InterfaceId;

    /// Check attributes before anything is allocated.
    fn validate(&self, attributes: &ComponentRecord) -> Result<(), RecordError>;

    /// Configure a freshly bound object.
    fn configure(
        &self,
        context: &SceneContext,
        interface: &NodeRef,
        name: &str,
        attributes: &ComponentRecord,
    ) -> Result<ConstraintReport, BackendError>;

    /// Fill the kind-specific readings of a description.
    fn describe(
        &self,
        context: &SceneContext,
        interface: &NodeRef,
        description: &mut ComponentDescription,
    );
}
