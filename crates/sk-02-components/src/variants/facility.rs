//! Ground facility.

use crate::domain::SceneContext;
use crate::ports::ComponentVariant;
use crate::views::{assign_position, read_constraints, read_position, ConstraintApplier, ConstraintReport};
use shared_scene::{BackendError, InterfaceId, NodeRef};
use shared_types::{ComponentDescription, ComponentKind, ComponentRecord, GeodeticPosition, RecordError};
use tracing::warn;

/// Facility configuration: geodetic position, then constraints.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacilityVariant;

impl ComponentVariant for FacilityVariant {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Facility
    }

    fn interface(&self) -> InterfaceId {
        InterfaceId::Facility
    }

    fn validate(&self, attributes: &ComponentRecord) -> Result<(), RecordError> {
        match &attributes.position {
            Some(position) => position.validate(),
            None => Ok(()),
        }
    }

    fn configure(
        &self,
        context: &SceneContext,
        interface: &NodeRef,
        name: &str,
        attributes: &ComponentRecord,
    ) -> Result<ConstraintReport, BackendError> {
        let backend = context.backend();
        let position = attributes
            .position
            .clone()
            .unwrap_or_default()
            .merged_over(GeodeticPosition::default());
        assign_position(backend, interface, position)?;

        if attributes.orbit.is_some() || attributes.propagator.is_some() || attributes.step.is_some() {
            warn!("[sk-02] Ignoring orbit fields on facility '{}'", name);
        }

        Ok(ConstraintApplier::open(backend, context.constraints(), interface, name)?
            .apply_all(&attributes.constraints))
    }

    fn describe(
        &self,
        context: &SceneContext,
        interface: &NodeRef,
        description: &mut ComponentDescription,
    ) {
        let backend = context.backend();
        description.position = Some(read_position(backend, interface));
        description.constraints = read_constraints(backend, context.constraints(), interface);
    }
}
