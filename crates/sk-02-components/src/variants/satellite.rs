//! Orbiting body.

use crate::domain::SceneContext;
use crate::ports::ComponentVariant;
use crate::views::{read_constraints, read_propagator, ConstraintApplier, ConstraintReport, OrbitEditor};
use shared_scene::{BackendError, InterfaceId, Method, NodeRef, SceneBackend};
use shared_types::{
    validate_step, ComponentDescription, ComponentKind, ComponentRecord, OrbitReading,
    RecordError, DEFAULT_STEP_SECONDS,
};
use tracing::warn;

/// Satellite configuration: propagator, classical elements, step.
#[derive(Debug, Default, Clone, Copy)]
pub struct SatelliteVariant;

impl ComponentVariant for SatelliteVariant {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Satellite
    }

    fn interface(&self) -> InterfaceId {
        InterfaceId::Satellite
    }

    fn validate(&self, attributes: &ComponentRecord) -> Result<(), RecordError> {
        attributes.propagator_kind()?;
        if let Some(orbit) = &attributes.orbit {
            orbit.validate()?;
        }
        if let Some(step) = attributes.step {
            validate_step(step)?;
        }
        Ok(())
    }

    fn configure(
        &self,
        context: &SceneContext,
        interface: &NodeRef,
        name: &str,
        attributes: &ComponentRecord,
    ) -> Result<ConstraintReport, BackendError> {
        let backend = context.backend();
        let kind = attributes.propagator_kind().unwrap_or_default();
        backend.invoke(interface, Method::SetPropagatorType(kind.code()))?;

        if kind.manages_elements() {
            let editor = OrbitEditor::open(backend, interface)?.ok_or_else(|| {
                BackendError::NotSupported {
                    facet: "Propagator".to_string(),
                    member: kind.tag().to_string(),
                }
            })?;
            editor.set_step(attributes.step.unwrap_or(DEFAULT_STEP_SECONDS))?;
            let orbit = attributes.orbit.clone().unwrap_or_default();
            editor.apply_elements(&orbit.with_creation_defaults())?;
        } else if attributes.orbit.is_some() || attributes.step.is_some() {
            warn!(
                "[sk-02] {} propagator on '{}' keeps its own elements, ignoring orbit and step",
                kind, name
            );
        }
        if attributes.position.is_some() {
            warn!("[sk-02] Ignoring position on satellite '{}'", name);
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
        let backend: &dyn SceneBackend = context.backend();
        description.propagator = Some(read_propagator(backend, interface));
        description.orbit = match OrbitEditor::open(backend, interface) {
            Ok(Some(editor)) => Some(editor.read()),
            Ok(None) => None,
            Err(e) => Some(OrbitReading::unavailable(e.to_string())),
        };
        description.constraints = read_constraints(backend, context.constraints(), interface);
    }
}
