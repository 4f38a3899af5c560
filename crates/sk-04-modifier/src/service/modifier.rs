//! # Component Modifier
//!
//! Binds to one existing component and applies patches to it in place.
//!
//! ## Write Order
//!
//! 1. Propagator kind
//! 2. Step, then re-propagate when no orbit edit follows
//! 3. Orbit elements (convert, write present fields, assign, propagate)
//! 4. Position, merged over the current one
//! 5. Constraints
//!
//! Every present field is validated before the first write.

use crate::domain::ComponentPatch;
use crate::error::ModifyError;
use serde_json::Value;
use shared_scene::{Method, NodeRef, Property, SceneBackendExt};
use shared_types::{
    ComponentKind, ConstraintSpec, GeodeticPosition, OrbitSpec, PositionSpec, PropagatorKind,
    Scalar,
};
use sk_02_components::views::{assign_position, query_position};
use sk_02_components::{Component, ConstraintApplier, ConstraintReport, OrbitEditor, SceneContext};
use tracing::{debug, info, warn};

/// What one patch touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchReport {
    /// Top-level fields written, in write order.
    pub touched: Vec<&'static str>,
    /// Per-constraint outcomes, when constraints were patched.
    pub constraints: ConstraintReport,
}

/// Patch engine for one component kind.
pub struct ComponentModifier {
    context: SceneContext,
    kind: ComponentKind,
    target: Option<Component>,
}

impl ComponentModifier {
    /// Unloaded modifier for a kind.
    pub fn new(context: SceneContext, kind: ComponentKind) -> Self {
        Self {
            context,
            kind,
            target: None,
        }
    }

    /// Satellite modifier.
    pub fn satellite(context: SceneContext) -> Self {
        Self::new(context, ComponentKind::Satellite)
    }

    /// Facility modifier.
    pub fn facility(context: SceneContext) -> Self {
        Self::new(context, ComponentKind::Facility)
    }

    /// Kind this modifier edits.
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Loaded component, if any.
    pub fn target(&self) -> Option<&Component> {
        self.target.as_ref()
    }

    /// True once [`load`](Self::load) succeeded.
    pub fn is_loaded(&self) -> bool {
        self.target.is_some()
    }

    /// Bind to the existing component with this name.
    pub fn load(&mut self, name: &str) -> Result<&mut Self, ModifyError> {
        let component = Component::load_existing(self.context.clone(), self.kind, name)?;
        debug!("[sk-04] Loaded {} '{}'", self.kind, name);
        self.target = Some(component);
        Ok(self)
    }

    fn loaded(&self) -> Result<&Component, ModifyError> {
        self.target.as_ref().ok_or(ModifyError::NotLoaded(self.kind))
    }

    /// Apply a patch. Only present fields are written.
    pub fn apply(&self, patch: &ComponentPatch) -> Result<PatchReport, ModifyError> {
        let target = self.loaded()?;
        self.check_fields(patch)?;
        patch.validate()?;

        let mut report = PatchReport::default();
        if patch.is_empty() {
            debug!("[sk-04] Empty patch for '{}'", target.name());
            return Ok(report);
        }

        let interface = target.interface()?;
        match self.kind {
            ComponentKind::Satellite => self.patch_satellite(&interface, patch, &mut report)?,
            ComponentKind::Facility => self.patch_facility(&interface, patch, &mut report)?,
        }

        if let Some(constraints) = &patch.constraints {
            report.constraints = ConstraintApplier::open(
                self.context.backend(),
                self.context.constraints(),
                &interface,
                target.name(),
            )?
            .apply_all(constraints);
            report.touched.push("constraints");
        }

        info!(
            "[sk-04] Patched {} '{}': {}",
            self.kind,
            target.name(),
            report.touched.join(", ")
        );
        Ok(report)
    }

    /// Decode and apply a JSON patch.
    pub fn apply_json(&self, patch: Value) -> Result<PatchReport, ModifyError> {
        self.loaded()?;
        self.apply(&ComponentPatch::from_json(patch)?)
    }

    /// Set one field by dotted path, e.g. `orbit.semiMajorAxis`.
    pub fn set(&self, path: &str, value: Value) -> Result<PatchReport, ModifyError> {
        self.loaded()?;
        self.apply(&ComponentPatch::from_dotted(path, value)?)
    }

    /// Overwrite the present orbital elements.
    pub fn set_orbit(&self, orbit: OrbitSpec) -> Result<PatchReport, ModifyError> {
        self.apply(&ComponentPatch::orbit(orbit))
    }

    /// Change the propagation step.
    pub fn set_propagator_step(&self, step: f64) -> Result<PatchReport, ModifyError> {
        self.apply(&ComponentPatch {
            step: Some(step),
            ..ComponentPatch::default()
        })
    }

    /// Move the facility. Absent coordinates keep their current value.
    pub fn set_position(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        altitude: Option<f64>,
    ) -> Result<PatchReport, ModifyError> {
        self.apply(&ComponentPatch::position(PositionSpec {
            latitude,
            longitude,
            altitude: altitude.map(Scalar::Real),
        }))
    }

    /// Add or update one constraint.
    pub fn set_constraint(&self, constraint: ConstraintSpec) -> Result<PatchReport, ModifyError> {
        self.set_constraints(vec![constraint])
    }

    /// Add or update several constraints.
    pub fn set_constraints(
        &self,
        constraints: Vec<ConstraintSpec>,
    ) -> Result<PatchReport, ModifyError> {
        self.apply(&ComponentPatch::constraints(constraints))
    }

    fn check_fields(&self, patch: &ComponentPatch) -> Result<(), ModifyError> {
        let allowed: &[&str] = match self.kind {
            ComponentKind::Satellite => &["orbit", "propagator", "step", "constraints"],
            ComponentKind::Facility => &["position", "constraints"],
        };
        match patch
            .present_fields()
            .into_iter()
            .find(|field| !allowed.contains(field))
        {
            Some(field) => Err(ModifyError::UnsupportedField {
                kind: self.kind,
                field: field.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn patch_satellite(
        &self,
        interface: &NodeRef,
        patch: &ComponentPatch,
        report: &mut PatchReport,
    ) -> Result<(), ModifyError> {
        let backend = self.context.backend();
        let requested = patch.propagator_kind()?;
        let step = patch.requested_step()?;
        let orbit = patch.orbit.clone().unwrap_or_default();

        if step.is_some() || !orbit.is_empty() {
            let effective = match requested {
                Some(kind) => kind,
                None => {
                    let code = backend.get_int(interface, Property::PropagatorType)?;
                    PropagatorKind::from_code(code)
                        .ok_or_else(|| ModifyError::UnsupportedPropagator(format!("#{code}")))?
                }
            };
            if !effective.manages_elements() {
                return Err(ModifyError::UnsupportedPropagator(effective.to_string()));
            }
        }

        if let Some(kind) = requested {
            backend.invoke(interface, Method::SetPropagatorType(kind.code()))?;
            report.touched.push("propagator");
        }

        if step.is_none() && orbit.is_empty() {
            return Ok(());
        }
        let current = backend.get_int(interface, Property::PropagatorType)?;
        let editor = OrbitEditor::open(backend, interface)?
            .ok_or_else(|| ModifyError::UnsupportedPropagator(format!("#{current}")))?;

        if let Some(step) = step {
            editor.set_step(step)?;
            if orbit.is_empty() {
                editor.propagate()?;
            }
            report.touched.push("step");
        }
        if !orbit.is_empty() {
            editor.apply_elements(&orbit)?;
            report.touched.push("orbit");
        }
        Ok(())
    }

    fn patch_facility(
        &self,
        interface: &NodeRef,
        patch: &ComponentPatch,
        report: &mut PatchReport,
    ) -> Result<(), ModifyError> {
        let Some(position) = &patch.position else {
            return Ok(());
        };
        if position.latitude.is_none() && position.longitude.is_none() && position.altitude.is_none() {
            return Ok(());
        }
        let backend = self.context.backend();
        let complete = position.latitude.is_some()
            && position.longitude.is_some()
            && position.altitude.is_some();
        let current = match query_position(backend, interface) {
            Ok(current) => current,
            Err(e) if complete => {
                warn!("[sk-04] Current position unreadable, overwriting: {}", e);
                GeodeticPosition::default()
            }
            Err(e) => return Err(e.into()),
        };
        assign_position(backend, interface, position.merged_over(current))?;
        report.touched.push("position");
        Ok(())
    }
}
