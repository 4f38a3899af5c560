//! # Orbit Editor
//!
//! Drives the classical-element edit sequence on a satellite's propagator:
//!
//! ```text
//! convert initial state ──▶ select SMA size/shape ──▶ SMA, eccentricity
//!                       ──▶ inclination, argument of perigee
//!                       ──▶ select RAAN node      ──▶ RAAN
//!                       ──▶ select true anomaly   ──▶ true anomaly
//!                       ──▶ assign back ──▶ propagate
//! ```
//!
//! A parameterization is selected only when its element is being written,
//! so a partial edit touches nothing else.

use shared_scene::{
    codes, BackendError, InterfaceId, Member, Method, NodeRef, Property, SceneBackend,
    SceneBackendExt, Value,
};
use shared_types::{OrbitReading, OrbitSpec, PropagatorInfo, PropagatorKind, Reading};
use tracing::debug;

/// Typed view interface of a propagator kind, if the engine manages it.
fn propagator_interface(kind: PropagatorKind) -> Option<InterfaceId> {
    match kind {
        PropagatorKind::J2Perturbation => Some(InterfaceId::J2Propagator),
        PropagatorKind::TwoBody => Some(InterfaceId::TwoBodyPropagator),
        _ => None,
    }
}

/// Read the current propagator of a satellite interface.
pub fn read_propagator(backend: &dyn SceneBackend, satellite: &NodeRef) -> Reading<PropagatorInfo> {
    match backend.get_int(satellite, Property::PropagatorType) {
        Ok(code) => Reading::Value(match PropagatorKind::from_code(code) {
            Some(kind) => PropagatorInfo::of(kind),
            None => PropagatorInfo {
                label: format!("Unknown ({code})"),
                type_id: code,
            },
        }),
        Err(e) => Reading::unavailable(e.to_string()),
    }
}

/// Editor over a satellite's managed propagator.
pub struct OrbitEditor<'a> {
    backend: &'a dyn SceneBackend,
    propagator: NodeRef,
    kind: PropagatorKind,
}

impl<'a> OrbitEditor<'a> {
    /// Open the editor if the current propagator has managed elements.
    ///
    /// Returns `Ok(None)` for propagators whose elements are left alone.
    pub fn open(
        backend: &'a dyn SceneBackend,
        satellite: &NodeRef,
    ) -> Result<Option<Self>, BackendError> {
        let code = backend.get_int(satellite, Property::PropagatorType)?;
        let Some(kind) = PropagatorKind::from_code(code) else {
            return Ok(None);
        };
        let Some(interface) = propagator_interface(kind) else {
            return Ok(None);
        };
        let node = backend.child(satellite, Member::Propagator)?;
        let propagator =
            backend
                .query_interface(&node, interface)
                .ok_or_else(|| BackendError::NotSupported {
                    facet: "Propagator".to_string(),
                    member: format!("{interface:?}"),
                })?;
        Ok(Some(Self {
            backend,
            propagator,
            kind,
        }))
    }

    /// Propagator kind being edited.
    pub fn kind(&self) -> PropagatorKind {
        self.kind
    }

    /// Set the propagation step.
    pub fn set_step(&self, step: f64) -> Result<(), BackendError> {
        self.backend
            .set(&self.propagator, Property::Step, Value::Real(step))
    }

    /// Recompute the ephemeris.
    pub fn propagate(&self) -> Result<(), BackendError> {
        self.backend
            .invoke(&self.propagator, Method::Propagate)
            .map(|_| ())
    }

    fn convert(&self) -> Result<NodeRef, BackendError> {
        let produced = self
            .backend
            .invoke(&self.propagator, Method::ConvertToClassical)?
            .ok_or_else(|| BackendError::CallFailed("conversion produced no state".into()))?;
        self.backend
            .query_interface(&produced, InterfaceId::ClassicalState)
            .ok_or_else(|| BackendError::NotSupported {
                facet: "Classical".to_string(),
                member: "ClassicalState".to_string(),
            })
    }

    fn select(
        &self,
        owner: &NodeRef,
        selector: Property,
        code: i32,
        member: Member,
        interface: InterfaceId,
    ) -> Result<NodeRef, BackendError> {
        self.backend.set(owner, selector, Value::Int(code))?;
        let child = self.backend.child(owner, member)?;
        self.backend
            .query_interface(&child, interface)
            .ok_or_else(|| BackendError::NotSupported {
                facet: format!("{member:?}"),
                member: format!("{interface:?}"),
            })
    }

    /// Write the present elements, commit them and re-propagate.
    ///
    /// Does nothing when no element is present.
    pub fn apply_elements(&self, orbit: &OrbitSpec) -> Result<(), BackendError> {
        if orbit.is_empty() {
            return Ok(());
        }
        let classical = self.convert()?;
        self.backend.set(
            &classical,
            Property::CoordinateSystem,
            Value::Int(codes::COORDINATE_SYSTEM_J2000),
        )?;

        if orbit.semi_major_axis.is_some() || orbit.eccentricity.is_some() {
            let size_shape = self.select(
                &classical,
                Property::SizeShapeType,
                codes::SIZE_SHAPE_SEMI_MAJOR_AXIS,
                Member::SizeShape,
                InterfaceId::SizeShapeSemiMajorAxis,
            )?;
            if let Some(sma) = orbit.semi_major_axis {
                self.backend
                    .set(&size_shape, Property::SemiMajorAxis, Value::Real(sma))?;
            }
            if let Some(ecc) = orbit.eccentricity {
                self.backend
                    .set(&size_shape, Property::Eccentricity, Value::Real(ecc))?;
            }
        }

        let orientation = self.backend.child(&classical, Member::Orientation)?;
        if let Some(inc) = orbit.inclination {
            self.backend
                .set(&orientation, Property::Inclination, Value::Real(inc))?;
        }
        if let Some(argp) = orbit.arg_of_perigee {
            self.backend
                .set(&orientation, Property::ArgOfPerigee, Value::Real(argp))?;
        }
        if let Some(raan) = orbit.raan {
            let node = self.select(
                &orientation,
                Property::AscNodeType,
                codes::ASC_NODE_RAAN,
                Member::AscNode,
                InterfaceId::AscNodeRaan,
            )?;
            self.backend.set(&node, Property::Raan, Value::Real(raan))?;
        }
        if let Some(ta) = orbit.true_anomaly {
            let node = self.select(
                &classical,
                Property::LocationType,
                codes::LOCATION_TRUE_ANOMALY,
                Member::Location,
                InterfaceId::LocationTrueAnomaly,
            )?;
            self.backend
                .set(&node, Property::TrueAnomaly, Value::Real(ta))?;
        }

        self.backend
            .invoke(&self.propagator, Method::AssignInitialState(classical))?;
        self.propagate()?;
        debug!("[sk-02] Committed classical elements on {:?} propagator", self.kind);
        Ok(())
    }

    /// Read step and elements. Each element is read independently.
    pub fn read(&self) -> OrbitReading {
        let step = Reading::from(self.backend.get_real(&self.propagator, Property::Step));
        let classical = match self.convert() {
            Ok(node) => node,
            Err(e) => {
                let mut reading = OrbitReading::unavailable(e.to_string());
                reading.step = step;
                return reading;
            }
        };

        let size_shape = self.select(
            &classical,
            Property::SizeShapeType,
            codes::SIZE_SHAPE_SEMI_MAJOR_AXIS,
            Member::SizeShape,
            InterfaceId::SizeShapeSemiMajorAxis,
        );
        let (semi_major_axis, eccentricity) = match &size_shape {
            Ok(node) => (
                Reading::from(self.backend.get_real(node, Property::SemiMajorAxis)),
                Reading::from(self.backend.get_real(node, Property::Eccentricity)),
            ),
            Err(e) => (Reading::unavailable(e.to_string()), Reading::unavailable(e.to_string())),
        };

        let orientation = self.backend.child(&classical, Member::Orientation);
        let (inclination, arg_of_perigee, raan) = match &orientation {
            Ok(node) => (
                Reading::from(self.backend.get_real(node, Property::Inclination)),
                Reading::from(self.backend.get_real(node, Property::ArgOfPerigee)),
                Reading::from(
                    self.select(
                        node,
                        Property::AscNodeType,
                        codes::ASC_NODE_RAAN,
                        Member::AscNode,
                        InterfaceId::AscNodeRaan,
                    )
                    .and_then(|asc| self.backend.get_real(&asc, Property::Raan)),
                ),
            ),
            Err(e) => (
                Reading::unavailable(e.to_string()),
                Reading::unavailable(e.to_string()),
                Reading::unavailable(e.to_string()),
            ),
        };

        let true_anomaly = Reading::from(
            self.select(
                &classical,
                Property::LocationType,
                codes::LOCATION_TRUE_ANOMALY,
                Member::Location,
                InterfaceId::LocationTrueAnomaly,
            )
            .and_then(|loc| self.backend.get_real(&loc, Property::TrueAnomaly)),
        );

        OrbitReading {
            step,
            semi_major_axis,
            eccentricity,
            inclination,
            raan,
            arg_of_perigee,
            true_anomaly,
        }
    }
}
