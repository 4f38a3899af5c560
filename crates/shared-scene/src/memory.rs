//! # In-Memory Scene
//!
//! Implements [`SceneBackend`] over a process-local object table.
//!
//! The adapter models the parts of a real backend the engine depends on:
//!
//! - Converting the initial state yields a scratch representation whose
//!   parameterizations start out as altitude / longitude-of-node /
//!   argument-of-latitude. The semi-major-axis, RAAN and true-anomaly views
//!   only appear after the matching selector is written.
//! - Scratch edits reach the object only through `AssignInitialState`.
//! - Every object starts with the line-of-sight constraint.
//! - Names are unique across the scene.
//!
//! Faults can be injected per object property, per allocation, per
//! constraint code and per typed view.

use crate::backend::{BackendError, SceneBackend};
use crate::domain::{
    codes, Facet, InterfaceId, Member, Method, NodeRef, ObjectHandle, ObjectPath, Property, Value,
};
use parking_lot::RwLock;
use shared_types::{normalize_longitude, ComponentKind, GeodeticPosition, PropagatorKind};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Debug;
use tracing::debug;

/// Default propagation step of a new satellite (s).
const DEFAULT_STEP: f64 = 60.0;

/// Name reported for the line-of-sight constraint.
const LINE_OF_SIGHT_NAME: &str = "LineOfSight";

/// One constraint type the scene can instantiate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Backend type code.
    pub code: i32,
    /// Name reported by the constraint.
    pub name: String,
    /// Whether the constraint exposes min/max bounds.
    pub min_max: bool,
}

impl CatalogEntry {
    /// Build an entry.
    pub fn new(code: i32, name: impl Into<String>, min_max: bool) -> Self {
        Self {
            code,
            name: name.into(),
            min_max,
        }
    }
}

/// Classical elements stored on a satellite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitElements {
    /// Semi-major axis (km).
    pub semi_major_axis: f64,
    /// Eccentricity.
    pub eccentricity: f64,
    /// Inclination (deg).
    pub inclination: f64,
    /// RAAN (deg).
    pub raan: f64,
    /// Argument of perigee (deg).
    pub arg_of_perigee: f64,
    /// True anomaly (deg).
    pub true_anomaly: f64,
}

impl Default for OrbitElements {
    fn default() -> Self {
        Self {
            semi_major_axis: 6678.137,
            eccentricity: 0.0,
            inclination: 28.5,
            raan: 0.0,
            arg_of_perigee: 0.0,
            true_anomaly: 0.0,
        }
    }
}

/// Read-only view of a satellite for assertions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteSnapshot {
    /// Propagator enumeration value.
    pub propagator_code: i32,
    /// Propagation step (s).
    pub step: f64,
    /// Committed elements.
    pub elements: OrbitElements,
    /// Number of `Propagate` calls so far.
    pub propagations: u32,
}

/// Read-only view of a constraint for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSnapshot {
    /// Type code.
    pub code: i32,
    /// Name.
    pub name: String,
    /// Minimum enabled.
    pub enable_min: bool,
    /// Minimum value.
    pub min: f64,
    /// Maximum enabled.
    pub enable_max: bool,
    /// Maximum value.
    pub max: f64,
}

#[derive(Debug, Clone)]
struct Representation {
    id: u64,
    elements: OrbitElements,
    coordinate_system: i32,
    size_shape_type: i32,
    asc_node_type: i32,
    location_type: i32,
}

#[derive(Debug, Clone)]
struct SatelliteBody {
    propagator: i32,
    step: f64,
    elements: OrbitElements,
    propagations: u32,
    representation: Option<Representation>,
}

impl SatelliteBody {
    fn manages_elements(&self) -> bool {
        PropagatorKind::from_code(self.propagator).is_some_and(PropagatorKind::manages_elements)
    }
}

#[derive(Debug, Clone)]
enum Body {
    Satellite(SatelliteBody),
    Facility(GeodeticPosition),
    Foreign,
}

#[derive(Debug, Clone)]
struct ConstraintSlot {
    id: u64,
    code: i32,
    name: String,
    min_max: bool,
    enable_min: bool,
    min: f64,
    enable_max: bool,
    max: f64,
}

impl ConstraintSlot {
    fn snapshot(&self) -> ConstraintSnapshot {
        ConstraintSnapshot {
            code: self.code,
            name: self.name.clone(),
            enable_min: self.enable_min,
            min: self.min,
            enable_max: self.enable_max,
            max: self.max,
        }
    }
}

#[derive(Debug, Clone)]
struct SceneObject {
    class_name: String,
    name: String,
    body: Body,
    constraints: Vec<ConstraintSlot>,
    next_constraint_id: u64,
}

impl SceneObject {
    fn satellite(&self, facet: Facet) -> Result<&SatelliteBody, BackendError> {
        match &self.body {
            Body::Satellite(sat) => Ok(sat),
            _ => Err(not_supported(facet, "satellite")),
        }
    }

    fn satellite_mut(&mut self, facet: Facet) -> Result<&mut SatelliteBody, BackendError> {
        match &mut self.body {
            Body::Satellite(sat) => Ok(sat),
            _ => Err(not_supported(facet, "satellite")),
        }
    }

    fn representation(&self, facet: Facet, id: u64) -> Result<&Representation, BackendError> {
        match self.satellite(facet)?.representation.as_ref() {
            Some(rep) if rep.id == id => Ok(rep),
            _ => Err(BackendError::CallFailed(format!(
                "representation {id} of '{}' has expired",
                self.name
            ))),
        }
    }

    fn representation_mut(
        &mut self,
        facet: Facet,
        id: u64,
    ) -> Result<&mut Representation, BackendError> {
        let name = self.name.clone();
        match self.satellite_mut(facet)?.representation.as_mut() {
            Some(rep) if rep.id == id => Ok(rep),
            _ => Err(BackendError::CallFailed(format!(
                "representation {id} of '{name}' has expired"
            ))),
        }
    }

    fn constraint(&self, id: u64) -> Result<&ConstraintSlot, BackendError> {
        self.constraints
            .iter()
            .find(|slot| slot.id == id)
            .ok_or_else(|| BackendError::CallFailed(format!("constraint {id} was removed")))
    }

    fn constraint_mut(&mut self, id: u64) -> Result<&mut ConstraintSlot, BackendError> {
        self.constraints
            .iter_mut()
            .find(|slot| slot.id == id)
            .ok_or_else(|| BackendError::CallFailed(format!("constraint {id} was removed")))
    }

    fn has_constraints(&self) -> bool {
        !matches!(self.body, Body::Foreign)
    }

    fn push_constraint(&mut self, code: i32, name: String, min_max: bool) -> u64 {
        let id = self.next_constraint_id;
        self.next_constraint_id += 1;
        self.constraints.push(ConstraintSlot {
            id,
            code,
            name,
            min_max,
            enable_min: false,
            min: 0.0,
            enable_max: false,
            max: 0.0,
        });
        id
    }
}

#[derive(Debug, Default)]
struct FaultPlan {
    properties: HashSet<(String, Property)>,
    allocations: HashSet<String>,
    constraint_codes: HashSet<i32>,
    interfaces: HashSet<(String, InterfaceId)>,
}

#[derive(Debug, Default)]
struct SceneState {
    next_handle: u64,
    next_representation: u64,
    objects: BTreeMap<u64, SceneObject>,
    writes: Vec<(String, Property)>,
    faults: FaultPlan,
}

impl SceneState {
    fn object(&self, handle: ObjectHandle) -> Result<&SceneObject, BackendError> {
        self.objects
            .get(&handle.0)
            .ok_or(BackendError::StaleHandle(handle))
    }

    fn name_taken(&self, name: &str) -> bool {
        self.objects.values().any(|obj| obj.name == name)
    }

    fn insert(&mut self, class_name: &str, name: &str, body: Body) -> ObjectHandle {
        self.next_handle += 1;
        let handle = ObjectHandle(self.next_handle);
        let mut object = SceneObject {
            class_name: class_name.to_string(),
            name: name.to_string(),
            body,
            constraints: Vec::new(),
            next_constraint_id: 0,
        };
        if object.has_constraints() {
            object.push_constraint(codes::LINE_OF_SIGHT, LINE_OF_SIGHT_NAME.to_string(), false);
        }
        self.objects.insert(handle.0, object);
        handle
    }
}

fn not_supported(facet: Facet, member: impl Debug) -> BackendError {
    BackendError::NotSupported {
        facet: format!("{facet:?}"),
        member: format!("{member:?}"),
    }
}

fn injected(name: &str, what: impl Debug) -> BackendError {
    BackendError::CallFailed(format!("injected fault on '{name}': {what:?}"))
}

fn real(property: Property, value: &Value) -> Result<f64, BackendError> {
    value.as_real().ok_or(BackendError::TypeMismatch {
        property,
        expected: "real",
    })
}

fn int(property: Property, value: &Value) -> Result<i32, BackendError> {
    value.as_int().ok_or(BackendError::TypeMismatch {
        property,
        expected: "int",
    })
}

fn flag(property: Property, value: &Value) -> Result<bool, BackendError> {
    value.as_bool().ok_or(BackendError::TypeMismatch {
        property,
        expected: "bool",
    })
}

fn gate(open: bool, facet: Facet, property: Property) -> Result<(), BackendError> {
    if open {
        Ok(())
    } else {
        Err(not_supported(facet, property))
    }
}

fn reject(property: Property, reason: impl Into<String>) -> BackendError {
    BackendError::InvalidValue {
        property,
        reason: reason.into(),
    }
}

/// Process-local scene backend.
#[derive(Debug)]
pub struct InMemoryScene {
    catalog: HashMap<i32, CatalogEntry>,
    state: RwLock<SceneState>,
}

impl InMemoryScene {
    /// Create an empty scene that can instantiate the given constraint types.
    pub fn new(catalog: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            catalog: catalog
                .into_iter()
                .map(|entry| (entry.code, entry))
                .collect(),
            state: RwLock::new(SceneState::default()),
        }
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.state.read().objects.len()
    }

    /// True when the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of every live object, in creation order.
    pub fn object_names(&self) -> Vec<String> {
        self.state
            .read()
            .objects
            .values()
            .map(|obj| obj.name.clone())
            .collect()
    }

    /// Add an object of a class the engine does not manage.
    pub fn insert_foreign(&self, class_name: &str, name: &str) -> Result<ObjectHandle, BackendError> {
        let mut state = self.state.write();
        if state.name_taken(name) {
            return Err(BackendError::DuplicateName(name.to_string()));
        }
        Ok(state.insert(class_name, name, Body::Foreign))
    }

    /// Snapshot of a satellite by name.
    pub fn satellite(&self, name: &str) -> Option<SatelliteSnapshot> {
        let state = self.state.read();
        state.objects.values().find_map(|obj| match &obj.body {
            Body::Satellite(sat) if obj.name == name => Some(SatelliteSnapshot {
                propagator_code: sat.propagator,
                step: sat.step,
                elements: sat.elements,
                propagations: sat.propagations,
            }),
            _ => None,
        })
    }

    /// Position of a facility by name.
    pub fn facility_position(&self, name: &str) -> Option<GeodeticPosition> {
        let state = self.state.read();
        state.objects.values().find_map(|obj| match &obj.body {
            Body::Facility(position) if obj.name == name => Some(*position),
            _ => None,
        })
    }

    /// Constraints of an object by name, in collection order.
    pub fn constraints(&self, name: &str) -> Vec<ConstraintSnapshot> {
        let state = self.state.read();
        state
            .objects
            .values()
            .find(|obj| obj.name == name)
            .map(|obj| obj.constraints.iter().map(ConstraintSlot::snapshot).collect())
            .unwrap_or_default()
    }

    /// Properties written on an object since the last [`clear_writes`](Self::clear_writes).
    pub fn writes(&self, name: &str) -> Vec<Property> {
        self.state
            .read()
            .writes
            .iter()
            .filter(|(object, _)| object == name)
            .map(|(_, property)| *property)
            .collect()
    }

    /// Forget recorded writes.
    pub fn clear_writes(&self) {
        self.state.write().writes.clear();
    }

    /// Make reads and writes of `property` on object `name` fail.
    pub fn inject_property_fault(&self, name: &str, property: Property) {
        self.state
            .write()
            .faults
            .properties
            .insert((name.to_string(), property));
    }

    /// Make allocation of an object named `name` fail.
    pub fn inject_allocation_fault(&self, name: &str) {
        self.state
            .write()
            .faults
            .allocations
            .insert(name.to_string());
    }

    /// Make adding constraint type `code` fail on every object.
    pub fn inject_constraint_fault(&self, code: i32) {
        self.state.write().faults.constraint_codes.insert(code);
    }

    /// Hide a typed view on object `name`.
    pub fn inject_interface_fault(&self, name: &str, interface: InterfaceId) {
        self.state
            .write()
            .faults
            .interfaces
            .insert((name.to_string(), interface));
    }

    /// Remove every injected fault.
    pub fn clear_faults(&self) {
        self.state.write().faults = FaultPlan::default();
    }

    fn check_property_fault(
        state: &SceneState,
        name: &str,
        property: Property,
    ) -> Result<(), BackendError> {
        if state
            .faults
            .properties
            .contains(&(name.to_string(), property))
        {
            return Err(injected(name, property));
        }
        Ok(())
    }

    fn read_property(obj: &SceneObject, facet: Facet, property: Property) -> Result<Value, BackendError> {
        use Property as P;
        match (facet, property) {
            (Facet::Satellite, P::PropagatorType) => {
                Ok(Value::Int(obj.satellite(facet)?.propagator))
            }
            (Facet::Propagator, P::Step) => {
                let sat = obj.satellite(facet)?;
                gate(sat.manages_elements(), facet, property)?;
                Ok(Value::Real(sat.step))
            }
            (Facet::Classical(id), P::CoordinateSystem) => {
                Ok(Value::Int(obj.representation(facet, id)?.coordinate_system))
            }
            (Facet::Classical(id), P::SizeShapeType) => {
                Ok(Value::Int(obj.representation(facet, id)?.size_shape_type))
            }
            (Facet::Classical(id), P::LocationType) => {
                Ok(Value::Int(obj.representation(facet, id)?.location_type))
            }
            (Facet::SizeShape(id), P::SemiMajorAxis | P::Eccentricity) => {
                let rep = obj.representation(facet, id)?;
                gate(
                    rep.size_shape_type == codes::SIZE_SHAPE_SEMI_MAJOR_AXIS,
                    facet,
                    property,
                )?;
                Ok(Value::Real(if property == P::SemiMajorAxis {
                    rep.elements.semi_major_axis
                } else {
                    rep.elements.eccentricity
                }))
            }
            (Facet::Orientation(id), P::Inclination) => {
                Ok(Value::Real(obj.representation(facet, id)?.elements.inclination))
            }
            (Facet::Orientation(id), P::ArgOfPerigee) => {
                Ok(Value::Real(obj.representation(facet, id)?.elements.arg_of_perigee))
            }
            (Facet::Orientation(id), P::AscNodeType) => {
                Ok(Value::Int(obj.representation(facet, id)?.asc_node_type))
            }
            (Facet::AscNode(id), P::Raan) => {
                let rep = obj.representation(facet, id)?;
                gate(rep.asc_node_type == codes::ASC_NODE_RAAN, facet, property)?;
                Ok(Value::Real(rep.elements.raan))
            }
            (Facet::Location(id), P::TrueAnomaly) => {
                let rep = obj.representation(facet, id)?;
                gate(
                    rep.location_type == codes::LOCATION_TRUE_ANOMALY,
                    facet,
                    property,
                )?;
                Ok(Value::Real(rep.elements.true_anomaly))
            }
            (Facet::Position, P::Latitude | P::Longitude | P::Altitude) => match &obj.body {
                Body::Facility(position) => Ok(Value::Real(match property {
                    P::Latitude => position.latitude,
                    P::Longitude => position.longitude,
                    _ => position.altitude,
                })),
                _ => Err(not_supported(facet, property)),
            },
            (Facet::AccessConstraints, P::Count) => {
                Ok(Value::Int(i32::try_from(obj.constraints.len()).unwrap_or(i32::MAX)))
            }
            (Facet::Constraint(id), P::ConstraintName) => {
                Ok(Value::Text(obj.constraint(id)?.name.clone()))
            }
            (Facet::Constraint(id), P::ConstraintType) => Ok(Value::Int(obj.constraint(id)?.code)),
            (Facet::Constraint(id), P::EnableMin | P::Min | P::EnableMax | P::Max) => {
                let slot = obj.constraint(id)?;
                gate(slot.min_max, facet, property)?;
                Ok(match property {
                    P::EnableMin => Value::Bool(slot.enable_min),
                    P::Min => Value::Real(slot.min),
                    P::EnableMax => Value::Bool(slot.enable_max),
                    _ => Value::Real(slot.max),
                })
            }
            _ => Err(not_supported(facet, property)),
        }
    }

    fn write_property(
        obj: &mut SceneObject,
        facet: Facet,
        property: Property,
        value: &Value,
    ) -> Result<(), BackendError> {
        use Property as P;
        match (facet, property) {
            (Facet::Propagator, P::Step) => {
                let step = real(property, value)?;
                let sat = obj.satellite_mut(facet)?;
                gate(sat.manages_elements(), facet, property)?;
                if !step.is_finite() || step <= 0.0 {
                    return Err(reject(property, format!("step must be positive, got {step}")));
                }
                sat.step = step;
            }
            (Facet::Classical(id), P::CoordinateSystem) => {
                let code = int(property, value)?;
                obj.representation_mut(facet, id)?.coordinate_system = code;
            }
            (Facet::Classical(id), P::SizeShapeType) => {
                let code = int(property, value)?;
                if !(0..=5).contains(&code) {
                    return Err(reject(property, format!("unknown size/shape type {code}")));
                }
                obj.representation_mut(facet, id)?.size_shape_type = code;
            }
            (Facet::Classical(id), P::LocationType) => {
                let code = int(property, value)?;
                if !(0..=7).contains(&code) {
                    return Err(reject(property, format!("unknown location type {code}")));
                }
                obj.representation_mut(facet, id)?.location_type = code;
            }
            (Facet::SizeShape(id), P::SemiMajorAxis) => {
                let sma = real(property, value)?;
                let rep = obj.representation_mut(facet, id)?;
                gate(
                    rep.size_shape_type == codes::SIZE_SHAPE_SEMI_MAJOR_AXIS,
                    facet,
                    property,
                )?;
                if !sma.is_finite() || sma <= 0.0 {
                    return Err(reject(property, format!("must be positive, got {sma}")));
                }
                rep.elements.semi_major_axis = sma;
            }
            (Facet::SizeShape(id), P::Eccentricity) => {
                let ecc = real(property, value)?;
                let rep = obj.representation_mut(facet, id)?;
                gate(
                    rep.size_shape_type == codes::SIZE_SHAPE_SEMI_MAJOR_AXIS,
                    facet,
                    property,
                )?;
                if !(0.0..1.0).contains(&ecc) {
                    return Err(reject(property, format!("must be in [0, 1), got {ecc}")));
                }
                rep.elements.eccentricity = ecc;
            }
            (Facet::Orientation(id), P::Inclination) => {
                let inc = real(property, value)?;
                obj.representation_mut(facet, id)?.elements.inclination = inc;
            }
            (Facet::Orientation(id), P::ArgOfPerigee) => {
                let argp = real(property, value)?;
                obj.representation_mut(facet, id)?.elements.arg_of_perigee = argp;
            }
            (Facet::Orientation(id), P::AscNodeType) => {
                let code = int(property, value)?;
                if !(0..=1).contains(&code) {
                    return Err(reject(property, format!("unknown ascending node type {code}")));
                }
                obj.representation_mut(facet, id)?.asc_node_type = code;
            }
            (Facet::AscNode(id), P::Raan) => {
                let raan = real(property, value)?;
                let rep = obj.representation_mut(facet, id)?;
                gate(rep.asc_node_type == codes::ASC_NODE_RAAN, facet, property)?;
                rep.elements.raan = raan;
            }
            (Facet::Location(id), P::TrueAnomaly) => {
                let ta = real(property, value)?;
                let rep = obj.representation_mut(facet, id)?;
                gate(
                    rep.location_type == codes::LOCATION_TRUE_ANOMALY,
                    facet,
                    property,
                )?;
                rep.elements.true_anomaly = ta;
            }
            (Facet::Constraint(id), P::EnableMin | P::EnableMax) => {
                let enabled = flag(property, value)?;
                let slot = obj.constraint_mut(id)?;
                gate(slot.min_max, facet, property)?;
                if property == P::EnableMin {
                    slot.enable_min = enabled;
                } else {
                    slot.enable_max = enabled;
                }
            }
            (Facet::Constraint(id), P::Min | P::Max) => {
                let bound = real(property, value)?;
                let slot = obj.constraint_mut(id)?;
                gate(slot.min_max, facet, property)?;
                if property == P::Min {
                    slot.min = bound;
                } else {
                    slot.max = bound;
                }
            }
            _ => return Err(not_supported(facet, property)),
        }
        Ok(())
    }
}

impl SceneBackend for InMemoryScene {
    fn allocate_object(&self, object_code: i32, name: &str) -> Result<ObjectHandle, BackendError> {
        let mut state = self.state.write();
        if state.faults.allocations.contains(name) {
            return Err(BackendError::AllocationFailed {
                name: name.to_string(),
                reason: "injected fault".to_string(),
            });
        }
        if name.is_empty() {
            return Err(BackendError::AllocationFailed {
                name: String::new(),
                reason: "empty name".to_string(),
            });
        }
        if state.name_taken(name) {
            return Err(BackendError::DuplicateName(name.to_string()));
        }
        let kind = ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.object_code() == object_code)
            .ok_or_else(|| BackendError::AllocationFailed {
                name: name.to_string(),
                reason: format!("unsupported object type {object_code}"),
            })?;
        let body = match kind {
            ComponentKind::Satellite => Body::Satellite(SatelliteBody {
                propagator: PropagatorKind::TwoBody.code(),
                step: DEFAULT_STEP,
                elements: OrbitElements::default(),
                propagations: 0,
                representation: None,
            }),
            ComponentKind::Facility => Body::Facility(GeodeticPosition {
                latitude: 40.0386,
                longitude: -75.5966,
                altitude: 0.0,
            }),
        };
        let handle = state.insert(kind.class_name(), name, body);
        debug!("[scene] Allocated {} '{}' as {}", kind, name, handle);
        Ok(handle)
    }

    fn resolve_object(&self, path: &ObjectPath) -> Result<ObjectHandle, BackendError> {
        let state = self.state.read();
        state
            .objects
            .iter()
            .find(|(_, obj)| obj.class_name == path.class_name && obj.name == path.name)
            .map(|(id, _)| ObjectHandle(*id))
            .ok_or_else(|| BackendError::NotFound(path.to_string()))
    }

    fn release_object(&self, handle: ObjectHandle) -> Result<(), BackendError> {
        let mut state = self.state.write();
        match state.objects.remove(&handle.0) {
            Some(obj) => {
                debug!("[scene] Released {} '{}'", obj.class_name, obj.name);
                Ok(())
            }
            None => Err(BackendError::StaleHandle(handle)),
        }
    }

    fn enumerate_children(&self) -> Result<Vec<ObjectHandle>, BackendError> {
        Ok(self
            .state
            .read()
            .objects
            .keys()
            .map(|id| ObjectHandle(*id))
            .collect())
    }

    fn class_name(&self, handle: ObjectHandle) -> Result<String, BackendError> {
        Ok(self.state.read().object(handle)?.class_name.clone())
    }

    fn instance_name(&self, handle: ObjectHandle) -> Result<String, BackendError> {
        Ok(self.state.read().object(handle)?.name.clone())
    }

    fn query_interface(&self, node: &NodeRef, interface: InterfaceId) -> Option<NodeRef> {
        let state = self.state.read();
        let obj = state.object(node.object).ok()?;
        if state
            .faults
            .interfaces
            .contains(&(obj.name.clone(), interface))
        {
            return None;
        }
        let available = match (node.facet, interface) {
            (Facet::Object, InterfaceId::Satellite) => {
                return matches!(obj.body, Body::Satellite(_))
                    .then(|| node.with_facet(Facet::Satellite));
            }
            (Facet::Object, InterfaceId::Facility) => {
                return matches!(obj.body, Body::Facility(_))
                    .then(|| node.with_facet(Facet::Facility));
            }
            (Facet::Propagator, InterfaceId::J2Propagator) => obj
                .satellite(node.facet)
                .is_ok_and(|sat| sat.propagator == PropagatorKind::J2Perturbation.code()),
            (Facet::Propagator, InterfaceId::TwoBodyPropagator) => obj
                .satellite(node.facet)
                .is_ok_and(|sat| sat.propagator == PropagatorKind::TwoBody.code()),
            (Facet::Classical(id), InterfaceId::ClassicalState) => {
                obj.representation(node.facet, id).is_ok()
            }
            (Facet::SizeShape(id), InterfaceId::SizeShapeSemiMajorAxis) => obj
                .representation(node.facet, id)
                .is_ok_and(|rep| rep.size_shape_type == codes::SIZE_SHAPE_SEMI_MAJOR_AXIS),
            (Facet::AscNode(id), InterfaceId::AscNodeRaan) => obj
                .representation(node.facet, id)
                .is_ok_and(|rep| rep.asc_node_type == codes::ASC_NODE_RAAN),
            (Facet::Location(id), InterfaceId::LocationTrueAnomaly) => obj
                .representation(node.facet, id)
                .is_ok_and(|rep| rep.location_type == codes::LOCATION_TRUE_ANOMALY),
            (Facet::Constraint(id), InterfaceId::ConstraintMinMax) => {
                obj.constraint(id).is_ok_and(|slot| slot.min_max)
            }
            _ => false,
        };
        available.then_some(*node)
    }

    fn child(&self, node: &NodeRef, member: Member) -> Result<NodeRef, BackendError> {
        let state = self.state.read();
        let obj = state.object(node.object)?;
        let facet = match (node.facet, member, &obj.body) {
            (Facet::Satellite, Member::Propagator, Body::Satellite(_)) => Facet::Propagator,
            (Facet::Satellite, Member::AccessConstraints, Body::Satellite(_))
            | (Facet::Facility, Member::AccessConstraints, Body::Facility(_)) => {
                Facet::AccessConstraints
            }
            (Facet::Facility, Member::Position, Body::Facility(_)) => Facet::Position,
            (Facet::Classical(id), Member::SizeShape, _) => {
                obj.representation(node.facet, id)?;
                Facet::SizeShape(id)
            }
            (Facet::Classical(id), Member::Orientation, _) => {
                obj.representation(node.facet, id)?;
                Facet::Orientation(id)
            }
            (Facet::Classical(id), Member::Location, _) => {
                obj.representation(node.facet, id)?;
                Facet::Location(id)
            }
            (Facet::Orientation(id), Member::AscNode, _) => {
                obj.representation(node.facet, id)?;
                Facet::AscNode(id)
            }
            _ => return Err(not_supported(node.facet, member)),
        };
        Ok(node.with_facet(facet))
    }

    fn get(&self, node: &NodeRef, property: Property) -> Result<Value, BackendError> {
        let state = self.state.read();
        let obj = state.object(node.object)?;
        Self::check_property_fault(&state, &obj.name, property)?;
        Self::read_property(obj, node.facet, property)
    }

    fn set(&self, node: &NodeRef, property: Property, value: Value) -> Result<(), BackendError> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let obj = state
            .objects
            .get_mut(&node.object.0)
            .ok_or(BackendError::StaleHandle(node.object))?;
        if state
            .faults
            .properties
            .contains(&(obj.name.clone(), property))
        {
            return Err(injected(&obj.name, property));
        }
        Self::write_property(obj, node.facet, property, &value)?;
        state.writes.push((obj.name.clone(), property));
        Ok(())
    }

    fn invoke(&self, node: &NodeRef, method: Method) -> Result<Option<NodeRef>, BackendError> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let obj = state
            .objects
            .get_mut(&node.object.0)
            .ok_or(BackendError::StaleHandle(node.object))?;
        let facet = node.facet;

        match (facet, method) {
            (Facet::Satellite, Method::SetPropagatorType(code)) => {
                if state
                    .faults
                    .properties
                    .contains(&(obj.name.clone(), Property::PropagatorType))
                {
                    return Err(injected(&obj.name, Property::PropagatorType));
                }
                if PropagatorKind::from_code(code).is_none() {
                    return Err(reject(
                        Property::PropagatorType,
                        format!("unknown propagator {code}"),
                    ));
                }
                let sat = obj.satellite_mut(facet)?;
                sat.propagator = code;
                sat.representation = None;
                state.writes.push((obj.name.clone(), Property::PropagatorType));
                Ok(None)
            }
            (Facet::Propagator, Method::ConvertToClassical) => {
                let sat = obj.satellite_mut(facet)?;
                if !sat.manages_elements() {
                    return Err(not_supported(facet, method));
                }
                state.next_representation += 1;
                let id = state.next_representation;
                sat.representation = Some(Representation {
                    id,
                    elements: sat.elements,
                    coordinate_system: codes::COORDINATE_SYSTEM_J2000,
                    size_shape_type: codes::SIZE_SHAPE_ALTITUDE,
                    asc_node_type: codes::ASC_NODE_LAN,
                    location_type: codes::LOCATION_ARG_OF_LATITUDE,
                });
                Ok(Some(node.with_facet(Facet::Classical(id))))
            }
            (Facet::Propagator, Method::AssignInitialState(source)) => {
                let id = match source.facet {
                    Facet::Classical(id) if source.object == node.object => id,
                    _ => return Err(not_supported(facet, method)),
                };
                let elements = obj.representation(facet, id)?.elements;
                obj.satellite_mut(facet)?.elements = elements;
                debug!("[scene] Committed initial state of '{}'", obj.name);
                Ok(None)
            }
            (Facet::Propagator, Method::Propagate) => {
                let sat = obj.satellite_mut(facet)?;
                sat.propagations += 1;
                Ok(None)
            }
            (Facet::AccessConstraints, Method::ConstraintAt(index)) => obj
                .constraints
                .get(index)
                .map(|slot| Some(node.with_facet(Facet::Constraint(slot.id))))
                .ok_or_else(|| {
                    BackendError::CallFailed(format!("constraint index {index} out of range"))
                }),
            (Facet::AccessConstraints, Method::AddConstraint(code)) => {
                if state.faults.constraint_codes.contains(&code) {
                    return Err(injected(&obj.name, method));
                }
                let (name, min_max) = match self.catalog.get(&code) {
                    Some(entry) => (entry.name.clone(), entry.min_max),
                    None => {
                        return Err(BackendError::CallFailed(format!(
                            "constraint type {code} is not available"
                        )))
                    }
                };
                if obj.constraints.iter().any(|slot| slot.code == code) {
                    return Err(BackendError::CallFailed(format!(
                        "constraint {name} is already active on '{}'",
                        obj.name
                    )));
                }
                let id = obj.push_constraint(code, name, min_max);
                Ok(Some(node.with_facet(Facet::Constraint(id))))
            }
            (
                Facet::Position,
                Method::AssignGeodetic {
                    latitude,
                    longitude,
                    altitude,
                },
            ) => {
                for property in [Property::Latitude, Property::Longitude, Property::Altitude] {
                    if state
                        .faults
                        .properties
                        .contains(&(obj.name.clone(), property))
                    {
                        return Err(injected(&obj.name, property));
                    }
                }
                if !(-90.0..=90.0).contains(&latitude) {
                    return Err(reject(Property::Latitude, format!("out of range: {latitude}")));
                }
                if !longitude.is_finite() || !altitude.is_finite() {
                    return Err(reject(Property::Longitude, "must be finite"));
                }
                match &mut obj.body {
                    Body::Facility(position) => {
                        *position = GeodeticPosition {
                            latitude,
                            longitude: normalize_longitude(longitude),
                            altitude,
                        };
                    }
                    _ => return Err(not_supported(facet, method)),
                }
                for property in [Property::Latitude, Property::Longitude, Property::Altitude] {
                    state.writes.push((obj.name.clone(), property));
                }
                Ok(None)
            }
            _ => Err(not_supported(facet, method)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SceneBackendExt;

    fn scene() -> InMemoryScene {
        InMemoryScene::new([
            CatalogEntry::new(14, "ElevationAngle", true),
            CatalogEntry::new(34, "Range", true),
            CatalogEntry::new(25, "Lighting", false),
        ])
    }

    fn satellite(scene: &InMemoryScene, name: &str) -> NodeRef {
        let handle = scene.allocate_object(18, name).unwrap();
        scene
            .query_interface(&NodeRef::object(handle), InterfaceId::Satellite)
            .unwrap()
    }

    #[test]
    fn test_allocate_rejects_duplicate_names() {
        let scene = scene();
        scene.allocate_object(18, "Sat1").unwrap();
        assert!(matches!(
            scene.allocate_object(8, "Sat1"),
            Err(BackendError::DuplicateName(_))
        ));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_allocate_rejects_unknown_object_code() {
        let scene = scene();
        assert!(matches!(
            scene.allocate_object(99, "X"),
            Err(BackendError::AllocationFailed { .. })
        ));
    }

    #[test]
    fn test_resolve_by_class_and_name() {
        let scene = scene();
        let handle = scene.allocate_object(8, "Beijing").unwrap();
        assert_eq!(
            scene.resolve_object(&ObjectPath::new("Facility", "Beijing")).unwrap(),
            handle
        );
        assert!(scene
            .resolve_object(&ObjectPath::new("Satellite", "Beijing"))
            .is_err());
    }

    #[test]
    fn test_typed_views_follow_object_class() {
        let scene = scene();
        let handle = scene.allocate_object(8, "F").unwrap();
        let root = NodeRef::object(handle);
        assert!(scene.query_interface(&root, InterfaceId::Satellite).is_none());
        assert!(scene.query_interface(&root, InterfaceId::Facility).is_some());
    }

    #[test]
    fn test_semi_major_axis_view_requires_parameterization() {
        let scene = scene();
        let sat = satellite(&scene, "S");
        let prop = scene.child(&sat, Member::Propagator).unwrap();
        let classical = scene
            .invoke(&prop, Method::ConvertToClassical)
            .unwrap()
            .unwrap();
        let size_shape = scene.child(&classical, Member::SizeShape).unwrap();

        assert!(scene
            .query_interface(&size_shape, InterfaceId::SizeShapeSemiMajorAxis)
            .is_none());
        assert!(scene
            .set(&size_shape, Property::SemiMajorAxis, Value::Real(7000.0))
            .is_err());

        scene
            .set(&classical, Property::SizeShapeType, Value::Int(4))
            .unwrap();
        let view = scene
            .query_interface(&size_shape, InterfaceId::SizeShapeSemiMajorAxis)
            .unwrap();
        scene
            .set(&view, Property::SemiMajorAxis, Value::Real(7000.0))
            .unwrap();
        assert_eq!(scene.get_real(&view, Property::SemiMajorAxis).unwrap(), 7000.0);
    }

    #[test]
    fn test_scratch_edits_need_assign() {
        let scene = scene();
        let sat = satellite(&scene, "S");
        let prop = scene.child(&sat, Member::Propagator).unwrap();
        let classical = scene
            .invoke(&prop, Method::ConvertToClassical)
            .unwrap()
            .unwrap();
        let orientation = scene.child(&classical, Member::Orientation).unwrap();
        scene
            .set(&orientation, Property::Inclination, Value::Real(98.0))
            .unwrap();
        assert_eq!(scene.satellite("S").unwrap().elements.inclination, 28.5);

        scene
            .invoke(&prop, Method::AssignInitialState(classical))
            .unwrap();
        scene.invoke(&prop, Method::Propagate).unwrap();
        let snapshot = scene.satellite("S").unwrap();
        assert_eq!(snapshot.elements.inclination, 98.0);
        assert_eq!(snapshot.propagations, 1);
    }

    #[test]
    fn test_new_conversion_expires_old_representation() {
        let scene = scene();
        let sat = satellite(&scene, "S");
        let prop = scene.child(&sat, Member::Propagator).unwrap();
        let first = scene
            .invoke(&prop, Method::ConvertToClassical)
            .unwrap()
            .unwrap();
        scene.invoke(&prop, Method::ConvertToClassical).unwrap();
        assert!(scene.child(&first, Member::Orientation).is_err());
    }

    #[test]
    fn test_conversion_requires_managed_propagator() {
        let scene = scene();
        let sat = satellite(&scene, "S");
        scene.invoke(&sat, Method::SetPropagatorType(3)).unwrap();
        let prop = scene.child(&sat, Member::Propagator).unwrap();
        assert!(scene.invoke(&prop, Method::ConvertToClassical).is_err());
        assert!(scene.get(&prop, Property::Step).is_err());
        assert!(scene.invoke(&sat, Method::SetPropagatorType(42)).is_err());
    }

    #[test]
    fn test_line_of_sight_is_always_present() {
        let scene = scene();
        scene.allocate_object(8, "F").unwrap();
        let constraints = scene.constraints("F");
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].code, codes::LINE_OF_SIGHT);
        assert_eq!(constraints[0].name, "LineOfSight");
    }

    #[test]
    fn test_add_constraint_and_bounds() {
        let scene = scene();
        let handle = scene.allocate_object(8, "F").unwrap();
        let facility = scene
            .query_interface(&NodeRef::object(handle), InterfaceId::Facility)
            .unwrap();
        let ac = scene.child(&facility, Member::AccessConstraints).unwrap();
        let elev = scene
            .invoke(&ac, Method::AddConstraint(14))
            .unwrap()
            .unwrap();
        let minmax = scene
            .query_interface(&elev, InterfaceId::ConstraintMinMax)
            .unwrap();
        scene.set(&minmax, Property::EnableMin, Value::Bool(true)).unwrap();
        scene.set(&minmax, Property::Min, Value::Real(10.0)).unwrap();

        assert!(scene.invoke(&ac, Method::AddConstraint(14)).is_err());
        assert!(scene.invoke(&ac, Method::AddConstraint(999)).is_err());
        assert_eq!(scene.get_int(&ac, Property::Count).unwrap(), 2);

        let lighting = scene.invoke(&ac, Method::AddConstraint(25)).unwrap().unwrap();
        assert!(scene
            .query_interface(&lighting, InterfaceId::ConstraintMinMax)
            .is_none());

        let elev_snapshot = &scene.constraints("F")[1];
        assert!(elev_snapshot.enable_min);
        assert_eq!(elev_snapshot.min, 10.0);
    }

    #[test]
    fn test_assign_geodetic_normalizes_longitude() {
        let scene = scene();
        let handle = scene.allocate_object(8, "F").unwrap();
        let facility = NodeRef::object(handle).with_facet(Facet::Facility);
        let position = scene.child(&facility, Member::Position).unwrap();
        scene
            .invoke(
                &position,
                Method::AssignGeodetic {
                    latitude: 10.0,
                    longitude: 270.0,
                    altitude: -0.1,
                },
            )
            .unwrap();
        let stored = scene.facility_position("F").unwrap();
        assert_eq!(stored.longitude, -90.0);
        assert_eq!(stored.altitude, -0.1);

        assert!(scene
            .invoke(
                &position,
                Method::AssignGeodetic {
                    latitude: 95.0,
                    longitude: 0.0,
                    altitude: 0.0,
                },
            )
            .is_err());
    }

    #[test]
    fn test_injected_faults() {
        let scene = scene();
        scene.inject_allocation_fault("Bad");
        assert!(scene.allocate_object(18, "Bad").is_err());

        let sat = satellite(&scene, "S");
        let prop = scene.child(&sat, Member::Propagator).unwrap();
        scene.inject_property_fault("S", Property::Step);
        assert!(scene.get(&prop, Property::Step).is_err());

        scene.inject_interface_fault("S", InterfaceId::TwoBodyPropagator);
        assert!(scene
            .query_interface(&prop, InterfaceId::TwoBodyPropagator)
            .is_none());

        scene.clear_faults();
        assert!(scene.get(&prop, Property::Step).is_ok());
    }

    #[test]
    fn test_writes_are_recorded_per_object() {
        let scene = scene();
        let sat = satellite(&scene, "S");
        let prop = scene.child(&sat, Member::Propagator).unwrap();
        scene.set(&prop, Property::Step, Value::Real(30.0)).unwrap();
        assert_eq!(scene.writes("S"), vec![Property::Step]);
        scene.clear_writes();
        assert!(scene.writes("S").is_empty());
    }

    #[test]
    fn test_release_makes_handle_stale() {
        let scene = scene();
        let handle = scene.allocate_object(18, "S").unwrap();
        scene.release_object(handle).unwrap();
        assert!(matches!(
            scene.release_object(handle),
            Err(BackendError::StaleHandle(_))
        ));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_foreign_objects_are_enumerated() {
        let scene = scene();
        scene.allocate_object(18, "S").unwrap();
        let handle = scene.insert_foreign("Sensor", "Radar").unwrap();
        assert_eq!(scene.enumerate_children().unwrap().len(), 2);
        assert_eq!(scene.class_name(handle).unwrap(), "Sensor");
        assert!(scene.constraints("Radar").is_empty());
    }
}
