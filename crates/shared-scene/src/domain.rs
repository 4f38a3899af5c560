//! # Object-Model Vocabulary
//!
//! Addresses, capabilities, properties and methods understood by a
//! [`SceneBackend`](crate::SceneBackend).
//!
//! A live object exposes several facets (its configuration interface, its
//! propagator, a converted orbit representation, its constraint collection).
//! A [`NodeRef`] names one facet of one object; typed views are obtained with
//! `query_interface` and children with `child`.

use std::fmt;

/// Opaque handle of a live backend object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u64);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Path used to resolve an existing object: `*/<Class>/<Name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath {
    /// Backend class name, e.g. `Satellite`.
    pub class_name: String,
    /// Instance name.
    pub name: String,
}

impl ObjectPath {
    /// Build a path from its parts.
    pub fn new(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*/{}/{}", self.class_name, self.name)
    }
}

/// One facet of a live object.
///
/// Representation facets carry the id of the converted representation they
/// belong to; a newer conversion invalidates older ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    /// The generic object.
    Object,
    /// Satellite configuration interface.
    Satellite,
    /// Facility configuration interface.
    Facility,
    /// Orbit propagator of a satellite.
    Propagator,
    /// Classical-element representation of the initial state.
    Classical(u64),
    /// Size/shape parameterization of a representation.
    SizeShape(u64),
    /// Orientation of a representation.
    Orientation(u64),
    /// Ascending-node parameterization of an orientation.
    AscNode(u64),
    /// In-orbit location parameterization of a representation.
    Location(u64),
    /// Access-constraint collection.
    AccessConstraints,
    /// One access constraint, by collection-local id.
    Constraint(u64),
    /// Geodetic position of a facility.
    Position,
}

/// Address of a facet on a live object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    /// Owning object.
    pub object: ObjectHandle,
    /// Facet within the object.
    pub facet: Facet,
}

impl NodeRef {
    /// Root facet of an object.
    pub fn object(handle: ObjectHandle) -> Self {
        Self {
            object: handle,
            facet: Facet::Object,
        }
    }

    /// Another facet of the same object.
    pub fn with_facet(self, facet: Facet) -> Self {
        Self {
            object: self.object,
            facet,
        }
    }
}

/// Typed capabilities a facet may or may not offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceId {
    /// Satellite configuration, on an object root.
    Satellite,
    /// Facility configuration, on an object root.
    Facility,
    /// J2 perturbation propagator.
    J2Propagator,
    /// Two-body propagator.
    TwoBodyPropagator,
    /// Classical orbit state.
    ClassicalState,
    /// Semi-major axis size/shape parameterization.
    SizeShapeSemiMajorAxis,
    /// RAAN ascending-node parameterization.
    AscNodeRaan,
    /// True-anomaly location parameterization.
    LocationTrueAnomaly,
    /// Min/max access constraint.
    ConstraintMinMax,
}

/// Named children reachable from a facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    /// Satellite -> propagator.
    Propagator,
    /// Satellite or facility -> constraint collection.
    AccessConstraints,
    /// Facility -> position.
    Position,
    /// Classical -> size/shape.
    SizeShape,
    /// Classical -> orientation.
    Orientation,
    /// Orientation -> ascending node.
    AscNode,
    /// Classical -> location.
    Location,
}

/// Typed properties readable or writable on a facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Satellite propagator enumeration value.
    PropagatorType,
    /// Propagation step (s).
    Step,
    /// Representation coordinate system.
    CoordinateSystem,
    /// Size/shape parameterization selector.
    SizeShapeType,
    /// Semi-major axis (km).
    SemiMajorAxis,
    /// Eccentricity.
    Eccentricity,
    /// Inclination (deg).
    Inclination,
    /// Argument of perigee (deg).
    ArgOfPerigee,
    /// Ascending-node parameterization selector.
    AscNodeType,
    /// RAAN (deg).
    Raan,
    /// In-orbit location parameterization selector.
    LocationType,
    /// True anomaly (deg).
    TrueAnomaly,
    /// Geodetic latitude (deg).
    Latitude,
    /// Geodetic longitude (deg).
    Longitude,
    /// Altitude (km).
    Altitude,
    /// Number of constraints in a collection.
    Count,
    /// Constraint name.
    ConstraintName,
    /// Constraint type code.
    ConstraintType,
    /// Minimum enabled flag.
    EnableMin,
    /// Minimum value.
    Min,
    /// Maximum enabled flag.
    EnableMax,
    /// Maximum value.
    Max,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Operations invoked on a facet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Satellite: switch the propagator kind.
    SetPropagatorType(i32),
    /// Propagator: convert the initial state to classical elements.
    ConvertToClassical,
    /// Propagator: commit a converted representation as the initial state.
    AssignInitialState(NodeRef),
    /// Propagator: recompute the ephemeris.
    Propagate,
    /// Constraint collection: item at index.
    ConstraintAt(usize),
    /// Constraint collection: add a constraint by type code.
    AddConstraint(i32),
    /// Position: assign geodetic coordinates.
    AssignGeodetic {
        /// Latitude (deg).
        latitude: f64,
        /// Longitude (deg).
        longitude: f64,
        /// Altitude (km).
        altitude: f64,
    },
}

/// Dynamically typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Enumeration or count.
    Int(i32),
    /// Floating point quantity.
    Real(f64),
    /// Flag.
    Bool(bool),
    /// Text.
    Text(String),
}

impl Value {
    /// Integer payload.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Real payload; integers widen.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            Value::Int(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    /// Boolean payload.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Backend enumeration values for orbit-state parameterizations.
pub mod codes {
    /// J2000 coordinate system.
    pub const COORDINATE_SYSTEM_J2000: i32 = 0;
    /// Size/shape given by altitude pair.
    pub const SIZE_SHAPE_ALTITUDE: i32 = 0;
    /// Size/shape given by semi-major axis and eccentricity.
    pub const SIZE_SHAPE_SEMI_MAJOR_AXIS: i32 = 4;
    /// Ascending node given by longitude.
    pub const ASC_NODE_LAN: i32 = 0;
    /// Ascending node given by RAAN.
    pub const ASC_NODE_RAAN: i32 = 1;
    /// Location given by argument of latitude.
    pub const LOCATION_ARG_OF_LATITUDE: i32 = 0;
    /// Location given by true anomaly.
    pub const LOCATION_TRUE_ANOMALY: i32 = 5;
    /// The always-present line-of-sight constraint.
    pub const LINE_OF_SIGHT: i32 = 26;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_display() {
        let path = ObjectPath::new("Satellite", "Sat1");
        assert_eq!(path.to_string(), "*/Satellite/Sat1");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int(4).as_real(), Some(4.0));
        assert_eq!(Value::Real(4.5).as_int(), None);
        assert_eq!(Value::Text("Range".into()).as_text(), Some("Range"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
    }

    #[test]
    fn test_node_ref_facets_share_object() {
        let root = NodeRef::object(ObjectHandle(7));
        let prop = root.with_facet(Facet::Propagator);
        assert_eq!(prop.object, ObjectHandle(7));
        assert_eq!(prop.facet, Facet::Propagator);
    }
}
