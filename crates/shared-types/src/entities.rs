//! # Declarative Record Model
//!
//! Defines the serializable form of a scene component as consumed by the
//! factory, patched by the modifier and produced by the exporter.
//!
//! ## Clusters
//!
//! - **Kinds**: `ComponentKind`, `PropagatorKind`
//! - **Type-specific fields**: `OrbitSpec`, `PositionSpec`, `ConstraintSpec`
//! - **Documents**: `ComponentRecord`, `ComponentDocument`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RecordError;

/// Default semi-major axis applied at creation when the record omits it (km).
pub const DEFAULT_SEMI_MAJOR_AXIS_KM: f64 = 7000.0;

/// Default propagation step applied at creation when the record omits it (s).
pub const DEFAULT_STEP_SECONDS: f64 = 60.0;

// =============================================================================
// CLUSTER A: KINDS
// =============================================================================

/// Closed set of component kinds the engine manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Orbiting body.
    Satellite,
    /// Ground facility.
    Facility,
}

impl ComponentKind {
    /// Every managed kind, in export order.
    pub const ALL: [ComponentKind; 2] = [ComponentKind::Satellite, ComponentKind::Facility];

    /// Backend class name, also the canonical `type` tag.
    pub fn class_name(self) -> &'static str {
        match self {
            ComponentKind::Satellite => "Satellite",
            ComponentKind::Facility => "Facility",
        }
    }

    /// Backend object-type code used when allocating a new object.
    pub fn object_code(self) -> i32 {
        match self {
            ComponentKind::Satellite => 18,
            ComponentKind::Facility => 8,
        }
    }

    /// Resolve a backend class name. Case-sensitive.
    pub fn from_class_name(class_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name() == class_name)
    }

    /// Directory name used for exported files of this kind.
    pub fn directory_name(self) -> String {
        self.class_name().to_ascii_lowercase()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Orbit propagator kinds with their backend codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropagatorKind {
    /// High precision orbit propagator.
    Hpop,
    /// Secular J2 perturbation.
    J2Perturbation,
    /// Secular J4 perturbation.
    J4Perturbation,
    /// SGP4 from two-line elements.
    Sgp4,
    /// Ephemeris table.
    Spk,
    /// Unperturbed Keplerian motion.
    TwoBody,
}

impl PropagatorKind {
    /// Every propagator kind, ordered by backend code.
    pub const ALL: [PropagatorKind; 6] = [
        PropagatorKind::Hpop,
        PropagatorKind::J2Perturbation,
        PropagatorKind::J4Perturbation,
        PropagatorKind::Sgp4,
        PropagatorKind::Spk,
        PropagatorKind::TwoBody,
    ];

    /// Backend enumeration value.
    pub fn code(self) -> i32 {
        match self {
            PropagatorKind::Hpop => 0,
            PropagatorKind::J2Perturbation => 1,
            PropagatorKind::J4Perturbation => 2,
            PropagatorKind::Sgp4 => 3,
            PropagatorKind::Spk => 4,
            PropagatorKind::TwoBody => 5,
        }
    }

    /// Bare tag used in declarative records.
    pub fn tag(self) -> &'static str {
        match self {
            PropagatorKind::Hpop => "HPOP",
            PropagatorKind::J2Perturbation => "J2Perturbation",
            PropagatorKind::J4Perturbation => "J4Perturbation",
            PropagatorKind::Sgp4 => "SGP4",
            PropagatorKind::Spk => "SPK",
            PropagatorKind::TwoBody => "TwoBody",
        }
    }

    /// Human-readable label reported by `describe()`.
    pub fn label(self) -> &'static str {
        match self {
            PropagatorKind::Hpop => "HPOP (High Precision)",
            other => other.tag(),
        }
    }

    /// Look up a kind by backend code.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Look up a kind by bare tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Whether the engine configures orbital elements for this kind.
    ///
    /// Other kinds are accepted as a tag but their elements are left alone.
    pub fn manages_elements(self) -> bool {
        matches!(self, PropagatorKind::J2Perturbation | PropagatorKind::TwoBody)
    }
}

impl Default for PropagatorKind {
    fn default() -> Self {
        PropagatorKind::J2Perturbation
    }
}

impl fmt::Display for PropagatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// CLUSTER B: SCALARS
// =============================================================================

/// A JSON number that keeps integral values integral.
///
/// Exported altitudes use this so `0` stays `0` rather than `0.0`, keeping
/// documents stable under diff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integral value.
    Integer(i64),
    /// Any other finite value.
    Real(f64),
}

impl Scalar {
    /// Coerce to `Integer` when `value` is numerically integral.
    pub fn compact(value: f64) -> Self {
        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value <= i64::MAX as f64
        {
            Scalar::Integer(value as i64)
        } else {
            Scalar::Real(value)
        }
    }

    /// Numeric value as `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Integer(v) => v as f64,
            Scalar::Real(v) => v,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Real(value)
    }
}

// =============================================================================
// CLUSTER C: TYPE-SPECIFIC FIELDS
// =============================================================================

/// Classical orbital elements. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrbitSpec {
    /// Semi-major axis (km, > 0).
    #[serde(default, alias = "semiMajorAxis", skip_serializing_if = "Option::is_none")]
    pub semi_major_axis: Option<f64>,
    /// Eccentricity, in [0, 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eccentricity: Option<f64>,
    /// Inclination (deg).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclination: Option<f64>,
    /// Right ascension of the ascending node (deg).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raan: Option<f64>,
    /// Argument of perigee (deg).
    #[serde(default, alias = "argOfPerigee", skip_serializing_if = "Option::is_none")]
    pub arg_of_perigee: Option<f64>,
    /// True anomaly (deg).
    #[serde(default, alias = "trueAnomaly", skip_serializing_if = "Option::is_none")]
    pub true_anomaly: Option<f64>,
}

impl OrbitSpec {
    /// Fill every absent element with its creation default.
    pub fn with_creation_defaults(&self) -> Self {
        Self {
            semi_major_axis: Some(self.semi_major_axis.unwrap_or(DEFAULT_SEMI_MAJOR_AXIS_KM)),
            eccentricity: Some(self.eccentricity.unwrap_or(0.0)),
            inclination: Some(self.inclination.unwrap_or(0.0)),
            raan: Some(self.raan.unwrap_or(0.0)),
            arg_of_perigee: Some(self.arg_of_perigee.unwrap_or(0.0)),
            true_anomaly: Some(self.true_anomaly.unwrap_or(0.0)),
        }
    }

    /// True when no element is present.
    pub fn is_empty(&self) -> bool {
        self.semi_major_axis.is_none()
            && self.eccentricity.is_none()
            && self.inclination.is_none()
            && self.raan.is_none()
            && self.arg_of_perigee.is_none()
            && self.true_anomaly.is_none()
    }

    /// Check structural validity of the present elements.
    pub fn validate(&self) -> Result<(), RecordError> {
        if let Some(sma) = self.semi_major_axis {
            if !sma.is_finite() || sma <= 0.0 {
                return Err(RecordError::invalid(
                    "orbit.semi_major_axis",
                    format!("must be a positive distance, got {sma}"),
                ));
            }
        }
        if let Some(ecc) = self.eccentricity {
            if !(0.0..1.0).contains(&ecc) {
                return Err(RecordError::invalid(
                    "orbit.eccentricity",
                    format!("must be in [0, 1), got {ecc}"),
                ));
            }
        }
        let angles = [
            ("orbit.inclination", self.inclination),
            ("orbit.raan", self.raan),
            ("orbit.arg_of_perigee", self.arg_of_perigee),
            ("orbit.true_anomaly", self.true_anomaly),
        ];
        for (field, value) in angles {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(RecordError::invalid(field, "must be finite"));
                }
            }
        }
        Ok(())
    }
}

/// Validate a propagation step.
pub fn validate_step(step: f64) -> Result<(), RecordError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(RecordError::invalid(
            "step",
            format!("must be a positive duration, got {step}"),
        ));
    }
    Ok(())
}

/// Geodetic position of a facility. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionSpec {
    /// Latitude (deg, [-90, 90]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude (deg, [-180, 360)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Altitude above the ellipsoid (km, may be negative).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<Scalar>,
}

impl PositionSpec {
    /// Build a fully populated spec.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            altitude: Some(Scalar::Real(altitude)),
        }
    }

    /// Resolve against a base position, present fields winning.
    pub fn merged_over(&self, base: GeodeticPosition) -> GeodeticPosition {
        GeodeticPosition {
            latitude: self.latitude.unwrap_or(base.latitude),
            longitude: self.longitude.unwrap_or(base.longitude),
            altitude: self.altitude.map(Scalar::as_f64).unwrap_or(base.altitude),
        }
    }

    /// Check structural validity of the present fields.
    pub fn validate(&self) -> Result<(), RecordError> {
        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(RecordError::invalid(
                    "position.latitude",
                    format!("must be in [-90, 90], got {lat}"),
                ));
            }
        }
        if let Some(lon) = self.longitude {
            if !(-180.0..360.0).contains(&lon) {
                return Err(RecordError::invalid(
                    "position.longitude",
                    format!("must be in [-180, 360), got {lon}"),
                ));
            }
        }
        if let Some(alt) = self.altitude {
            if !alt.as_f64().is_finite() {
                return Err(RecordError::invalid("position.altitude", "must be finite"));
            }
        }
        Ok(())
    }
}

/// A fully resolved geodetic position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    /// Latitude (deg).
    pub latitude: f64,
    /// Longitude (deg).
    pub longitude: f64,
    /// Altitude (km).
    pub altitude: f64,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One requested access constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// Constraint name, e.g. `ElevationAngle`.
    pub name: String,
    /// Lower bound; enables the minimum when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound; enables the maximum when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Turn the minimum off. Ignored when `min` is present.
    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_min: bool,
    /// Turn the maximum off. Ignored when `max` is present.
    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_max: bool,
}

impl ConstraintSpec {
    /// A constraint with no bounds.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min: None,
            max: None,
            disable_min: false,
            disable_max: false,
        }
    }

    /// Set the lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// True when the spec sets or clears at least one bound.
    pub fn touches_bounds(&self) -> bool {
        self.min.is_some() || self.max.is_some() || self.disable_min || self.disable_max
    }

    /// True when the spec only clears bounds.
    pub fn only_disables(&self) -> bool {
        self.min.is_none() && self.max.is_none() && (self.disable_min || self.disable_max)
    }
}

// =============================================================================
// CLUSTER D: DOCUMENTS
// =============================================================================

/// Declarative form of one component.
///
/// `type` and `name` are optional at the serde level so a malformed record
/// still parses and can be reported as a `MissingField` by the factory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Type tag, resolved through the factory's type registry.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Unique component name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Propagator tag (satellites).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagator: Option<String>,
    /// Classical elements (satellites).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitSpec>,
    /// Propagation step in seconds (satellites).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Geodetic position (facilities).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionSpec>,
    /// Access constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ConstraintSpec>,
}

impl ComponentRecord {
    /// Empty record of the given type and name.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Empty satellite record.
    pub fn satellite(name: impl Into<String>) -> Self {
        Self::new(ComponentKind::Satellite.class_name(), name)
    }

    /// Empty facility record.
    pub fn facility(name: impl Into<String>) -> Self {
        Self::new(ComponentKind::Facility.class_name(), name)
    }

    /// Set the propagator tag.
    pub fn with_propagator(mut self, kind: PropagatorKind) -> Self {
        self.propagator = Some(kind.tag().to_string());
        self
    }

    /// Set the orbit.
    pub fn with_orbit(mut self, orbit: OrbitSpec) -> Self {
        self.orbit = Some(orbit);
        self
    }

    /// Set the propagation step.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Set the position.
    pub fn with_position(mut self, position: PositionSpec) -> Self {
        self.position = Some(position);
        self
    }

    /// Append a constraint.
    pub fn with_constraint(mut self, constraint: ConstraintSpec) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// The type tag, or `MissingField("type")`.
    pub fn require_kind(&self) -> Result<&str, RecordError> {
        match self.kind.as_deref() {
            Some(tag) if !tag.is_empty() => Ok(tag),
            _ => Err(RecordError::MissingField { field: "type" }),
        }
    }

    /// The name, or `MissingField("name")`.
    pub fn require_name(&self) -> Result<&str, RecordError> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(RecordError::MissingField { field: "name" }),
        }
    }

    /// Resolve the propagator tag; absent means the default kind.
    pub fn propagator_kind(&self) -> Result<PropagatorKind, RecordError> {
        match self.propagator.as_deref() {
            None => Ok(PropagatorKind::default()),
            Some(tag) => PropagatorKind::from_tag(tag)
                .ok_or_else(|| RecordError::UnknownPropagator(tag.to_string())),
        }
    }
}

/// A batch of records, the on-disk document format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentDocument {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Records in creation order.
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

impl ComponentDocument {
    /// Wrap a single record, the unit written per component by the exporter.
    pub fn single(record: ComponentRecord) -> Self {
        Self {
            description: None,
            components: vec![record],
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_class_names_round_trip() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_class_name(kind.class_name()), Some(kind));
        }
        assert_eq!(ComponentKind::from_class_name("satellite"), None);
        assert_eq!(ComponentKind::Facility.directory_name(), "facility");
    }

    #[test]
    fn test_propagator_codes_and_labels() {
        assert_eq!(PropagatorKind::from_code(5), Some(PropagatorKind::TwoBody));
        assert_eq!(PropagatorKind::from_code(9), None);
        assert_eq!(PropagatorKind::Hpop.label(), "HPOP (High Precision)");
        assert_eq!(PropagatorKind::Hpop.tag(), "HPOP");
        assert!(PropagatorKind::J2Perturbation.manages_elements());
        assert!(!PropagatorKind::Sgp4.manages_elements());
    }

    #[test]
    fn test_scalar_compacts_integral_values() {
        assert_eq!(Scalar::compact(3.0), Scalar::Integer(3));
        assert_eq!(Scalar::compact(-2.0), Scalar::Integer(-2));
        assert_eq!(Scalar::compact(0.05), Scalar::Real(0.05));
        assert_eq!(serde_json::to_string(&Scalar::compact(0.0)).unwrap(), "0");
    }

    #[test]
    fn test_orbit_validation() {
        let bad_sma = OrbitSpec {
            semi_major_axis: Some(-7000.0),
            ..OrbitSpec::default()
        };
        assert!(bad_sma.validate().is_err());

        let bad_ecc = OrbitSpec {
            eccentricity: Some(1.0),
            ..OrbitSpec::default()
        };
        assert!(bad_ecc.validate().is_err());

        assert!(OrbitSpec::default().validate().is_ok());
    }

    #[test]
    fn test_orbit_creation_defaults_keep_present_fields() {
        let spec = OrbitSpec {
            inclination: Some(98.0),
            ..OrbitSpec::default()
        };
        let full = spec.with_creation_defaults();
        assert_eq!(full.semi_major_axis, Some(DEFAULT_SEMI_MAJOR_AXIS_KM));
        assert_eq!(full.inclination, Some(98.0));
        assert_eq!(full.true_anomaly, Some(0.0));
    }

    #[test]
    fn test_orbit_accepts_camel_case_aliases() {
        let spec: OrbitSpec = serde_json::from_str(r#"{"semiMajorAxis": 7100.0}"#).unwrap();
        assert_eq!(spec.semi_major_axis, Some(7100.0));
        assert!(serde_json::from_str::<OrbitSpec>(r#"{"period": 5400.0}"#).is_err());
    }

    #[test]
    fn test_position_merge_and_validation() {
        let base = GeodeticPosition {
            latitude: 1.0,
            longitude: 2.0,
            altitude: 3.0,
        };
        let patch = PositionSpec {
            longitude: Some(20.0),
            ..PositionSpec::default()
        };
        let merged = patch.merged_over(base);
        assert_eq!(merged.latitude, 1.0);
        assert_eq!(merged.longitude, 20.0);
        assert_eq!(merged.altitude, 3.0);

        assert!(PositionSpec::new(91.0, 0.0, 0.0).validate().is_err());
        assert!(PositionSpec::new(0.0, 360.0, 0.0).validate().is_err());
        assert!(PositionSpec::new(0.0, 359.0, -0.4).validate().is_ok());
    }

    #[test]
    fn test_record_requires_name_and_type() {
        let record = ComponentRecord {
            kind: Some("Facility".into()),
            ..ComponentRecord::default()
        };
        assert!(matches!(
            record.require_name(),
            Err(RecordError::MissingField { field: "name" })
        ));
        assert!(ComponentRecord::default().require_kind().is_err());
    }

    #[test]
    fn test_record_parses_documented_facility_shape() {
        let json = r#"{
            "type": "Facility",
            "name": "Beijing",
            "position": {"latitude": 40.0, "longitude": 116.0, "altitude": 0.05},
            "constraints": [{"name": "ElevationAngle", "min": 10.0}]
        }"#;
        let record: ComponentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.require_name().unwrap(), "Beijing");
        assert_eq!(record.constraints, vec![ConstraintSpec::named("ElevationAngle").with_min(10.0)]);
        let position = record.position.unwrap();
        assert_eq!(position.altitude, Some(Scalar::Real(0.05)));
    }

    #[test]
    fn test_constraint_spec_skips_false_disable_flags() {
        let json = serde_json::to_string(&ConstraintSpec::named("Range").with_max(5000.0)).unwrap();
        assert_eq!(json, r#"{"name":"Range","max":5000.0}"#);
    }

    #[test]
    fn test_unknown_propagator_tag_is_rejected() {
        let record = ComponentRecord {
            propagator: Some("Kepler".into()),
            ..ComponentRecord::satellite("S")
        };
        assert!(matches!(
            record.propagator_kind(),
            Err(RecordError::UnknownPropagator(tag)) if tag == "Kepler"
        ));
        assert_eq!(
            ComponentRecord::satellite("S").propagator_kind().unwrap(),
            PropagatorKind::J2Perturbation
        );
    }
}
