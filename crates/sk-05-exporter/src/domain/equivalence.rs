//! # Round-Trip Equivalence
//!
//! Compares the record a component was created from with the record
//! exported from it. Reals match within a 1e-9 relative tolerance and
//! longitudes modulo 360 degrees.
//!
//! Fields absent from the expected record are compared against their
//! creation defaults where one exists and skipped otherwise.

use serde::Serialize;
use shared_types::{
    longitude_equivalent, relative_eq, ComponentKind, ComponentRecord, ConstraintSpec,
    PropagatorKind, Scalar, DEFAULT_STEP_SECONDS,
};
use std::collections::{BTreeMap, BTreeSet};

/// One field that did not survive the round-trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDrift {
    /// Dotted field path.
    pub field: String,
    /// Value in the source record.
    pub expected: String,
    /// Value in the exported record.
    pub actual: String,
}

impl FieldDrift {
    fn new(field: impl Into<String>, expected: impl std::fmt::Debug, actual: impl std::fmt::Debug) -> Self {
        Self {
            field: field.into(),
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}

/// Every drifting field between a source record and its export.
pub fn drift(kind: ComponentKind, expected: &ComponentRecord, actual: &ComponentRecord) -> Vec<FieldDrift> {
    let mut drifts = Vec::new();
    if expected.name != actual.name {
        drifts.push(FieldDrift::new("name", &expected.name, &actual.name));
    }
    match kind {
        ComponentKind::Satellite => satellite_drift(expected, actual, &mut drifts),
        ComponentKind::Facility => facility_drift(expected, actual, &mut drifts),
    }
    constraint_drift(&expected.constraints, &actual.constraints, &mut drifts);
    drifts
}

/// True when nothing drifted.
pub fn equivalent(kind: ComponentKind, expected: &ComponentRecord, actual: &ComponentRecord) -> bool {
    drift(kind, expected, actual).is_empty()
}

fn real_matches(expected: Option<f64>, actual: Option<f64>) -> bool {
    match (expected, actual) {
        (Some(a), Some(b)) => relative_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn satellite_drift(expected: &ComponentRecord, actual: &ComponentRecord, drifts: &mut Vec<FieldDrift>) {
    let propagator = match expected.propagator.as_deref() {
        None => Some(PropagatorKind::default()),
        Some(tag) => PropagatorKind::from_tag(tag),
    };
    let expected_tag = propagator.map(PropagatorKind::tag);
    if expected_tag != actual.propagator.as_deref() {
        drifts.push(FieldDrift::new("propagator", expected_tag, &actual.propagator));
    }
    if !propagator.is_some_and(PropagatorKind::manages_elements) {
        return;
    }

    let step = expected.step.unwrap_or(DEFAULT_STEP_SECONDS);
    if !real_matches(Some(step), actual.step) {
        drifts.push(FieldDrift::new("step", step, actual.step));
    }

    let wanted = expected.orbit.clone().unwrap_or_default().with_creation_defaults();
    let Some(got) = &actual.orbit else {
        drifts.push(FieldDrift::new("orbit", &wanted, "<missing>"));
        return;
    };
    let pairs = [
        ("orbit.semi_major_axis", wanted.semi_major_axis, got.semi_major_axis),
        ("orbit.eccentricity", wanted.eccentricity, got.eccentricity),
        ("orbit.inclination", wanted.inclination, got.inclination),
        ("orbit.raan", wanted.raan, got.raan),
        ("orbit.arg_of_perigee", wanted.arg_of_perigee, got.arg_of_perigee),
        ("orbit.true_anomaly", wanted.true_anomaly, got.true_anomaly),
    ];
    for (field, want, have) in pairs {
        if !real_matches(want, have) {
            drifts.push(FieldDrift::new(field, want, have));
        }
    }
}

fn facility_drift(expected: &ComponentRecord, actual: &ComponentRecord, drifts: &mut Vec<FieldDrift>) {
    let Some(wanted) = &expected.position else {
        return;
    };
    let Some(got) = &actual.position else {
        drifts.push(FieldDrift::new("position", wanted, "<missing>"));
        return;
    };
    if let Some(lat) = wanted.latitude {
        if !real_matches(Some(lat), got.latitude) {
            drifts.push(FieldDrift::new("position.latitude", lat, got.latitude));
        }
    }
    if let Some(lon) = wanted.longitude {
        if !got.longitude.is_some_and(|have| longitude_equivalent(lon, have)) {
            drifts.push(FieldDrift::new("position.longitude", lon, got.longitude));
        }
    }
    if let Some(alt) = wanted.altitude.map(Scalar::as_f64) {
        let have = got.altitude.map(Scalar::as_f64);
        if !real_matches(Some(alt), have) {
            drifts.push(FieldDrift::new("position.altitude", alt, have));
        }
    }
}

/// Enabled bounds per constraint name after applying specs in order.
fn effective_bounds(specs: &[ConstraintSpec]) -> BTreeMap<&str, (Option<f64>, Option<f64>)> {
    let mut bounds: BTreeMap<&str, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for spec in specs {
        let entry = bounds.entry(spec.name.as_str()).or_default();
        if spec.min.is_some() {
            entry.0 = spec.min;
        } else if spec.disable_min {
            entry.0 = None;
        }
        if spec.max.is_some() {
            entry.1 = spec.max;
        } else if spec.disable_max {
            entry.1 = None;
        }
    }
    bounds.retain(|_, (min, max)| min.is_some() || max.is_some());
    bounds
}

fn constraint_drift(expected: &[ConstraintSpec], actual: &[ConstraintSpec], drifts: &mut Vec<FieldDrift>) {
    let wanted = effective_bounds(expected);
    let got = effective_bounds(actual);
    let names: BTreeSet<&str> = wanted.keys().chain(got.keys()).copied().collect();
    for name in names {
        let want = wanted.get(name).copied().unwrap_or_default();
        let have = got.get(name).copied().unwrap_or_default();
        if !real_matches(want.0, have.0) || !real_matches(want.1, have.1) {
            drifts.push(FieldDrift::new(format!("constraints.{name}"), want, have));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{OrbitSpec, PositionSpec};

    #[test]
    fn test_creation_defaults_match_full_export() {
        let source = ComponentRecord::satellite("S");
        let exported = ComponentRecord {
            propagator: Some("J2Perturbation".into()),
            step: Some(60.0),
            orbit: Some(OrbitSpec::default().with_creation_defaults()),
            ..ComponentRecord::satellite("S")
        };
        assert!(equivalent(ComponentKind::Satellite, &source, &exported));
    }

    #[test]
    fn test_orbit_tolerance() {
        let orbit = OrbitSpec {
            semi_major_axis: Some(7000.0),
            ..OrbitSpec::default()
        };
        let source = ComponentRecord::satellite("S").with_orbit(orbit.clone());
        let mut exported = ComponentRecord {
            propagator: Some("J2Perturbation".into()),
            step: Some(60.0),
            orbit: Some(orbit.with_creation_defaults()),
            ..ComponentRecord::satellite("S")
        };
        exported.orbit.as_mut().unwrap().semi_major_axis = Some(7000.0 * (1.0 + 1e-12));
        assert!(equivalent(ComponentKind::Satellite, &source, &exported));

        exported.orbit.as_mut().unwrap().semi_major_axis = Some(7000.1);
        let drifts = drift(ComponentKind::Satellite, &source, &exported);
        assert_eq!(drifts.len(), 1);
        assert_eq!(drifts[0].field, "orbit.semi_major_axis");
    }

    #[test]
    fn test_unmanaged_propagator_ignores_orbit() {
        let source = ComponentRecord::satellite("S").with_propagator(PropagatorKind::Sgp4);
        let exported = ComponentRecord {
            propagator: Some("SGP4".into()),
            ..ComponentRecord::satellite("S")
        };
        assert!(equivalent(ComponentKind::Satellite, &source, &exported));
    }

    #[test]
    fn test_longitude_modulo_360() {
        let source = ComponentRecord::facility("F").with_position(PositionSpec::new(10.0, 270.0, 0.0));
        let exported = ComponentRecord::facility("F").with_position(PositionSpec {
            latitude: Some(10.0),
            longitude: Some(-90.0),
            altitude: Some(Scalar::Integer(0)),
        });
        assert!(equivalent(ComponentKind::Facility, &source, &exported));
    }

    #[test]
    fn test_constraints_modulo_unbounded_entries() {
        let source = ComponentRecord::facility("F")
            .with_constraint(ConstraintSpec::named("ElevationAngle").with_min(10.0))
            .with_constraint(ConstraintSpec::named("Range"));
        let exported = ComponentRecord::facility("F")
            .with_constraint(ConstraintSpec::named("ElevationAngle").with_min(10.0));
        assert!(equivalent(ComponentKind::Facility, &source, &exported));

        let extra = exported
            .clone()
            .with_constraint(ConstraintSpec::named("Range").with_max(5.0));
        let drifts = drift(ComponentKind::Facility, &source, &extra);
        assert_eq!(drifts[0].field, "constraints.Range");
    }
}
