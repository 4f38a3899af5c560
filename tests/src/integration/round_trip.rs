//! # Round-Trip Tests
//!
//! A component created from record `R` must export a record that recreates
//! the same managed attributes. Satellites and facilities are generated
//! across their valid ranges; fixed scenarios pin the exact exported shape.

#[cfg(test)]
mod tests {
    use super::super::SceneHarness;
    use proptest::prelude::*;
    use serde_json::json;
    use shared_types::{
        ComponentKind, ComponentRecord, ConstraintSpec, OrbitSpec, PositionSpec, PropagatorKind,
    };
    use sk_05_exporter::drift;

    // =========================================================================
    // STRATEGIES
    // =========================================================================

    fn arb_managed_propagator() -> impl Strategy<Value = PropagatorKind> {
        prop_oneof![
            Just(PropagatorKind::J2Perturbation),
            Just(PropagatorKind::TwoBody),
        ]
    }

    fn arb_orbit() -> impl Strategy<Value = OrbitSpec> {
        (
            6_600.0f64..42_500.0,
            0.0f64..0.9,
            0.0f64..180.0,
            prop::option::of(0.0f64..360.0),
            0.0f64..360.0,
            prop::option::of(0.0f64..360.0),
        )
            .prop_map(|(sma, ecc, inc, raan, argp, ta)| OrbitSpec {
                semi_major_axis: Some(sma),
                eccentricity: Some(ecc),
                inclination: Some(inc),
                raan,
                arg_of_perigee: Some(argp),
                true_anomaly: ta,
            })
    }

    fn arb_constraints() -> impl Strategy<Value = Vec<ConstraintSpec>> {
        (prop::option::of(0.0f64..45.0), prop::option::of(500.0f64..40_000.0)).prop_map(
            |(elevation, range)| {
                let mut constraints = Vec::new();
                if let Some(min) = elevation {
                    constraints.push(ConstraintSpec::named("ElevationAngle").with_min(min));
                }
                if let Some(max) = range {
                    constraints.push(ConstraintSpec::named("Range").with_max(max));
                }
                constraints
            },
        )
    }

    fn arb_satellite() -> impl Strategy<Value = ComponentRecord> {
        (
            arb_managed_propagator(),
            arb_orbit(),
            prop::option::of(1.0f64..600.0),
            arb_constraints(),
        )
            .prop_map(|(propagator, orbit, step, constraints)| {
                let mut record = ComponentRecord::satellite("GenSat")
                    .with_propagator(propagator)
                    .with_orbit(orbit);
                record.step = step;
                record.constraints = constraints;
                record
            })
    }

    fn arb_facility() -> impl Strategy<Value = ComponentRecord> {
        (
            -90.0f64..=90.0,
            -180.0f64..360.0,
            -0.4f64..9.0,
            arb_constraints(),
        )
            .prop_map(|(lat, lon, alt, constraints)| {
                let mut record = ComponentRecord::facility("GenSite")
                    .with_position(PositionSpec::new(lat, lon, alt));
                record.constraints = constraints;
                record
            })
    }

    fn round_trip(kind: ComponentKind, record: &ComponentRecord) -> ComponentRecord {
        let mut harness = SceneHarness::new();
        harness.factory.create(record).unwrap();
        let snapshot = harness.exporter.snapshot().unwrap();
        assert!(snapshot.failures.is_empty(), "{:?}", snapshot.failures);
        snapshot
            .find(kind, record.name.as_deref().unwrap())
            .cloned()
            .unwrap()
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_satellites_survive_round_trip(record in arb_satellite()) {
            let exported = round_trip(ComponentKind::Satellite, &record);
            let drifts = drift(ComponentKind::Satellite, &record, &exported);
            prop_assert!(drifts.is_empty(), "drifted: {:?}", drifts);
        }

        #[test]
        fn test_facilities_survive_round_trip(record in arb_facility()) {
            let exported = round_trip(ComponentKind::Facility, &record);
            let drifts = drift(ComponentKind::Facility, &record, &exported);
            prop_assert!(drifts.is_empty(), "drifted: {:?}", drifts);
        }

        #[test]
        fn test_exported_record_replays_to_itself(record in arb_satellite()) {
            let first = round_trip(ComponentKind::Satellite, &record);
            let second = round_trip(ComponentKind::Satellite, &first);
            prop_assert_eq!(first, second);
        }
    }

    // =========================================================================
    // FIXED SCENARIOS
    // =========================================================================

    #[test]
    fn test_beijing_exports_only_its_bounded_constraint() {
        let record = ComponentRecord::facility("Beijing")
            .with_position(PositionSpec::new(40.0, 116.0, 0.05))
            .with_constraint(ConstraintSpec::named("ElevationAngle").with_min(10.0));
        let exported = round_trip(ComponentKind::Facility, &record);

        assert_eq!(
            serde_json::to_value(&exported.constraints).unwrap(),
            json!([{"name": "ElevationAngle", "min": 10.0}])
        );
        assert_eq!(
            serde_json::to_value(&exported.position).unwrap(),
            json!({"latitude": 40.0, "longitude": 116.0, "altitude": 0.05})
        );
    }

    #[test]
    fn test_bare_satellite_exports_creation_defaults() {
        let exported = round_trip(ComponentKind::Satellite, &ComponentRecord::satellite("Bare"));
        assert_eq!(exported.propagator.as_deref(), Some("J2Perturbation"));
        assert_eq!(exported.step, Some(60.0));

        let orbit = exported.orbit.unwrap();
        assert_eq!(orbit.semi_major_axis, Some(7000.0));
        assert_eq!(orbit.eccentricity, Some(0.0));
        assert_eq!(orbit.inclination, Some(0.0));
    }

    #[test]
    fn test_unmanaged_propagator_keeps_its_tag_only() {
        let record = ComponentRecord::satellite("Tle").with_propagator(PropagatorKind::Sgp4);
        let exported = round_trip(ComponentKind::Satellite, &record);
        assert_eq!(exported.propagator.as_deref(), Some("SGP4"));
        assert!(drift(ComponentKind::Satellite, &record, &exported).is_empty());
    }

    #[test]
    fn test_longitude_past_180_compares_modulo_360() {
        let record = ComponentRecord::facility("Wrapped")
            .with_position(PositionSpec::new(-33.9, 270.0, 0.0));
        let exported = round_trip(ComponentKind::Facility, &record);

        let longitude = exported.position.as_ref().unwrap().longitude.unwrap();
        assert_eq!(longitude, -90.0);
        assert!(drift(ComponentKind::Facility, &record, &exported).is_empty());
    }

    #[test]
    fn test_presence_only_constraint_is_not_exported() {
        let record = ComponentRecord::facility("Masked")
            .with_position(PositionSpec::new(30.0, 100.0, 1.0))
            .with_constraint(ConstraintSpec::named("TerrainMask"))
            .with_constraint(ConstraintSpec::named("ElevationAngle").with_min(5.0));
        let mut harness = SceneHarness::new();
        harness.factory.create(&record).unwrap();
        assert!(harness
            .scene
            .constraints("Masked")
            .iter()
            .any(|c| c.name == "TerrainMask"));

        let snapshot = harness.exporter.snapshot().unwrap();
        let exported = snapshot.find(ComponentKind::Facility, "Masked").unwrap();
        assert_eq!(
            serde_json::to_value(&exported.constraints).unwrap(),
            json!([{"name": "ElevationAngle", "min": 5.0}])
        );
        assert!(drift(ComponentKind::Facility, &record, exported).is_empty());
    }

    #[test]
    fn test_disabled_constraint_is_not_exported() {
        let record = ComponentRecord::facility("Quiet")
            .with_position(PositionSpec::new(10.0, 20.0, 0.0))
            .with_constraint(ConstraintSpec::named("ElevationAngle").with_min(5.0))
            .with_constraint(ConstraintSpec {
                disable_min: true,
                ..ConstraintSpec::named("ElevationAngle")
            });
        let exported = round_trip(ComponentKind::Facility, &record);
        assert!(exported.constraints.is_empty());
        assert!(drift(ComponentKind::Facility, &record, &exported).is_empty());
    }
}
