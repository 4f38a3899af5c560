//! # Modify Flows
//!
//! Patches applied through the modifier, observed through the exporter:
//! only the patched attribute changes and everything else exports as it
//! was created.

#[cfg(test)]
mod tests {
    use super::super::SceneHarness;
    use serde_json::json;
    use shared_scene::Property;
    use shared_types::{ComponentKind, ComponentRecord, ConstraintSpec, OrbitSpec, PositionSpec};
    use sk_04_modifier::{ComponentModifier, ModifyError};
    use sk_05_exporter::drift;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn leo() -> ComponentRecord {
        ComponentRecord::satellite("Leo")
            .with_orbit(OrbitSpec {
                semi_major_axis: Some(6878.0),
                eccentricity: Some(0.002),
                inclination: Some(51.6),
                raan: Some(120.0),
                arg_of_perigee: Some(30.0),
                true_anomaly: Some(10.0),
            })
            .with_step(30.0)
    }

    fn beijing() -> ComponentRecord {
        ComponentRecord::facility("Beijing")
            .with_position(PositionSpec::new(40.0, 116.0, 0.05))
            .with_constraint(ConstraintSpec::named("ElevationAngle").with_min(10.0))
    }

    fn harness_with(records: &[ComponentRecord]) -> SceneHarness {
        let mut harness = SceneHarness::new();
        for record in records {
            harness.factory.create(record).unwrap();
        }
        harness.scene.clear_writes();
        harness
    }

    fn exported(harness: &SceneHarness, kind: ComponentKind, name: &str) -> ComponentRecord {
        harness
            .exporter
            .snapshot()
            .unwrap()
            .find(kind, name)
            .cloned()
            .unwrap()
    }

    // =========================================================================
    // SATELLITES
    // =========================================================================

    #[test]
    fn test_single_element_patch_leaves_the_rest_exported_as_created() {
        let harness = harness_with(&[leo()]);
        let mut modifier = ComponentModifier::satellite(harness.context.clone());
        modifier.load("Leo").unwrap();
        modifier.set("orbit.inclination", json!(97.4)).unwrap();

        assert_eq!(
            harness.scene.writes("Leo"),
            vec![Property::CoordinateSystem, Property::Inclination]
        );

        let record = exported(&harness, ComponentKind::Satellite, "Leo");
        let drifts = drift(ComponentKind::Satellite, &leo(), &record);
        assert_eq!(drifts.len(), 1, "{drifts:?}");
        assert_eq!(drifts[0].field, "orbit.inclination");
        assert_eq!(record.orbit.as_ref().unwrap().inclination, Some(97.4));
    }

    #[test]
    fn test_patched_record_round_trips() {
        let harness = harness_with(&[leo()]);
        let mut modifier = ComponentModifier::satellite(harness.context.clone());
        modifier.load("Leo").unwrap();
        modifier
            .apply_json(json!({"step": 15.0, "orbit": {"eccentricity": 0.01}}))
            .unwrap();

        let mut expected = leo().with_step(15.0);
        if let Some(orbit) = expected.orbit.as_mut() {
            orbit.eccentricity = Some(0.01);
        }
        let record = exported(&harness, ComponentKind::Satellite, "Leo");
        assert!(drift(ComponentKind::Satellite, &expected, &record).is_empty());
    }

    #[test]
    fn test_rejected_patch_changes_nothing() {
        let harness = harness_with(&[leo()]);
        let mut modifier = ComponentModifier::satellite(harness.context.clone());
        modifier.load("Leo").unwrap();

        assert!(matches!(
            modifier.apply_json(json!({"orbit": {"eccentricity": 2.0}})),
            Err(ModifyError::InvalidField { .. })
        ));
        assert!(matches!(
            modifier.apply_json(json!({"position": {"latitude": 1.0}})),
            Err(ModifyError::UnsupportedField { .. })
        ));
        assert!(harness.scene.writes("Leo").is_empty());

        let record = exported(&harness, ComponentKind::Satellite, "Leo");
        assert!(drift(ComponentKind::Satellite, &leo(), &record).is_empty());
    }

    // =========================================================================
    // FACILITIES
    // =========================================================================

    #[test]
    fn test_partial_position_patch_keeps_other_coordinates() {
        let harness = harness_with(&[beijing()]);
        let mut modifier = ComponentModifier::facility(harness.context.clone());
        modifier.load("Beijing").unwrap();
        modifier.set_position(None, None, Some(1.2)).unwrap();

        let record = exported(&harness, ComponentKind::Facility, "Beijing");
        assert_eq!(
            serde_json::to_value(&record.position).unwrap(),
            json!({"latitude": 40.0, "longitude": 116.0, "altitude": 1.2})
        );
    }

    #[test]
    fn test_constraint_patch_updates_export() {
        let harness = harness_with(&[beijing()]);
        let mut modifier = ComponentModifier::facility(harness.context.clone());
        modifier.load("Beijing").unwrap();
        modifier
            .set_constraints(vec![
                ConstraintSpec::named("ElevationAngle").with_min(5.0),
                ConstraintSpec::named("Range").with_max(2000.0),
            ])
            .unwrap();

        let record = exported(&harness, ComponentKind::Facility, "Beijing");
        assert_eq!(
            serde_json::to_value(&record.constraints).unwrap(),
            json!([
                {"name": "ElevationAngle", "min": 5.0},
                {"name": "Range", "max": 2000.0}
            ])
        );
    }

    #[test]
    fn test_loading_a_missing_component_fails() {
        let harness = harness_with(&[beijing()]);
        let mut modifier = ComponentModifier::satellite(harness.context.clone());
        assert!(modifier.load("Beijing").is_err());
        assert!(!modifier.is_loaded());
        assert!(matches!(
            modifier.set_propagator_step(10.0),
            Err(ModifyError::NotLoaded(ComponentKind::Satellite))
        ));
    }
}
