//! # Factory Flows
//!
//! Batch creation from documents, scene-wide name uniqueness and the
//! conflict policy, checked through the scene and the exporter.

#[cfg(test)]
mod tests {
    use super::super::SceneHarness;
    use shared_types::{ComponentKind, ComponentRecord, OrbitSpec, PositionSpec};
    use sk_02_components::ComponentError;
    use sk_03_component_factory::{
        ComponentFactory, ComponentRegistry, ConflictPolicy, FactoryConfig, FactoryError,
    };
    use std::sync::Arc;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    const MIXED_DOCUMENT: &str = r#"{
        "components": [
            {"type": "Satellite", "name": "Sat1",
             "orbit": {"semi_major_axis": 7000.0, "eccentricity": 0.001, "inclination": 98.0}},
            {"type": "Rocket", "name": "Bad"},
            {"type": "Facility", "name": "Beijing",
             "position": {"latitude": 40.0, "longitude": 116.0, "altitude": 0.05},
             "constraints": [{"name": "ElevationAngle", "min": 10.0}]},
            {"type": "Facility"},
            {"type": "Satellite", "name": "Broken", "orbit": {"eccentricity": 1.5}}
        ]
    }"#;

    // =========================================================================
    // BATCHES
    // =========================================================================

    #[test]
    fn test_batch_reports_failures_by_index_and_keeps_going() {
        let mut harness = SceneHarness::new();
        let report = harness.factory.create_from_json_str(MIXED_DOCUMENT).unwrap();

        assert_eq!(report.created, vec!["Sat1".to_string(), "Beijing".to_string()]);
        let indices: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![1, 3, 4]);
        assert_eq!(report.failures[0].name.as_deref(), Some("Bad"));
        assert!(report.failures[1].name.is_none());
        assert!(!report.is_complete());

        // Invalid records never reach the scene.
        assert_eq!(harness.scene.object_names(), vec!["Sat1", "Beijing"]);
        assert_eq!(harness.factory.created_components().len(), 2);
    }

    #[test]
    fn test_batch_components_export_under_their_class() {
        let mut harness = SceneHarness::new();
        harness.factory.create_from_json_str(MIXED_DOCUMENT).unwrap();

        let snapshot = harness.exporter.snapshot().unwrap();
        assert_eq!(snapshot.recognized.get("Satellite"), Some(&1));
        assert_eq!(snapshot.recognized.get("Facility"), Some(&1));

        let sat = snapshot.find(ComponentKind::Satellite, "Sat1").unwrap();
        assert_eq!(sat.orbit.as_ref().unwrap().inclination, Some(98.0));
        assert!(snapshot.find(ComponentKind::Facility, "Sat1").is_none());
    }

    #[test]
    fn test_ground_station_alias_creates_facility() {
        let mut harness = SceneHarness::new();
        let report = harness
            .factory
            .create_from_json_str(
                r#"{"components": [{"type": "ground_station", "name": "Kashi",
                    "position": {"latitude": 39.5, "longitude": 76.0, "altitude": 1.3}}]}"#,
            )
            .unwrap();
        assert!(report.is_complete());

        let snapshot = harness.exporter.snapshot().unwrap();
        let record = snapshot.find(ComponentKind::Facility, "Kashi").unwrap();
        assert_eq!(record.kind.as_deref(), Some("Facility"));
    }

    #[test]
    fn test_delete_all_created_empties_the_scene() {
        let mut harness = SceneHarness::new();
        harness.factory.create_from_json_str(MIXED_DOCUMENT).unwrap();
        assert_eq!(harness.factory.delete_all_created(), 2);
        assert!(harness.scene.is_empty());
        assert!(harness.exporter.snapshot().unwrap().components.is_empty());
    }

    // =========================================================================
    // INVALID ATTRIBUTES
    // =========================================================================

    fn invalid_records() -> Vec<(ComponentRecord, &'static str)> {
        vec![
            (
                ComponentRecord::satellite("NegativeSma").with_orbit(OrbitSpec {
                    semi_major_axis: Some(-6778.0),
                    ..OrbitSpec::default()
                }),
                "orbit.semi_major_axis",
            ),
            (
                ComponentRecord::satellite("Hyperbolic").with_orbit(OrbitSpec {
                    eccentricity: Some(1.0),
                    ..OrbitSpec::default()
                }),
                "orbit.eccentricity",
            ),
            (
                ComponentRecord::facility("PastThePole")
                    .with_position(PositionSpec::new(91.0, 0.0, 0.0)),
                "position.latitude",
            ),
        ]
    }

    #[test]
    fn test_invalid_attributes_are_creation_errors() {
        let mut harness = SceneHarness::new();
        for (record, field) in invalid_records() {
            let err = harness.factory.create(&record).unwrap_err();
            match err {
                FactoryError::Creation(ComponentError::Creation { name, reason, .. }) => {
                    assert_eq!(Some(name), record.name.clone());
                    assert!(reason.contains(field), "{reason}");
                }
                other => panic!("expected a creation error, got {other:?}"),
            }
        }
        assert!(harness.scene.is_empty());
        assert!(harness.factory.created_components().is_empty());
    }

    #[test]
    fn test_invalid_attributes_fail_per_item_in_batches() {
        let mut harness = SceneHarness::new();
        let mut records: Vec<ComponentRecord> =
            invalid_records().into_iter().map(|(record, _)| record).collect();
        records.insert(1, ComponentRecord::satellite("Valid"));

        let report = harness.factory.create_many(&records);
        assert_eq!(report.created, vec!["Valid".to_string()]);
        let indices: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
        assert!(report
            .failures
            .iter()
            .all(|f| f.error.starts_with("Failed to create")));
        assert_eq!(harness.scene.object_names(), vec!["Valid"]);
    }

    // =========================================================================
    // NAMES AND CONFLICTS
    // =========================================================================

    #[test]
    fn test_name_is_unique_across_kinds() {
        let mut harness = SceneHarness::new();
        harness
            .factory
            .create(&ComponentRecord::satellite("Shared"))
            .unwrap();

        let err = harness
            .factory
            .create(&ComponentRecord::facility("Shared"))
            .unwrap_err();
        assert!(matches!(
            err,
            FactoryError::Creation(ComponentError::Creation { kind: ComponentKind::Facility, .. })
        ));
        assert_eq!(harness.scene.len(), 1);
        assert_eq!(harness.factory.created_components().len(), 1);
    }

    #[test]
    fn test_fail_policy_keeps_existing_component() {
        let mut harness = SceneHarness::new();
        let first = ComponentRecord::facility("Site").with_position(PositionSpec::new(1.0, 2.0, 0.0));
        let second = ComponentRecord::facility("Site").with_position(PositionSpec::new(5.0, 6.0, 0.0));
        harness.factory.create(&first).unwrap();
        assert!(harness.factory.create(&second).is_err());

        let position = harness.scene.facility_position("Site").unwrap();
        assert_eq!(position.latitude, 1.0);
    }

    #[test]
    fn test_replace_policy_swaps_the_component() {
        let harness = SceneHarness::new();
        assert_eq!(harness.factory.config().on_conflict, ConflictPolicy::Fail);
        let mut factory = ComponentFactory::new(
            harness.context.clone(),
            Arc::new(ComponentRegistry::builtin()),
        )
        .with_config(FactoryConfig::replacing());

        let old = ComponentRecord::satellite("Sat1").with_orbit(OrbitSpec {
            inclination: Some(10.0),
            ..OrbitSpec::default()
        });
        let new = ComponentRecord::satellite("Sat1").with_orbit(OrbitSpec {
            inclination: Some(55.0),
            ..OrbitSpec::default()
        });
        factory.create(&old).unwrap();
        factory.create(&new).unwrap();

        assert_eq!(harness.scene.len(), 1);
        assert_eq!(factory.created_components().len(), 1);
        let snapshot = harness.exporter.snapshot().unwrap();
        let record = snapshot.find(ComponentKind::Satellite, "Sat1").unwrap();
        assert_eq!(record.orbit.as_ref().unwrap().inclination, Some(55.0));
    }
}
