//! # Replay Tests
//!
//! The runtime loads input documents and exports the scene to disk; the
//! exported documents are then replayed into a fresh scene, whose own
//! export must match the first one.

#[cfg(test)]
mod tests {
    use super::super::SceneHarness;
    use scene_runtime::{RuntimeConfig, SceneRuntime};
    use serde_json::{json, Value};
    use shared_types::ComponentKind;
    use sk_05_exporter::SUMMARY_FILE;
    use std::fs;
    use std::path::Path;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn write_json(path: &Path, value: &Value) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    fn seed_inputs(config: &RuntimeConfig) {
        write_json(
            &config.input_dir.join("satellites/constellation.json"),
            &json!({"components": [
                {"type": "Satellite", "name": "Sat1", "propagator": "J2Perturbation",
                 "step": 60.0,
                 "orbit": {"semi_major_axis": 7000.0, "eccentricity": 0.001,
                           "inclination": 98.0, "raan": 10.0,
                           "arg_of_perigee": 0.0, "true_anomaly": 45.0}},
                {"type": "Satellite", "name": "Sat2", "propagator": "TwoBody",
                 "orbit": {"semiMajorAxis": 26560.0, "eccentricity": 0.01, "inclination": 55.0},
                 "constraints": [{"name": "Range", "max": 40000.0}]},
                {"type": "Satellite", "name": "Tle", "propagator": "SGP4"}
            ]}),
        );
        write_json(
            &config.input_dir.join("facilities/stations.json"),
            &json!({"components": [
                {"type": "Facility", "name": "Beijing",
                 "position": {"latitude": 40.0, "longitude": 116.0, "altitude": 0.05},
                 "constraints": [{"name": "ElevationAngle", "min": 10.0}]},
                {"type": "GroundStation", "name": "Santiago",
                 "position": {"latitude": -33.1, "longitude": 289.3, "altitude": 0}}
            ]}),
        );
    }

    fn exported_documents(dir: &Path) -> Vec<Value> {
        let summary: Value =
            serde_json::from_str(&fs::read_to_string(dir.join(SUMMARY_FILE)).unwrap()).unwrap();
        summary["exported_files"]
            .as_array()
            .unwrap()
            .iter()
            .map(|file| {
                let path = dir.join(file.as_str().unwrap());
                serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
            })
            .collect()
    }

    // =========================================================================
    // TESTS
    // =========================================================================

    #[test]
    fn test_runtime_run_is_clean() {
        let root = tempfile::tempdir().unwrap();
        let config = RuntimeConfig::for_testing(root.path());
        seed_inputs(&config);

        let mut runtime = SceneRuntime::new(config);
        let summary = runtime.run().unwrap();
        assert!(summary.is_clean(), "{summary:?}");
        assert_eq!(summary.load.created(), 5);
        assert_eq!(summary.manifest.total_components, 5);
        assert_eq!(summary.manifest.components_by_type.get("Satellite"), Some(&3));
        assert_eq!(summary.manifest.components_by_type.get("Facility"), Some(&2));
    }

    #[test]
    fn test_exported_documents_replay_into_identical_scene() {
        let root = tempfile::tempdir().unwrap();
        let config = RuntimeConfig::for_testing(root.path());
        seed_inputs(&config);
        let export_dir = config.export.dir.clone();

        let mut runtime = SceneRuntime::new(config);
        runtime.run().unwrap();
        let original = runtime.container().exporter().snapshot().unwrap();

        let mut replayed = SceneHarness::new();
        for document in exported_documents(&export_dir) {
            let report = replayed
                .factory
                .create_from_json_str(&document.to_string())
                .unwrap();
            assert!(report.is_complete(), "{:?}", report.failures);
        }
        let copy = replayed.exporter.snapshot().unwrap();

        assert_eq!(copy.recognized, original.recognized);
        for component in &original.components {
            assert_eq!(
                copy.find(component.kind, component.name()),
                Some(&component.record),
                "{} differs after replay",
                component.name()
            );
        }
    }

    #[test]
    fn test_exported_facility_wraps_longitude() {
        let root = tempfile::tempdir().unwrap();
        let config = RuntimeConfig::for_testing(root.path());
        seed_inputs(&config);

        let mut runtime = SceneRuntime::new(config);
        runtime.run().unwrap();
        let snapshot = runtime.container().exporter().snapshot().unwrap();

        let santiago = snapshot.find(ComponentKind::Facility, "Santiago").unwrap();
        let longitude = santiago.position.as_ref().unwrap().longitude.unwrap();
        assert!((longitude - -70.7).abs() < 1e-9);
        assert_eq!(
            serde_json::to_value(&santiago.position.as_ref().unwrap().altitude).unwrap(),
            json!(0)
        );
    }
}
