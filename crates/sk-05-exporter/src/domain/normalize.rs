//! # Normalizer
//!
//! Turns a raw description into exactly the record shape the factory
//! accepts.
//!
//! | Description part | Normalized form |
//! |------------------|-----------------|
//! | propagator info | bare tag (`HPOP`, not `HPOP (High Precision)`) |
//! | orbit | omitted if a required element is unreadable; `step` kept |
//! | position | omitted if unreadable; integral altitude as integer |
//! | LineOfSight | dropped |
//! | bounds constraint | kept only with at least one enabled bound |
//! | presence or opaque constraint | dropped, no bound to replay |

use shared_types::{
    ComponentDescription, ComponentKind, ComponentRecord, ConstraintReading, ConstraintSpec,
    ConstraintState, OrbitReading, OrbitSpec, PositionSpec, Reading, Scalar,
};
use tracing::{debug, warn};

/// Normalize one description.
pub fn normalize(description: &ComponentDescription) -> ComponentRecord {
    let name = description.name.as_str();
    let mut record = ComponentRecord::new(description.kind.class_name(), name);

    match description.kind {
        ComponentKind::Satellite => {
            record.propagator = propagator_tag(description);
            if let Some(orbit) = &description.orbit {
                record.step = orbit.step.value().copied();
                record.orbit = orbit_spec(name, orbit);
            }
        }
        ComponentKind::Facility => {
            record.position = match &description.position {
                Some(Reading::Value(position)) => Some(PositionSpec {
                    latitude: Some(position.latitude),
                    longitude: Some(position.longitude),
                    altitude: Some(Scalar::compact(position.altitude)),
                }),
                Some(Reading::Unavailable { error }) => {
                    warn!("[sk-05] Omitting unreadable position of '{}': {}", name, error);
                    None
                }
                None => None,
            };
        }
    }

    record.constraints = match &description.constraints {
        Reading::Value(readings) => readings
            .iter()
            .filter_map(|reading| constraint_spec(name, reading))
            .collect(),
        Reading::Unavailable { error } => {
            warn!("[sk-05] Omitting unreadable constraints of '{}': {}", name, error);
            Vec::new()
        }
    };
    record
}

fn propagator_tag(description: &ComponentDescription) -> Option<String> {
    match description.propagator.as_ref()? {
        Reading::Value(info) => match info.kind() {
            Some(kind) => Some(kind.tag().to_string()),
            None => {
                warn!(
                    "[sk-05] Omitting unrecognized propagator '{}' of '{}'",
                    info.label, description.name
                );
                None
            }
        },
        Reading::Unavailable { error } => {
            warn!(
                "[sk-05] Omitting unreadable propagator of '{}': {}",
                description.name, error
            );
            None
        }
    }
}

fn orbit_spec(name: &str, orbit: &OrbitReading) -> Option<OrbitSpec> {
    let required = [
        ("semi_major_axis", &orbit.semi_major_axis),
        ("eccentricity", &orbit.eccentricity),
        ("inclination", &orbit.inclination),
        ("arg_of_perigee", &orbit.arg_of_perigee),
    ];
    for (field, reading) in required {
        if let Reading::Unavailable { error } = reading {
            warn!(
                "[sk-05] Omitting orbit of '{}': {} unreadable ({})",
                name, field, error
            );
            return None;
        }
    }
    Some(OrbitSpec {
        semi_major_axis: orbit.semi_major_axis.value().copied(),
        eccentricity: orbit.eccentricity.value().copied(),
        inclination: orbit.inclination.value().copied(),
        raan: orbit.raan.value().copied(),
        arg_of_perigee: orbit.arg_of_perigee.value().copied(),
        true_anomaly: orbit.true_anomaly.value().copied(),
    })
}

fn constraint_spec(owner: &str, reading: &ConstraintReading) -> Option<ConstraintSpec> {
    match &reading.state {
        Reading::Value(ConstraintState::LineOfSight) => None,
        Reading::Value(ConstraintState::Presence) => {
            debug!(
                "[sk-05] Dropping {} on '{}': presence-only, no bound enabled",
                reading.name, owner
            );
            None
        }
        Reading::Value(ConstraintState::Bounds { min: None, max: None }) => {
            debug!(
                "[sk-05] Dropping {} on '{}': no bound enabled",
                reading.name, owner
            );
            None
        }
        Reading::Value(ConstraintState::Bounds { min, max }) => Some(ConstraintSpec {
            min: *min,
            max: *max,
            ..ConstraintSpec::named(&reading.name)
        }),
        Reading::Value(ConstraintState::Opaque) => {
            debug!(
                "[sk-05] Dropping {} on '{}': parameters not representable",
                reading.name, owner
            );
            None
        }
        Reading::Unavailable { error } => {
            warn!(
                "[sk-05] Dropping unreadable constraint {} on '{}': {}",
                reading.name, owner, error
            );
            None
        }
    }
}
