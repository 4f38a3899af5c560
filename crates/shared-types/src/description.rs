//! # Describe Readings
//!
//! The raw, pre-normalization view of a live component. Every attribute read
//! off the backend is a [`Reading`], so a failed read is reported in place
//! instead of aborting the whole description.

use serde::{Deserialize, Serialize};

use crate::entities::{ComponentKind, GeodeticPosition, PropagatorKind};

/// Outcome of reading one attribute from a live object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading<T> {
    /// The attribute was read.
    Value(T),
    /// The attribute could not be read.
    Unavailable {
        /// Backend diagnostic.
        error: String,
    },
}

impl<T> Reading<T> {
    /// Mark an attribute unreadable.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Reading::Unavailable {
            error: error.into(),
        }
    }

    /// The value, if it was read.
    pub fn value(&self) -> Option<&T> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable { .. } => None,
        }
    }

    /// Consume into the value, if it was read.
    pub fn into_value(self) -> Option<T> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable { .. } => None,
        }
    }

    /// True when the read failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Reading::Unavailable { .. })
    }

    /// Map the read value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reading<U> {
        match self {
            Reading::Value(v) => Reading::Value(f(v)),
            Reading::Unavailable { error } => Reading::Unavailable { error },
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Reading<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Reading::Value(v),
            Err(e) => Reading::unavailable(e.to_string()),
        }
    }
}

/// Propagator as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropagatorInfo {
    /// Display label, e.g. `HPOP (High Precision)`.
    #[serde(rename = "type")]
    pub label: String,
    /// Backend enumeration value.
    pub type_id: i32,
}

impl PropagatorInfo {
    /// Info for a known kind.
    pub fn of(kind: PropagatorKind) -> Self {
        Self {
            label: kind.label().to_string(),
            type_id: kind.code(),
        }
    }

    /// Resolve to a known kind by id, falling back to the label.
    pub fn kind(&self) -> Option<PropagatorKind> {
        PropagatorKind::from_code(self.type_id).or_else(|| {
            let bare = self
                .label
                .split('(')
                .next()
                .map(str::trim)
                .unwrap_or_default();
            PropagatorKind::from_tag(bare)
        })
    }
}

/// Orbit readings of a satellite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitReading {
    /// Propagation step (s).
    pub step: Reading<f64>,
    /// Semi-major axis (km).
    pub semi_major_axis: Reading<f64>,
    /// Eccentricity.
    pub eccentricity: Reading<f64>,
    /// Inclination (deg).
    pub inclination: Reading<f64>,
    /// RAAN (deg).
    pub raan: Reading<f64>,
    /// Argument of perigee (deg).
    pub arg_of_perigee: Reading<f64>,
    /// True anomaly (deg).
    pub true_anomaly: Reading<f64>,
}

impl OrbitReading {
    /// All element readings share one failure, step included.
    pub fn unavailable(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            step: Reading::unavailable(error.clone()),
            semi_major_axis: Reading::unavailable(error.clone()),
            eccentricity: Reading::unavailable(error.clone()),
            inclination: Reading::unavailable(error.clone()),
            raan: Reading::unavailable(error.clone()),
            arg_of_perigee: Reading::unavailable(error.clone()),
            true_anomaly: Reading::unavailable(error),
        }
    }
}

/// How a constraint reads back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ConstraintState {
    /// The always-present line-of-sight constraint.
    LineOfSight,
    /// A boolean constraint expressed by presence alone.
    Presence,
    /// A min/max constraint; a disabled bound reads as `None`.
    Bounds {
        /// Enabled minimum.
        min: Option<f64>,
        /// Enabled maximum.
        max: Option<f64>,
    },
    /// A constraint whose state is not a min/max pair.
    Opaque,
}

/// One constraint read off a live object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintReading {
    /// Constraint name; reported even when it is not in the registry.
    pub name: String,
    /// Backend type code.
    pub type_code: i32,
    /// Read-back state.
    pub state: Reading<ConstraintState>,
}

/// Raw description of a live component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescription {
    /// Component kind.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Component name.
    pub name: String,
    /// Propagator (satellites).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagator: Option<Reading<PropagatorInfo>>,
    /// Orbit (satellites).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitReading>,
    /// Position (facilities).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Reading<GeodeticPosition>>,
    /// Access constraints.
    pub constraints: Reading<Vec<ConstraintReading>>,
}

impl ComponentDescription {
    /// Empty description with no constraints read yet.
    pub fn new(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            propagator: None,
            orbit: None,
            position: None,
            constraints: Reading::Value(Vec::new()),
        }
    }
}
