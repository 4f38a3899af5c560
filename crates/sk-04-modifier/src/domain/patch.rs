//! # Component Patch
//!
//! The partial form of a declarative record. Every field is optional and
//! only present fields are written.

use crate::error::ModifyError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::{
    validate_step, ConstraintSpec, OrbitSpec, PositionSpec, PropagatorKind,
};

/// Propagator part of a patch: a bare tag or a settings object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropagatorPatch {
    /// `"propagator": "TwoBody"`
    Tag(String),
    /// `"propagator": {"type": "TwoBody", "step": 30.0}`
    Settings(PropagatorSettings),
}

/// Propagator settings object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropagatorSettings {
    /// New propagator tag.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// New step (s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl PropagatorPatch {
    fn tag(&self) -> Option<&str> {
        match self {
            PropagatorPatch::Tag(tag) => Some(tag),
            PropagatorPatch::Settings(settings) => settings.kind.as_deref(),
        }
    }

    fn step(&self) -> Option<f64> {
        match self {
            PropagatorPatch::Tag(_) => None,
            PropagatorPatch::Settings(settings) => settings.step,
        }
    }
}

/// Partial update of a live component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentPatch {
    /// Classical elements to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitSpec>,
    /// Propagator kind and/or step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagator: Option<PropagatorPatch>,
    /// Step (s), same as `propagator.step`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Geodetic fields to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionSpec>,
    /// Constraints to add or update. Unlisted constraints stay as they are.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<ConstraintSpec>>,
}

impl ComponentPatch {
    /// Decode a patch from a JSON value.
    pub fn from_json(value: Value) -> Result<Self, ModifyError> {
        serde_json::from_value(value).map_err(|e| ModifyError::MalformedPatch(e.to_string()))
    }

    /// Single-field patch from a dotted path such as `orbit.semiMajorAxis`.
    pub fn from_dotted(path: &str, value: Value) -> Result<Self, ModifyError> {
        let keys: Vec<&str> = path.split('.').collect();
        if keys.iter().any(|key| key.is_empty()) {
            return Err(ModifyError::MalformedPatch(format!("bad path '{path}'")));
        }
        let nested = keys.iter().rev().fold(value, |inner, key| {
            let mut map = Map::new();
            map.insert((*key).to_string(), inner);
            Value::Object(map)
        });
        Self::from_json(nested)
    }

    /// Patch that only touches the orbit.
    pub fn orbit(orbit: OrbitSpec) -> Self {
        Self {
            orbit: Some(orbit),
            ..Self::default()
        }
    }

    /// Patch that only touches the position.
    pub fn position(position: PositionSpec) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Patch that only touches constraints.
    pub fn constraints(constraints: Vec<ConstraintSpec>) -> Self {
        Self {
            constraints: Some(constraints),
            ..Self::default()
        }
    }

    /// Names of the top-level fields present.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.orbit.is_some() {
            fields.push("orbit");
        }
        if self.propagator.is_some() {
            fields.push("propagator");
        }
        if self.step.is_some() {
            fields.push("step");
        }
        if self.position.is_some() {
            fields.push("position");
        }
        if self.constraints.is_some() {
            fields.push("constraints");
        }
        fields
    }

    /// True when nothing would be written.
    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }

    /// Requested propagator kind, if any.
    pub fn propagator_kind(&self) -> Result<Option<PropagatorKind>, ModifyError> {
        match self.propagator.as_ref().and_then(PropagatorPatch::tag) {
            None => Ok(None),
            Some(tag) => PropagatorKind::from_tag(tag)
                .map(Some)
                .ok_or_else(|| ModifyError::InvalidField {
                    field: "propagator".to_string(),
                    reason: format!("unknown propagator {tag}"),
                }),
        }
    }

    /// Requested step, from either spelling.
    pub fn requested_step(&self) -> Result<Option<f64>, ModifyError> {
        let nested = self.propagator.as_ref().and_then(PropagatorPatch::step);
        match (self.step, nested) {
            (Some(a), Some(b)) if a != b => Err(ModifyError::InvalidField {
                field: "step".to_string(),
                reason: format!("given twice with different values ({a} and {b})"),
            }),
            (step, nested) => Ok(step.or(nested)),
        }
    }

    /// Structural checks on every present field.
    pub fn validate(&self) -> Result<(), ModifyError> {
        self.propagator_kind()?;
        if let Some(step) = self.requested_step()? {
            validate_step(step)?;
        }
        if let Some(orbit) = &self.orbit {
            orbit.validate()?;
        }
        if let Some(position) = &self.position {
            position.validate()?;
        }
        Ok(())
    }
}
