//! # Constraint Applier and Reader
//!
//! Search-or-add semantics over a component's access-constraint collection.
//! Failures here are diagnostics, never errors: an unknown name, a failed add
//! or a rejected bound is logged and reported as skipped.

use shared_scene::{
    codes, BackendError, InterfaceId, Member, Method, NodeRef, Property, SceneBackend,
    SceneBackendExt, Value,
};
use shared_types::{ConstraintReading, ConstraintSpec, ConstraintState, Reading};
use sk_01_constraint_registry::{ConstraintCode, ConstraintForm, ConstraintRegistry};
use tracing::{debug, warn};

/// What happened to one requested constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintOutcome {
    /// Existing constraint updated.
    Updated,
    /// Constraint added, then updated.
    Added,
    /// Nothing to do.
    Unchanged,
    /// Not applied.
    Skipped {
        /// Why.
        reason: String,
    },
}

/// Per-constraint outcomes of one application pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintReport {
    /// `(name, outcome)` in request order.
    pub outcomes: Vec<(String, ConstraintOutcome)>,
}

impl ConstraintReport {
    /// Names that were skipped.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|(name, outcome)| {
            matches!(outcome, ConstraintOutcome::Skipped { .. }).then_some(name.as_str())
        })
    }

    /// True when nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped().next().is_none()
    }
}

/// Applies constraint specs to one collection.
pub struct ConstraintApplier<'a> {
    backend: &'a dyn SceneBackend,
    registry: &'a ConstraintRegistry,
    collection: NodeRef,
    owner: &'a str,
}

impl<'a> ConstraintApplier<'a> {
    /// Open the collection under a configuration interface.
    pub fn open(
        backend: &'a dyn SceneBackend,
        registry: &'a ConstraintRegistry,
        interface: &NodeRef,
        owner: &'a str,
    ) -> Result<Self, BackendError> {
        let collection = backend.child(interface, Member::AccessConstraints)?;
        Ok(Self {
            backend,
            registry,
            collection,
            owner,
        })
    }

    /// Find an active constraint by name.
    pub fn find(&self, name: &str) -> Result<Option<NodeRef>, BackendError> {
        let count = self.backend.get_int(&self.collection, Property::Count)?;
        for index in 0..usize::try_from(count).unwrap_or(0) {
            let Some(item) = self
                .backend
                .invoke(&self.collection, Method::ConstraintAt(index))?
            else {
                continue;
            };
            if self.backend.get_text(&item, Property::ConstraintName)? == name {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Apply every spec in order.
    pub fn apply_all(&self, specs: &[ConstraintSpec]) -> ConstraintReport {
        let outcomes = specs
            .iter()
            .map(|spec| (spec.name.clone(), self.apply(spec)))
            .collect();
        ConstraintReport { outcomes }
    }

    /// Apply one spec.
    pub fn apply(&self, spec: &ConstraintSpec) -> ConstraintOutcome {
        match self.try_apply(spec) {
            Ok(outcome) => outcome,
            Err(reason) => {
                warn!(
                    "[sk-02] Skipping constraint {} on '{}': {}",
                    spec.name, self.owner, reason
                );
                ConstraintOutcome::Skipped { reason }
            }
        }
    }

    fn try_apply(&self, spec: &ConstraintSpec) -> Result<ConstraintOutcome, String> {
        if spec.name.is_empty() {
            return Err("constraint name is empty".to_string());
        }
        let existing = self.find(&spec.name).map_err(|e| e.to_string())?;

        let (node, added) = match existing {
            Some(node) => (node, false),
            None if spec.only_disables() => {
                debug!(
                    "[sk-02] Constraint {} not active on '{}', nothing to disable",
                    spec.name, self.owner
                );
                return Ok(ConstraintOutcome::Unchanged);
            }
            None => {
                let code = self
                    .registry
                    .type_code_of(&spec.name)
                    .ok_or_else(|| "unknown constraint name".to_string())?;
                let node = self
                    .backend
                    .invoke(&self.collection, Method::AddConstraint(code.0))
                    .map_err(|e| format!("add failed: {e}"))?
                    .ok_or_else(|| "add produced no constraint".to_string())?;
                debug!(
                    "[sk-02] Added constraint {} (code {}) to '{}'",
                    spec.name, code, self.owner
                );
                (node, true)
            }
        };

        if spec.touches_bounds() {
            let minmax = self
                .backend
                .query_interface(&node, InterfaceId::ConstraintMinMax)
                .ok_or_else(|| "constraint has no min/max bounds".to_string())?;
            self.write_bounds(&minmax, spec)
                .map_err(|e| format!("bounds rejected: {e}"))?;
        }

        Ok(if added {
            ConstraintOutcome::Added
        } else if spec.touches_bounds() {
            ConstraintOutcome::Updated
        } else {
            ConstraintOutcome::Unchanged
        })
    }

    fn write_bounds(&self, node: &NodeRef, spec: &ConstraintSpec) -> Result<(), BackendError> {
        match spec.min {
            Some(min) => {
                self.backend.set(node, Property::EnableMin, Value::Bool(true))?;
                self.backend.set(node, Property::Min, Value::Real(min))?;
            }
            None if spec.disable_min => {
                self.backend.set(node, Property::EnableMin, Value::Bool(false))?;
            }
            None => {}
        }
        match spec.max {
            Some(max) => {
                self.backend.set(node, Property::EnableMax, Value::Bool(true))?;
                self.backend.set(node, Property::Max, Value::Real(max))?;
            }
            None if spec.disable_max => {
                self.backend.set(node, Property::EnableMax, Value::Bool(false))?;
            }
            None => {}
        }
        Ok(())
    }
}

/// Read every constraint under a configuration interface.
pub fn read_constraints(
    backend: &dyn SceneBackend,
    registry: &ConstraintRegistry,
    interface: &NodeRef,
) -> Reading<Vec<ConstraintReading>> {
    let collection = match backend.child(interface, Member::AccessConstraints) {
        Ok(node) => node,
        Err(e) => return Reading::unavailable(e.to_string()),
    };
    let count = match backend.get_int(&collection, Property::Count) {
        Ok(count) => usize::try_from(count).unwrap_or(0),
        Err(e) => return Reading::unavailable(e.to_string()),
    };

    let mut readings = Vec::with_capacity(count);
    for index in 0..count {
        let item = match backend.invoke(&collection, Method::ConstraintAt(index)) {
            Ok(Some(item)) => item,
            Ok(None) => continue,
            Err(e) => return Reading::unavailable(e.to_string()),
        };
        readings.push(read_one(backend, registry, &item));
    }
    Reading::Value(readings)
}

fn read_one(
    backend: &dyn SceneBackend,
    registry: &ConstraintRegistry,
    item: &NodeRef,
) -> ConstraintReading {
    let type_code = backend.get_int(item, Property::ConstraintType);
    let name = backend.get_text(item, Property::ConstraintName).ok().or_else(|| {
        type_code
            .as_ref()
            .ok()
            .and_then(|code| registry.name_of(ConstraintCode(*code)))
            .map(str::to_string)
    });

    let (name, type_code) = match (name, type_code) {
        (Some(name), Ok(code)) => (name, code),
        (name, Err(e)) => {
            return ConstraintReading {
                name: name.unwrap_or_default(),
                type_code: -1,
                state: Reading::unavailable(e.to_string()),
            }
        }
        (None, Ok(code)) => {
            return ConstraintReading {
                name: String::new(),
                type_code: code,
                state: Reading::unavailable("constraint name is unreadable"),
            }
        }
    };

    let state = if type_code == codes::LINE_OF_SIGHT {
        Reading::Value(ConstraintState::LineOfSight)
    } else if let Some(minmax) = backend.query_interface(item, InterfaceId::ConstraintMinMax) {
        Reading::from(read_bounds(backend, &minmax))
    } else if registry.form_of_code(ConstraintCode(type_code)) == Some(ConstraintForm::Boolean) {
        Reading::Value(ConstraintState::Presence)
    } else {
        Reading::Value(ConstraintState::Opaque)
    };

    ConstraintReading {
        name,
        type_code,
        state,
    }
}

fn read_bounds(backend: &dyn SceneBackend, node: &NodeRef) -> Result<ConstraintState, BackendError> {
    let min = if backend.get_bool(node, Property::EnableMin)? {
        Some(backend.get_real(node, Property::Min)?)
    } else {
        None
    };
    let max = if backend.get_bool(node, Property::EnableMax)? {
        Some(backend.get_real(node, Property::Max)?)
    } else {
        None
    };
    Ok(ConstraintState::Bounds { min, max })
}
