//! # Constraint Registry
//!
//! Bidirectional, append-only mapping between constraint names and backend
//! type codes.

use crate::error::RegistryError;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use super::catalog::BUILTIN;

/// Backend access-constraint enumeration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintCode(pub i32);

impl fmt::Display for ConstraintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The always-present line-of-sight constraint.
pub const LINE_OF_SIGHT: ConstraintCode = ConstraintCode(26);

/// Shape of a constraint's configurable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintForm {
    /// Optional minimum and maximum bounds.
    MinMax,
    /// Enabled by presence alone.
    Boolean,
    /// State that is neither a bound pair nor a flag.
    Structured,
}

impl ConstraintForm {
    /// Whether min/max can be applied.
    pub fn supports_bounds(self) -> bool {
        matches!(self, ConstraintForm::MinMax)
    }
}

/// One registered constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDefinition {
    /// Name as reported by the backend.
    pub name: String,
    /// Backend type code.
    pub code: ConstraintCode,
    /// Configurable shape.
    pub form: ConstraintForm,
}

/// Name/code table for access constraints.
///
/// Built once, then shared read-only. `register()` may add names and codes
/// but never rebinds an existing one.
#[derive(Debug, Clone, Default)]
pub struct ConstraintRegistry {
    entries: Vec<ConstraintDefinition>,
    by_name: HashMap<String, usize>,
    by_code: HashMap<ConstraintCode, usize>,
}

impl ConstraintRegistry {
    /// Registry with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with every built-in constraint.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (name, code, form) in BUILTIN {
            registry.insert(name, ConstraintCode(*code), *form);
        }
        registry
    }

    fn insert(&mut self, name: &str, code: ConstraintCode, form: ConstraintForm) {
        let index = self.entries.len();
        self.entries.push(ConstraintDefinition {
            name: name.to_string(),
            code,
            form,
        });
        self.by_name.insert(name.to_string(), index);
        self.by_code.insert(code, index);
    }

    /// Backend type code for a constraint name. Case-sensitive.
    pub fn type_code_of(&self, name: &str) -> Option<ConstraintCode> {
        self.lookup(name).map(|def| def.code)
    }

    /// Name registered for a code.
    pub fn name_of(&self, code: ConstraintCode) -> Option<&str> {
        self.by_code
            .get(&code)
            .map(|index| self.entries[*index].name.as_str())
    }

    /// Form of a named constraint.
    pub fn form_of(&self, name: &str) -> Option<ConstraintForm> {
        self.lookup(name).map(|def| def.form)
    }

    /// Form of a constraint by code.
    pub fn form_of_code(&self, code: ConstraintCode) -> Option<ConstraintForm> {
        self.by_code.get(&code).map(|index| self.entries[*index].form)
    }

    /// Full definition of a named constraint.
    pub fn lookup(&self, name: &str) -> Option<&ConstraintDefinition> {
        self.by_name.get(name).map(|index| &self.entries[*index])
    }

    /// Add a constraint.
    ///
    /// Re-registering an identical name/code pair is a no-op. Returns
    /// `true` when a new entry was added.
    pub fn register(
        &mut self,
        name: &str,
        code: ConstraintCode,
        form: ConstraintForm,
    ) -> Result<bool, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if let Some(existing) = self.lookup(name) {
            if existing.code == code {
                return Ok(false);
            }
            return Err(RegistryError::NameConflict {
                name: name.to_string(),
                existing: existing.code.0,
                requested: code.0,
            });
        }
        if let Some(existing) = self.name_of(code) {
            return Err(RegistryError::CodeInUse {
                code: code.0,
                existing: existing.to_string(),
            });
        }
        self.insert(name, code, form);
        debug!("[sk-01] Registered constraint {} as code {}", name, code);
        Ok(true)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &ConstraintDefinition> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
