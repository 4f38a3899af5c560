//! Factory configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when a record names an object that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Fail the record.
    #[default]
    Fail,
    /// Delete the existing object, then create.
    Replace,
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(ConflictPolicy::Fail),
            "replace" => Ok(ConflictPolicy::Replace),
            other => Err(format!("unknown conflict policy '{other}', expected fail or replace")),
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictPolicy::Fail => "fail",
            ConflictPolicy::Replace => "replace",
        })
    }
}

/// Factory settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Name-collision policy.
    pub on_conflict: ConflictPolicy,
}

impl FactoryConfig {
    /// Settings that replace colliding objects.
    pub fn replacing() -> Self {
        Self {
            on_conflict: ConflictPolicy::Replace,
        }
    }
}
