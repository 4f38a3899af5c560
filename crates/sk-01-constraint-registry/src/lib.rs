//! # SK-01 Constraint Registry
//!
//! Static mapping between access-constraint names and the backend's numeric
//! constraint type codes.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the built-in table and
//!   [`ConstraintRegistry`].
//! - No dependency on the backend or on any other engine crate.
//!
//! ## Invariants
//!
//! - Every creatable constraint name resolves to exactly one code, and every
//!   code to exactly one name.
//! - The table is append-only: `register()` never rebinds an existing name
//!   or code.
//! - `LineOfSight` (code 26) is always present on live objects and is never
//!   exported.
//!
//! ## Constraint Forms
//!
//! | Form | Examples | Export rule |
//! |------|----------|-------------|
//! | `MinMax` | `ElevationAngle`, `Range` | kept when a bound is enabled |
//! | `Boolean` | `LineOfSight`, `TerrainMask` | never exported, no bound to replay |
//! | `Structured` | `Lighting`, `Intervals` | never exported |
//!
//! ## Usage Example
//!
//! ```
//! use sk_01_constraint_registry::{ConstraintCode, ConstraintRegistry};
//!
//! let registry = ConstraintRegistry::builtin();
//! assert_eq!(registry.type_code_of("ElevationAngle"), Some(ConstraintCode(14)));
//! ```

pub mod domain;
pub mod error;

pub use domain::{
    ConstraintCode, ConstraintDefinition, ConstraintForm, ConstraintRegistry, LINE_OF_SIGHT,
};
pub use error::RegistryError;
