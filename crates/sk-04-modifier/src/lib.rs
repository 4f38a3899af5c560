//! # SK-04 Modifier
//!
//! Applies partial declarative patches to components that already exist,
//! without recreating them.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): [`ComponentPatch`], dotted-path decoding
//! - **Service Layer** (`service/`): [`ComponentModifier`]
//!
//! ## Patch Fields
//!
//! | Field | Satellite | Facility |
//! |-------|-----------|----------|
//! | `orbit` | ✓ (J2Perturbation, TwoBody) | ✗ |
//! | `propagator` / `step` | ✓ | ✗ |
//! | `position` | ✗ | ✓ (merged over current) |
//! | `constraints` | ✓ | ✓ |
//!
//! Unlike creation, absent fields get no defaults. A constraint with
//! `disable_min` or `disable_max` and no value turns that bound off.
//!
//! ## Usage Example
//!
//! ```
//! use serde_json::json;
//! use shared_types::ComponentRecord;
//! use sk_01_constraint_registry::ConstraintRegistry;
//! use sk_02_components::{simulated_context, Component};
//! use sk_04_modifier::ComponentModifier;
//!
//! let (context, scene) = simulated_context(ConstraintRegistry::builtin());
//! Component::satellite(context.clone(), "Sat1")
//!     .create(&ComponentRecord::satellite("Sat1"))
//!     .unwrap();
//!
//! let mut modifier = ComponentModifier::satellite(context);
//! modifier.load("Sat1").unwrap();
//! modifier.set("orbit.inclination", json!(98.5)).unwrap();
//! assert_eq!(scene.satellite("Sat1").unwrap().elements.inclination, 98.5);
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{ComponentPatch, PropagatorPatch, PropagatorSettings};
pub use error::ModifyError;
pub use service::{ComponentModifier, PatchReport};
