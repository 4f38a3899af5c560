//! # SK-03 Component Factory
//!
//! Creates live components from declarative records and documents.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): [`ComponentRegistry`] (type tags and
//!   variants), [`FactoryConfig`] and [`ConflictPolicy`]
//! - **Service Layer** (`service/`): [`ComponentFactory`], batch reports
//!
//! ## Accepted Type Tags
//!
//! | Tag | Kind |
//! |-----|------|
//! | `Satellite`, `satellite` | Satellite |
//! | `Facility`, `facility`, `GroundStation`, `ground_station` | Facility |
//!
//! ## Record Flow
//!
//! ```text
//! record ──→ resolve tag ──→ require name ──→ validate ──→ conflict check
//!                                                              │
//!              tracked ←── configure ←── bind ←── allocate ←───┘
//! ```
//!
//! Invalid records never allocate a backend object. Batches continue past
//! failures and report them by index.
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use sk_01_constraint_registry::ConstraintRegistry;
//! use sk_02_components::simulated_context;
//! use sk_03_component_factory::{ComponentFactory, ComponentRegistry};
//!
//! let (context, scene) = simulated_context(ConstraintRegistry::builtin());
//! let mut factory = ComponentFactory::new(context, Arc::new(ComponentRegistry::builtin()));
//! let report = factory
//!     .create_from_json_str(r#"{"components": [{"type": "GroundStation", "name": "Kashi"}]}"#)
//!     .unwrap();
//! assert_eq!(report.created, vec!["Kashi".to_string()]);
//! assert_eq!(scene.len(), 1);
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{ComponentRegistry, ConflictPolicy, FactoryConfig};
pub use error::FactoryError;
pub use service::{BatchFailure, BatchReport, ComponentFactory};
