//! # SK-02 Components
//!
//! Polymorphic component model over the scene backend: orbiting bodies
//! (satellites) and ground facilities.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): [`Component`], [`LiveBinding`],
//!   [`SceneContext`]
//! - **Ports Layer** (`ports/`): [`ComponentVariant`], the per-kind seam
//! - **Variants** (`variants/`): [`SatelliteVariant`], [`FacilityVariant`]
//! - **Views** (`views/`): orbit editor, constraint applier, position
//!   helpers, shared with the modifier
//! - **Adapters Layer** (`adapters/`): in-memory scene wiring
//!
//! ## Satellite Configuration Order
//!
//! 1. Select the propagator kind.
//! 2. For J2Perturbation and TwoBody: set the step, convert the initial
//!    state to classical elements, write each element after selecting its
//!    parameterization, assign the state back and re-propagate.
//! 3. Apply constraints.
//!
//! ## Facility Configuration Order
//!
//! 1. Assign the geodetic position.
//! 2. Apply constraints.
//!
//! ## Usage Example
//!
//! ```
//! use shared_types::{ComponentRecord, ConstraintSpec, PositionSpec};
//! use sk_01_constraint_registry::ConstraintRegistry;
//! use sk_02_components::{simulated_context, Component};
//!
//! let (context, _scene) = simulated_context(ConstraintRegistry::builtin());
//! let mut beijing = Component::facility(context, "Beijing");
//! beijing
//!     .create(
//!         &ComponentRecord::facility("Beijing")
//!             .with_position(PositionSpec::new(40.0, 116.0, 0.05))
//!             .with_constraint(ConstraintSpec::named("ElevationAngle").with_min(10.0)),
//!     )
//!     .unwrap();
//! assert!(beijing.is_bound());
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod variants;
pub mod views;

pub use adapters::{simulated_context, simulated_scene};
pub use domain::{Component, LiveBinding, SceneContext};
pub use error::ComponentError;
pub use ports::ComponentVariant;
pub use variants::{variant_for, FacilityVariant, SatelliteVariant};
pub use views::{ConstraintApplier, ConstraintOutcome, ConstraintReport, OrbitEditor};
