//! # Typed Views
//!
//! Thin editors and readers over backend facets, shared by component
//! creation and by the modifier.

pub mod constraints;
pub mod orbit;
pub mod position;

pub use constraints::{read_constraints, ConstraintApplier, ConstraintOutcome, ConstraintReport};
pub use orbit::{read_propagator, OrbitEditor};
pub use position::{assign_position, query_position, read_position};
