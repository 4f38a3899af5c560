//! # Domain Layer
//!
//! Patch model and dotted-path sugar.

pub mod patch;

pub use patch::{ComponentPatch, PropagatorPatch, PropagatorSettings};
