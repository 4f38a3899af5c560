//! # Domain Layer
//!
//! The built-in table and the registry built from it.

mod catalog;
pub mod registry;

pub use registry::{
    ConstraintCode, ConstraintDefinition, ConstraintForm, ConstraintRegistry, LINE_OF_SIGHT,
};
