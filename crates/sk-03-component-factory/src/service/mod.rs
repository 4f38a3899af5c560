//! Factory service.

mod factory;

pub use factory::{BatchFailure, BatchReport, ComponentFactory};
