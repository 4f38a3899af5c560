//! # Adapters Layer
//!
//! Ready-made backends for the runtime and for tests.

mod simulated;

pub use simulated::{simulated_context, simulated_scene};
