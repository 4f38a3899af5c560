//! # Domain Layer
//!
//! Normalization, export settings, the manifest and round-trip comparison.

pub mod equivalence;
pub mod manifest;
pub mod normalize;

pub use equivalence::{drift, equivalent, FieldDrift};
pub use manifest::{ExportFailure, ExportManifest, ExportOptions};
pub use normalize::normalize;
