//! # SK-05 Exporter
//!
//! Converts live scene state back into declarative documents the factory
//! can replay, and checks that the replay would be faithful.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): [`normalize`], [`ExportManifest`],
//!   [`ExportOptions`], round-trip [`drift`]
//! - **Service Layer** (`service/`): [`SceneExporter`]
//!
//! ## Pipeline
//!
//! ```text
//! enumerate ──→ recognized class? ──→ load ──→ describe ──→ normalize ──→ write
//!                     │ no                          │ error
//!                     ▼                             ▼
//!                  skipped                 manifest.failures
//! ```
//!
//! ## Round-Trip Guarantee
//!
//! For a component created from record `R`, the exported record `R'`
//! recreates the same managed attributes: elements and positions within a
//! 1e-9 relative tolerance, longitudes modulo 360 degrees, and the same
//! bounded constraints. LineOfSight is always present on live objects and
//! is never exported.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{
    drift, equivalent, normalize, ExportFailure, ExportManifest, ExportOptions, FieldDrift,
};
pub use error::ExportError;
pub use service::{ExportedComponent, SceneExporter, SceneSnapshot, SUMMARY_FILE};
