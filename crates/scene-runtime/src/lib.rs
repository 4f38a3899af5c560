//! # Scene Runtime Library
//!
//! Exposes the runtime's modules for testing. The entry point is the
//! `main.rs` binary.
//!
//! ## Modules
//!
//! - `container/` - configuration and shared services
//! - `pipeline/` - load, export, verify

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod container;
pub mod error;
pub mod pipeline;

pub use container::{ConfigError, ExportConfig, RuntimeConfig, SceneContainer};
pub use error::RuntimeError;
pub use pipeline::{RunSummary, SceneRuntime, VerifyReport};
