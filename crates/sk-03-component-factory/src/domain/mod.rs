//! # Domain Layer
//!
//! Type registry and factory settings.

mod config;
mod type_registry;

pub use config::{ConflictPolicy, FactoryConfig};
pub use type_registry::ComponentRegistry;
