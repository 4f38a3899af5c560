//! # Domain Layer
//!
//! The component entity and the context it runs against.

mod component;
mod context;

pub use component::{Component, LiveBinding};
pub use context::SceneContext;
