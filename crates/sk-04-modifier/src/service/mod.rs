//! Modifier service.

mod modifier;

pub use modifier::{ComponentModifier, PatchReport};
