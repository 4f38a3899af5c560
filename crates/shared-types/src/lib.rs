//! # Shared Types Crate
//!
//! This crate contains the declarative record model exchanged between the
//! factory, the modifier and the exporter, plus the tagged readings produced
//! by `describe()`.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the document shape is defined once, here.
//! - **Absent means untouched**: every type-specific field is optional so the
//!   same structs serve full records and partial patches.
//! - **Tagged reads**: a value that could not be read off a live object is a
//!   [`Reading::Unavailable`], never a silently missing field.

pub mod angles;
pub mod description;
pub mod entities;
pub mod errors;

pub use angles::{longitude_equivalent, normalize_longitude, relative_eq};
pub use description::*;
pub use entities::*;
pub use errors::*;
