//! # Shared Scene - Backend Object-Model Port
//!
//! The single boundary between the engine and the simulation backend.
//!
//! ## Architecture Rules
//!
//! - Components never hold backend objects, only [`ObjectHandle`]s and
//!   [`NodeRef`]s resolved through a [`SceneBackend`].
//! - A typed capability is obtained with `query_interface`; `None` means the
//!   capability is absent, never an error.
//! - All calls are blocking and issued one at a time.
//!
//! ```text
//! ┌──────────────┐  allocate / resolve   ┌──────────────┐
//! │  Components  │ ────────────────────▶ │ SceneBackend │
//! │  Modifier    │  query / get / set    │   (port)     │
//! │  Exporter    │ ◀──────────────────── │              │
//! └──────────────┘                       └──────┬───────┘
//!                                               │
//!                                        ┌──────▼───────┐
//!                                        │ InMemoryScene│
//!                                        └──────────────┘
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod backend;
pub mod domain;
pub mod memory;

pub use backend::{BackendError, SceneBackend, SceneBackendExt};
pub use domain::{
    codes, Facet, InterfaceId, Member, Method, NodeRef, ObjectHandle, ObjectPath, Property, Value,
};
pub use memory::{CatalogEntry, ConstraintSnapshot, InMemoryScene, OrbitElements, SatelliteSnapshot};
