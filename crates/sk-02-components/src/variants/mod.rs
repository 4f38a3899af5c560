//! # Variants
//!
//! One [`ComponentVariant`] per managed kind.

mod facility;
mod satellite;

pub use facility::FacilityVariant;
pub use satellite::SatelliteVariant;

use crate::ports::ComponentVariant;
use shared_types::ComponentKind;
use std::sync::Arc;

/// Built-in variant for a kind.
pub fn variant_for(kind: ComponentKind) -> Arc<dyn ComponentVariant> {
    match kind {
        ComponentKind::Satellite => Arc::new(SatelliteVariant),
        ComponentKind::Facility => Arc::new(FacilityVariant),
    }
}
