//! # Component Type Registry
//!
//! Maps declarative `type` tags to kinds and kinds to variants.

use crate::error::FactoryError;
use shared_types::ComponentKind;
use sk_02_components::{variant_for, ComponentVariant};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Tag synonyms accepted out of the box.
const BUILTIN_ALIASES: &[(&str, ComponentKind)] = &[
    ("Satellite", ComponentKind::Satellite),
    ("satellite", ComponentKind::Satellite),
    ("Facility", ComponentKind::Facility),
    ("facility", ComponentKind::Facility),
    ("GroundStation", ComponentKind::Facility),
    ("ground_station", ComponentKind::Facility),
];

/// Tag and variant registry. Built once, then shared.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    aliases: BTreeMap<String, ComponentKind>,
    variants: HashMap<ComponentKind, Arc<dyn ComponentVariant>>,
}

impl ComponentRegistry {
    /// Registry with no tags and no variants.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in tags and variants.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for kind in ComponentKind::ALL {
            registry.register_variant(variant_for(kind));
        }
        for (alias, kind) in BUILTIN_ALIASES {
            registry.aliases.insert((*alias).to_string(), *kind);
        }
        registry
    }

    /// Bind a tag to a kind. Rebinding the same tag to the same kind is a no-op.
    pub fn register_alias(&mut self, alias: &str, kind: ComponentKind) -> Result<(), FactoryError> {
        match self.aliases.get(alias) {
            Some(existing) if *existing == kind => Ok(()),
            Some(existing) => Err(FactoryError::AliasConflict {
                alias: alias.to_string(),
                existing: *existing,
            }),
            None => {
                self.aliases.insert(alias.to_string(), kind);
                debug!("[sk-03] Registered type alias {} -> {}", alias, kind);
                Ok(())
            }
        }
    }

    /// Install or replace the variant for its kind.
    pub fn register_variant(&mut self, variant: Arc<dyn ComponentVariant>) {
        self.variants.insert(variant.kind(), variant);
    }

    /// Kind for a tag.
    pub fn resolve(&self, tag: &str) -> Result<ComponentKind, FactoryError> {
        self.aliases
            .get(tag)
            .copied()
            .ok_or_else(|| FactoryError::UnknownComponentType(tag.to_string()))
    }

    /// Variant for a kind.
    pub fn variant(&self, kind: ComponentKind) -> Result<Arc<dyn ComponentVariant>, FactoryError> {
        self.variants
            .get(&kind)
            .cloned()
            .ok_or(FactoryError::KindNotImplemented(kind))
    }

    /// Kind for a backend class name, if it has a variant.
    pub fn kind_for_class(&self, class_name: &str) -> Option<ComponentKind> {
        ComponentKind::from_class_name(class_name).filter(|kind| self.variants.contains_key(kind))
    }

    /// Every accepted tag, sorted.
    pub fn supported_types(&self) -> Vec<String> {
        self.aliases.keys().cloned().collect()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("aliases", &self.aliases)
            .field("variants", &self.variants.keys().collect::<Vec<_>>())
            .finish()
    }
}
