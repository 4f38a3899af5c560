//! # Component Factory
//!
//! Turns declarative records into live components, singly or in batches,
//! and remembers everything it created for bulk cleanup.

use crate::domain::{ComponentRegistry, ConflictPolicy, FactoryConfig};
use crate::error::FactoryError;
use serde::Serialize;
use serde_json::Value;
use shared_types::{ComponentKind, ComponentRecord};
use sk_02_components::{Component, ComponentError, SceneContext};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One record that could not be turned into a component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    /// Position in the input.
    pub index: usize,
    /// Record name, when it had one.
    pub name: Option<String>,
    /// Failure message.
    pub error: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Names of created components, in input order.
    pub created: Vec<String>,
    /// Records that failed, in input order.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// True when every record was created.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, index: usize, name: Option<String>, error: &FactoryError) {
        warn!(
            "[sk-03] Record {} ({}) failed: {}",
            index,
            name.as_deref().unwrap_or("<unnamed>"),
            error
        );
        self.failures.push(BatchFailure {
            index,
            name,
            error: error.to_string(),
        });
    }
}

/// Declarative component factory.
pub struct ComponentFactory {
    context: SceneContext,
    registry: Arc<ComponentRegistry>,
    config: FactoryConfig,
    created: Vec<Component>,
}

impl ComponentFactory {
    /// Factory with default settings.
    pub fn new(context: SceneContext, registry: Arc<ComponentRegistry>) -> Self {
        Self {
            context,
            registry,
            config: FactoryConfig::default(),
            created: Vec::new(),
        }
    }

    /// Replace the settings.
    pub fn with_config(mut self, config: FactoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Scene context.
    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    /// Type registry.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Current settings.
    pub fn config(&self) -> FactoryConfig {
        self.config
    }

    /// Create one component.
    ///
    /// A component that got bound before failing is still tracked, so
    /// [`delete_all_created`](Self::delete_all_created) cleans it up.
    pub fn create(&mut self, record: &ComponentRecord) -> Result<&Component, FactoryError> {
        let tag = record.require_kind()?;
        let kind = self.registry.resolve(tag)?;
        let name = record.require_name()?.to_string();
        let variant = self.registry.variant(kind)?;
        variant
            .validate(record)
            .map_err(|e| ComponentError::Creation {
                kind,
                name: name.clone(),
                reason: e.to_string(),
            })?;

        self.resolve_conflict(kind, &name)?;

        let mut component = Component::with_variant(self.context.clone(), variant, name);
        match component.create(record) {
            Ok(report) => {
                for skipped in report.skipped() {
                    debug!("[sk-03] '{}' skipped constraint {}", component.name(), skipped);
                }
                let index = self.created.len();
                self.created.push(component);
                Ok(&self.created[index])
            }
            Err(e) => {
                if component.is_bound() {
                    self.created.push(component);
                }
                Err(e.into())
            }
        }
    }

    fn resolve_conflict(&mut self, kind: ComponentKind, name: &str) -> Result<(), FactoryError> {
        if !Component::exists(&self.context, kind, name) {
            return Ok(());
        }
        match self.config.on_conflict {
            ConflictPolicy::Fail => Err(ComponentError::Creation {
                kind,
                name: name.to_string(),
                reason: "an object with this name already exists".to_string(),
            }
            .into()),
            ConflictPolicy::Replace => {
                Component::delete_by_name(&self.context, kind, name)?;
                self.created
                    .retain(|c| !(c.kind() == kind && c.name() == name));
                info!("[sk-03] Replaced existing {} '{}'", kind, name);
                Ok(())
            }
        }
    }

    /// Create every record in order; failures do not stop the batch.
    pub fn create_many(&mut self, records: &[ComponentRecord]) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, record) in records.iter().enumerate() {
            match self.create(record) {
                Ok(component) => report.created.push(component.name().to_string()),
                Err(e) => report.fail(index, record.name.clone(), &e),
            }
        }
        info!(
            "[sk-03] Batch done: {} created, {} failed",
            report.created.len(),
            report.failures.len()
        );
        report
    }

    /// Create from a `{"components": [...]}` document.
    ///
    /// Each record is parsed on its own, so one malformed record is reported
    /// without aborting the rest.
    pub fn create_from_json_str(&mut self, json: &str) -> Result<BatchReport, FactoryError> {
        let document: Value =
            serde_json::from_str(json).map_err(|e| FactoryError::MalformedDocument(e.to_string()))?;
        let items = components_of(document)?;
        Ok(self.create_from_values(items))
    }

    /// Create from a document file. A file without components is an error.
    pub fn create_from_json_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<BatchReport, FactoryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FactoryError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let document: Value = serde_json::from_str(&text)
            .map_err(|e| FactoryError::MalformedDocument(format!("{}: {e}", path.display())))?;
        let items = components_of(document)?;
        if items.is_empty() {
            return Err(FactoryError::MalformedDocument(format!(
                "{}: no components",
                path.display()
            )));
        }
        info!("[sk-03] Loading {} records from {}", items.len(), path.display());
        Ok(self.create_from_values(items))
    }

    fn create_from_values(&mut self, items: Vec<Value>) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, item) in items.into_iter().enumerate() {
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string);
            let record: ComponentRecord = match serde_json::from_value(item) {
                Ok(record) => record,
                Err(e) => {
                    let error = FactoryError::MalformedRecord {
                        index,
                        reason: e.to_string(),
                    };
                    report.fail(index, name, &error);
                    continue;
                }
            };
            match self.create(&record) {
                Ok(component) => report.created.push(component.name().to_string()),
                Err(e) => report.fail(index, name, &e),
            }
        }
        report
    }

    /// Components created so far, in creation order.
    pub fn created_components(&self) -> &[Component] {
        &self.created
    }

    /// Forget tracked components without deleting them.
    pub fn clear_created(&mut self) {
        self.created.clear();
    }

    /// Delete every tracked component, ignoring individual failures.
    ///
    /// Returns the number deleted.
    pub fn delete_all_created(&mut self) -> usize {
        let mut deleted = 0;
        for mut component in self.created.drain(..) {
            match component.delete() {
                Ok(()) => deleted += 1,
                Err(e) => warn!("[sk-03] Failed to delete '{}': {}", component.name(), e),
            }
        }
        deleted
    }

    /// Every accepted `type` tag.
    pub fn supported_types(&self) -> Vec<String> {
        self.registry.supported_types()
    }
}

fn components_of(document: Value) -> Result<Vec<Value>, FactoryError> {
    match document {
        Value::Object(mut map) => match map.remove("components") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(FactoryError::MalformedDocument(
                "'components' must be an array".to_string(),
            )),
        },
        _ => Err(FactoryError::MalformedDocument(
            "document must be a JSON object".to_string(),
        )),
    }
}
