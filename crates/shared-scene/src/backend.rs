//! # Backend Port
//!
//! The object-model surface the engine drives. Every call is blocking.

use crate::domain::{InterfaceId, Member, Method, NodeRef, ObjectHandle, ObjectPath, Property, Value};
use thiserror::Error;

/// Errors reported by a scene backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// No object at the given path.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// An object with this class and name already exists.
    #[error("Duplicate object name: {0}")]
    DuplicateName(String),

    /// The backend refused to allocate the object.
    #[error("Allocation failed for {name}: {reason}")]
    AllocationFailed { name: String, reason: String },

    /// The handle no longer refers to a live object.
    #[error("Stale handle: {0}")]
    StaleHandle(ObjectHandle),

    /// The facet does not expose the property or the method.
    #[error("Not supported on {facet}: {member}")]
    NotSupported { facet: String, member: String },

    /// The value was rejected.
    #[error("Invalid value for {property}: {reason}")]
    InvalidValue { property: Property, reason: String },

    /// The value had the wrong dynamic type.
    #[error("Type mismatch for {property}: expected {expected}")]
    TypeMismatch {
        property: Property,
        expected: &'static str,
    },

    /// The operation failed inside the backend.
    #[error("Backend call failed: {0}")]
    CallFailed(String),
}

/// Object-model port of a simulation backend.
///
/// Implementations own the scene; callers hold only handles and node refs.
pub trait SceneBackend: Send + Sync {
    /// Allocate a new object of the given object-type code.
    fn allocate_object(&self, object_code: i32, name: &str) -> Result<ObjectHandle, BackendError>;

    /// Resolve an existing object by path.
    fn resolve_object(&self, path: &ObjectPath) -> Result<ObjectHandle, BackendError>;

    /// Unload an object from the scene.
    fn release_object(&self, handle: ObjectHandle) -> Result<(), BackendError>;

    /// Handles of every top-level object, in creation order.
    fn enumerate_children(&self) -> Result<Vec<ObjectHandle>, BackendError>;

    /// Backend class name of an object.
    fn class_name(&self, handle: ObjectHandle) -> Result<String, BackendError>;

    /// Instance name of an object.
    fn instance_name(&self, handle: ObjectHandle) -> Result<String, BackendError>;

    /// Typed view of a facet; `None` when the capability is absent.
    fn query_interface(&self, node: &NodeRef, interface: InterfaceId) -> Option<NodeRef>;

    /// Named child of a facet.
    fn child(&self, node: &NodeRef, member: Member) -> Result<NodeRef, BackendError>;

    /// Read a property.
    fn get(&self, node: &NodeRef, property: Property) -> Result<Value, BackendError>;

    /// Write a property.
    fn set(&self, node: &NodeRef, property: Property, value: Value) -> Result<(), BackendError>;

    /// Invoke a method; returns the produced node, if any.
    fn invoke(&self, node: &NodeRef, method: Method) -> Result<Option<NodeRef>, BackendError>;
}

/// Typed read helpers over [`SceneBackend::get`].
pub trait SceneBackendExt: SceneBackend {
    /// Read a real-valued property.
    fn get_real(&self, node: &NodeRef, property: Property) -> Result<f64, BackendError> {
        self.get(node, property)?
            .as_real()
            .ok_or(BackendError::TypeMismatch {
                property,
                expected: "real",
            })
    }

    /// Read an integer property.
    fn get_int(&self, node: &NodeRef, property: Property) -> Result<i32, BackendError> {
        self.get(node, property)?
            .as_int()
            .ok_or(BackendError::TypeMismatch {
                property,
                expected: "int",
            })
    }

    /// Read a boolean property.
    fn get_bool(&self, node: &NodeRef, property: Property) -> Result<bool, BackendError> {
        self.get(node, property)?
            .as_bool()
            .ok_or(BackendError::TypeMismatch {
                property,
                expected: "bool",
            })
    }

    /// Read a text property.
    fn get_text(&self, node: &NodeRef, property: Property) -> Result<String, BackendError> {
        match self.get(node, property)? {
            Value::Text(text) => Ok(text),
            _ => Err(BackendError::TypeMismatch {
                property,
                expected: "text",
            }),
        }
    }
}

impl<T: SceneBackend + ?Sized> SceneBackendExt for T {}
