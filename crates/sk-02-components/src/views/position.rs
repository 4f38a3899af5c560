//! Geodetic position of a facility.

use shared_scene::{BackendError, Member, Method, NodeRef, Property, SceneBackend, SceneBackendExt};
use shared_types::{GeodeticPosition, Reading};

/// Assign a full geodetic position.
pub fn assign_position(
    backend: &dyn SceneBackend,
    facility: &NodeRef,
    position: GeodeticPosition,
) -> Result<(), BackendError> {
    let node = backend.child(facility, Member::Position)?;
    backend.invoke(
        &node,
        Method::AssignGeodetic {
            latitude: position.latitude,
            longitude: position.longitude,
            altitude: position.altitude,
        },
    )?;
    Ok(())
}

/// Current geodetic position.
pub fn query_position(
    backend: &dyn SceneBackend,
    facility: &NodeRef,
) -> Result<GeodeticPosition, BackendError> {
    let node = backend.child(facility, Member::Position)?;
    Ok(GeodeticPosition {
        latitude: backend.get_real(&node, Property::Latitude)?,
        longitude: backend.get_real(&node, Property::Longitude)?,
        altitude: backend.get_real(&node, Property::Altitude)?,
    })
}

/// Current position as a reading.
pub fn read_position(backend: &dyn SceneBackend, facility: &NodeRef) -> Reading<GeodeticPosition> {
    query_position(backend, facility).into()
}
