//! Path network access.
//!
//! The codec never owns paths: it resolves them by identifier and asks
//! the network for the nearest path to a point. [`PathDirectory`] is that
//! seam; [`InMemoryPathNetwork`] is the bundled implementation.

pub mod in_memory;

use std::sync::Arc;

use geo_types::Point;

use crate::geometry::linear::Projection;
use crate::topology::ids::PathId;
use crate::topology::path::Path;
use crate::topology_error::TopologyError;

pub use in_memory::InMemoryPathNetwork;

/// Read access to the path network.
pub trait PathDirectory {
    /// Resolve a path by identifier, failing with [`TopologyError::PathNotFound`].
    fn get(&self, id: PathId) -> Result<Path, TopologyError>;

    /// Project `point` (network coordinates) onto the closest path.
    ///
    /// Fails with [`TopologyError::NoNearbyPath`] when the network is empty.
    fn project_nearest(&self, point: Point<f64>) -> Result<(Path, Projection), TopologyError>;
}

impl<T: PathDirectory + ?Sized> PathDirectory for &T {
    fn get(&self, id: PathId) -> Result<Path, TopologyError> {
        (**self).get(id)
    }

    fn project_nearest(&self, point: Point<f64>) -> Result<(Path, Projection), TopologyError> {
        (**self).project_nearest(point)
    }
}

impl<T: PathDirectory + ?Sized> PathDirectory for Arc<T> {
    fn get(&self, id: PathId) -> Result<Path, TopologyError> {
        (**self).get(id)
    }

    fn project_nearest(&self, point: Point<f64>) -> Result<(Path, Projection), TopologyError> {
        (**self).project_nearest(point)
    }
}
