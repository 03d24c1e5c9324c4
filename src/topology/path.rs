//! Path segments of the network.

use geo_types::{LineString, Point};

use crate::geometry::linear::{self, Projection};
use crate::topology::ids::PathId;
use crate::topology_error::TopologyError;

/// A linear segment of the network, owned by the network and immutable
/// from the codec's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub id: PathId,
    pub geom: LineString<f64>,
}

impl Path {
    /// Builds a path, rejecting geometries without a positive length.
    pub fn try_new(id: PathId, geom: LineString<f64>) -> Result<Self, TopologyError> {
        if linear::line_length(&geom) <= 0.0 {
            return Err(TopologyError::InvalidGeometry(format!(
                "path {id} has a zero-length geometry"
            )));
        }
        Ok(Self { id, geom })
    }

    /// Euclidean length of the path geometry.
    pub fn length(&self) -> f64 {
        linear::line_length(&self.geom)
    }

    /// Projects `point` onto this path.
    pub fn project(&self, point: Point<f64>) -> Result<Projection, TopologyError> {
        linear::project(&self.geom, point)
    }

    /// Point at `position` along this path.
    pub fn point_at(&self, position: f64) -> Result<Point<f64>, TopologyError> {
        linear::point_at(&self.geom, position)
    }
}
