//! Stored topology → wire payload.

use geo_types::{Geometry, Point};
use itertools::Itertools;

use crate::codec::TopologyCodec;
use crate::codec::wire::{PositionMap, WirePoint, WireSubtopology};
use crate::geometry::transform::CoordinateTransform;
use crate::network::PathDirectory;
use crate::store::derive::derive_geometry;
use crate::topology::aggregation::PathAggregation;
use crate::topology::model::{Topology, TopologyShape};
use crate::topology::subtopology::split_subtopologies;
use crate::topology_error::TopologyError;

impl<D, S, T> TopologyCodec<D, S, T>
where
    D: PathDirectory,
    T: CoordinateTransform,
{
    /// Encode `topology` into its wire form.
    ///
    /// A topology without aggregations encodes to the empty string. With
    /// `with_pk` set, the topology identifier is included so clients can
    /// hand it back unchanged.
    pub fn serialize(&self, topology: &Topology, with_pk: bool) -> Result<String, TopologyError> {
        match topology.shape() {
            TopologyShape::Empty => Ok(String::new()),
            TopologyShape::Point => {
                let point = self.encode_point(topology, with_pk)?;
                Ok(serde_json::to_string(&point)?)
            }
            TopologyShape::Line => {
                let subtopologies = self.encode_line(topology, with_pk);
                Ok(serde_json::to_string(&subtopologies)?)
            }
        }
    }

    /// Point payload of a point topology, in wire coordinates.
    pub fn encode_point(&self, topology: &Topology, with_pk: bool) -> Result<WirePoint, TopologyError> {
        let Some(marker) = topology.aggregations.first() else {
            return Err(TopologyError::BrokenInvariant(format!(
                "topology {} has no aggregation to encode as a point",
                topology.id
            )));
        };
        let location = self.network_location(topology)?;
        let wire = self.transform.transform_point(
            location,
            self.config.network_srid,
            self.config.wire_srid,
        )?;

        let snapped = self.config.linear_referencing && topology.offset == 0.0;
        Ok(WirePoint {
            kind: Some(topology.kind.clone()),
            lng: wire.x(),
            lat: wire.y(),
            pk: with_pk.then(|| topology.id.get()),
            snap: snapped.then_some(marker.path),
        })
    }

    /// Subtopology list of a line topology.
    pub fn encode_line(&self, topology: &Topology, with_pk: bool) -> Vec<WireSubtopology> {
        let ordered: Vec<PathAggregation> = topology
            .aggregations
            .iter()
            .copied()
            .sorted_by_key(|a| a.order)
            .collect();

        split_subtopologies(&ordered)
            .into_iter()
            .map(|subtopology| WireSubtopology {
                pk: with_pk.then(|| topology.id.get()),
                kind: Some(topology.kind.clone()),
                offset: Some(topology.offset),
                positions: subtopology.positions.iter().copied().collect::<PositionMap>(),
                paths: Some(subtopology.paths),
            })
            .collect()
    }

    /// Cached point geometry, or the one derived from the marker.
    fn network_location(&self, topology: &Topology) -> Result<Point<f64>, TopologyError> {
        let geom = match &topology.geom {
            Some(geom) => Some(geom.clone()),
            None => derive_geometry(&self.directory, &topology.aggregations, topology.offset)?,
        };
        match geom {
            Some(Geometry::Point(point)) => Ok(point),
            other => Err(TopologyError::InvalidGeometry(format!(
                "point topology {} has geometry {other:?}",
                topology.id
            ))),
        }
    }
}
