//! Cached geometry of a topology, derived from its aggregations.

use geo_types::Geometry;

use crate::geometry::linear::{join_lines, offset_line, offset_point, sub_line};
use crate::network::PathDirectory;
use crate::topology::aggregation::PathAggregation;
use crate::topology_error::TopologyError;

/// Geometry (network coordinates) described by ordered `aggregations`.
///
/// - no aggregation: `None`
/// - a single marker: the point at its position, shifted by `offset`
/// - otherwise: the sub-lines of the non-marker aggregations joined in
///   order, shifted by `offset`
pub fn derive_geometry<D>(
    directory: &D,
    aggregations: &[PathAggregation],
    offset: f64,
) -> Result<Option<Geometry<f64>>, TopologyError>
where
    D: PathDirectory + ?Sized,
{
    let Some(first) = aggregations.first() else {
        return Ok(None);
    };

    let parts = aggregations.iter().filter(|a| !a.is_marker()).map(|a| {
        let path = directory.get(a.path)?;
        sub_line(&path.geom, a.start_position, a.end_position)
    });
    let line = itertools::process_results(parts, |lines| join_lines(lines))?;

    if line.0.is_empty() {
        let path = directory.get(first.path)?;
        let point = offset_point(&path.geom, first.start_position, offset)?;
        return Ok(Some(point.into()));
    }
    Ok(Some(offset_line(&line, offset).into()))
}
