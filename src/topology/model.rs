//! `Topology`: a feature located on the path network.
//!
//! A topology owns an ordered list of [`PathAggregation`]s. It is either
//! a *point topology* (exactly one marker aggregation) or a *line
//! topology* (one or more aggregations forming ordered chains). A
//! topology without aggregations only exists transiently (right after
//! creation, or in raw-geometry mode) and serializes to an empty string.

use geo_types::Geometry;

use crate::debug_invariants::DebugInvariants;
use crate::topology::aggregation::PathAggregation;
use crate::topology::ids::{PathId, TopologyId};
use crate::topology_error::TopologyError;

/// Kind given to topologies created from client payloads until the
/// owning feature assigns its own.
pub const TEMPORARY_KIND: &str = "TMP";

/// Structural classification of a topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyShape {
    /// No aggregations.
    Empty,
    /// A single marker aggregation.
    Point,
    /// Anything else: one or more chains of path segments.
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub id: TopologyId,
    /// Free-form, caller-supplied tag.
    pub kind: String,
    /// Lateral distance from the referenced path chain.
    pub offset: f64,
    /// Cached geometry in network coordinates, recomputed by the store.
    pub geom: Option<Geometry<f64>>,
    /// Aggregations sorted by `order`.
    pub aggregations: Vec<PathAggregation>,
}

impl Topology {
    pub fn new(id: TopologyId, kind: impl Into<String>, offset: f64) -> Self {
        Self {
            id,
            kind: kind.into(),
            offset,
            geom: None,
            aggregations: Vec::new(),
        }
    }

    pub fn shape(&self) -> TopologyShape {
        match self.aggregations.as_slice() {
            [] => TopologyShape::Empty,
            [single] if single.is_marker() => TopologyShape::Point,
            _ => TopologyShape::Line,
        }
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.shape() == TopologyShape::Point
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.aggregations.is_empty()
    }

    /// Replace the aggregations, keeping them sorted by `order`.
    pub fn set_aggregations(&mut self, mut aggregations: Vec<PathAggregation>) {
        aggregations.sort_by_key(|a| a.order);
        self.aggregations = aggregations;
    }

    /// Ordered `(path, start, end)` triples of the non-marker aggregations.
    pub fn segments(&self) -> impl Iterator<Item = (PathId, f64, f64)> + '_ {
        self.aggregations
            .iter()
            .filter(|a| !a.is_marker())
            .map(PathAggregation::triple)
    }

    /// Marker aggregations, in order.
    pub fn markers(&self) -> impl Iterator<Item = &PathAggregation> + '_ {
        self.aggregations.iter().filter(|a| a.is_marker())
    }
}

impl DebugInvariants for Topology {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Topology invalid");
    }

    fn validate_invariants(&self) -> Result<(), TopologyError> {
        if !self.offset.is_finite() {
            return Err(TopologyError::BrokenInvariant(format!(
                "topology {}: offset {} is not finite",
                self.id, self.offset
            )));
        }

        // 1) orders are exactly 0..n, in sequence
        for (expected, aggr) in self.aggregations.iter().enumerate() {
            if aggr.order as usize != expected {
                return Err(TopologyError::BrokenInvariant(format!(
                    "topology {}: aggregation #{expected} has order {}",
                    self.id, aggr.order
                )));
            }
        }

        // 2) positions inside [0, 1]
        for aggr in &self.aggregations {
            for position in [aggr.start_position, aggr.end_position] {
                if !(0.0..=1.0).contains(&position) {
                    return Err(TopologyError::BrokenInvariant(format!(
                        "topology {}: position {position} on path {} outside [0, 1]",
                        self.id, aggr.path
                    )));
                }
            }
        }

        // 3) markers only chain segments together
        if self.aggregations.len() > 1 && self.aggregations.iter().all(|a| a.is_marker()) {
            return Err(TopologyError::BrokenInvariant(format!(
                "topology {}: {} markers and no segment",
                self.id,
                self.aggregations.len()
            )));
        }
        Ok(())
    }
}
