//! Grouping of a topology's aggregations into subtopologies.
//!
//! A subtopology is a maximal run of consecutive non-marker aggregations
//! delimited by markers (or by either end of the sequence). It only
//! exists for the wire format and is never persisted.

use crate::topology::aggregation::PathAggregation;
use crate::topology::ids::PathId;

/// One run of path segments between two markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subtopology {
    /// Path of each segment, in traversal order.
    pub paths: Vec<PathId>,
    /// `(start, end)` of each segment, indexed like `paths`.
    pub positions: Vec<(f64, f64)>,
}

impl Subtopology {
    fn push(&mut self, aggr: &PathAggregation) {
        self.paths.push(aggr.path);
        self.positions.push((aggr.start_position, aggr.end_position));
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

/// Folds ordered aggregations into subtopologies.
///
/// A run is closed when a marker is reached or when the last aggregation
/// has been consumed, provided it recorded at least one segment. Markers
/// themselves never appear in the output.
pub fn split_subtopologies(aggregations: &[PathAggregation]) -> Vec<Subtopology> {
    let last = aggregations.len().saturating_sub(1);
    let mut out = Vec::new();
    let mut current = Subtopology::default();
    for (i, aggr) in aggregations.iter().enumerate() {
        let marker = aggr.is_marker();
        if !marker {
            current.push(aggr);
        }
        if (marker || i == last) && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    out
}
