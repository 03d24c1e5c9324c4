//! `PathAggregation`: one reference from a topology to a path segment.

use serde::{Deserialize, Serialize};

use crate::topology::ids::PathId;

/// Direction in which an aggregation traverses its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// `start_position < end_position`.
    Forward,
    /// `start_position > end_position`.
    Reverse,
    /// `start_position == end_position`: a zero-length waypoint.
    Marker,
}

/// A (path, start, end) reference with its rank inside the owning topology.
///
/// Aggregations are created in bulk and never mutated afterwards; editing
/// a topology replaces all of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathAggregation {
    pub path: PathId,
    pub start_position: f64,
    pub end_position: f64,
    pub order: u32,
}

impl PathAggregation {
    pub fn new(path: PathId, start_position: f64, end_position: f64, order: u32) -> Self {
        Self {
            path,
            start_position,
            end_position,
            order,
        }
    }

    /// Zero-length waypoint at `position`.
    pub fn marker(path: PathId, position: f64, order: u32) -> Self {
        Self::new(path, position, position, order)
    }

    #[inline]
    pub fn is_marker(&self) -> bool {
        self.start_position == self.end_position
    }

    pub fn traversal(&self) -> Traversal {
        if self.start_position < self.end_position {
            Traversal::Forward
        } else if self.start_position > self.end_position {
            Traversal::Reverse
        } else {
            Traversal::Marker
        }
    }

    /// `(path, start, end)` without the order.
    pub fn triple(&self) -> (PathId, f64, f64) {
        (self.path, self.start_position, self.end_position)
    }
}
