//! Top-level module for the linear-referencing data model.
//!
//! This module provides:
//! - Identifier newtypes for paths and topologies
//! - `Path`, the network segment a topology refers to
//! - `PathAggregation`, one (path, start, end, order) reference
//! - `Topology`, the located feature owning its aggregations
//! - Subtopology folding used by the wire format

pub mod aggregation;
pub mod ids;
pub mod model;
pub mod path;
pub mod subtopology;

pub use aggregation::{PathAggregation, Traversal};
pub use ids::{PathId, TopologyId};
pub use model::{TEMPORARY_KIND, Topology, TopologyShape};
pub use path::Path;
pub use subtopology::{Subtopology, split_subtopologies};
