#![cfg_attr(docsrs, feature(doc_cfg))]
//! # path-topology
//!
//! path-topology locates features on a network of linear paths ("dynamic
//! segmentation") and exchanges them with clients as JSON. A topology is
//! an ordered list of path aggregations: each one references a path and a
//! `[start, end]` fraction of its length. A topology is either a point
//! (a single marker) or a line (chains of segments, possibly split by
//! waypoint markers).
//!
//! ## Features
//! - Strongly typed data model: [`Topology`], [`PathAggregation`], [`PathId`], [`TopologyId`]
//! - [`TopologyCodec`]: JSON wire format ⇄ stored topologies, with rollback of
//!   half-built topologies on failure
//! - Linear-referencing geometry on top of `geo` (projection, sub-lines, offsets)
//! - Pluggable path network ([`PathDirectory`]) and store ([`TopologyStore`]),
//!   with in-memory implementations
//! - Raw-geometry mode accepting WKT/EWKT when linear referencing is disabled
//!
//! ## Usage
//!
//! ```rust
//! use geo_types::LineString;
//! use path_topology::prelude::*;
//!
//! let network = InMemoryPathNetwork::try_from_lines([
//!     (PathId::new(1), LineString::from(vec![(0.0, 0.0), (100.0, 0.0)])),
//! ])?;
//! let store = InMemoryTopologyStore::new(&network);
//! let config = TopologyConfig::default().with_srids(3857, 3857);
//! let codec = TopologyCodec::new(&network, &store, config);
//!
//! let topology = codec.deserialize(r#"[{"paths": [1], "positions": {"0": [0.25, 0.75]}}]"#)?;
//! assert_eq!(topology.aggregations.len(), 1);
//! let json = codec.serialize(&topology, false)?;
//! assert!(json.contains(r#""paths":[1]"#));
//! # Ok::<(), path_topology::TopologyError>(())
//! ```
//!
//! ## Invariant checking
//! Structural invariants (contiguous orders, positions within `[0, 1]`) are
//! asserted in debug builds, or in release builds with the
//! `strict-invariants` / `check-invariants` features.

pub mod codec;
pub mod config;
pub mod debug_invariants;
pub mod geometry;
pub mod network;
pub mod store;
pub mod topology;
pub mod topology_error;

pub use codec::TopologyCodec;
pub use config::TopologyConfig;
pub use debug_invariants::DebugInvariants;
pub use network::{InMemoryPathNetwork, PathDirectory};
pub use store::{InMemoryTopologyStore, TopologyStore};
pub use topology::{PathAggregation, PathId, Topology, TopologyId};
pub use topology_error::{InvalidTopologyReason, TopologyError};

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::codec::{TopologyCodec, WireInput, WirePoint, WireSubtopology};
    pub use crate::config::TopologyConfig;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{CoordinateTransform, Projection, SridTransform};
    pub use crate::network::{InMemoryPathNetwork, PathDirectory};
    pub use crate::store::{InMemoryTopologyStore, TopologyStore};
    pub use crate::topology::{
        Path, PathAggregation, PathId, TEMPORARY_KIND, Topology, TopologyId, TopologyShape,
        Traversal,
    };
    pub use crate::topology_error::{InvalidTopologyReason, TopologyError};
}
