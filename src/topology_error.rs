//! TopologyError: Unified error type for path-topology public APIs
//!
//! Every fallible operation in the crate (codec, store, network, geometry)
//! returns this error so callers can match on a single enum.

use thiserror::Error;

use crate::topology::ids::{PathId, TopologyId};

/// Unified error type for path-topology operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    /// No topology is stored under this identifier.
    #[error("topology {0} not found")]
    TopologyNotFound(TopologyId),
    /// No path of the network carries this identifier.
    #[error("path {0} not found")]
    PathNotFound(PathId),
    /// Nearest-path projection was requested on a network without paths.
    #[error("no path available to project onto")]
    NoNearbyPath,
    /// The client payload could not be turned into a topology.
    #[error("invalid serialized topology: {0}")]
    InvalidTopology(#[from] InvalidTopologyReason),
    /// The coordinate transform collaborator rejected the conversion.
    #[error("cannot transform coordinates from SRID {from} to SRID {to}: {reason}")]
    CoordinateTransform {
        from: u32,
        to: u32,
        reason: String,
    },
    /// A geometry literal or a path geometry is unusable.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A stored topology violates a structural invariant.
    #[error("topology invariant violated: {0}")]
    BrokenInvariant(String),
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
    /// Failure reported by a topology store backend.
    #[error("store error: {0}")]
    Store(String),
}

impl TopologyError {
    /// True for the "identifier does not resolve" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TopologyError::TopologyNotFound(_)
                | TopologyError::PathNotFound(_)
                | TopologyError::NoNearbyPath
        )
    }

    /// True when the error is an [`TopologyError::InvalidTopology`].
    pub fn is_invalid_topology(&self) -> bool {
        matches!(self, TopologyError::InvalidTopology(_))
    }
}

/// Why a serialized topology was rejected.
///
/// Carries enough context (subtopology index, path id, raw positions) to
/// debug the offending client payload.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidTopologyReason {
    /// The payload was an empty list (or an empty object).
    #[error("empty list found")]
    EmptyList,
    /// The payload does not have the expected JSON shape.
    #[error("{0}")]
    Malformed(String),
    /// A subtopology has no `paths` member.
    #[error("subtopology {subtopology}: missing `paths`")]
    MissingPaths { subtopology: usize },
    /// A subtopology references a path the network does not know.
    #[error("subtopology {subtopology}, path #{index}: path {path} not found")]
    UnknownPath {
        subtopology: usize,
        index: usize,
        path: PathId,
    },
    /// A position lies outside `[0.0, 1.0]` (or is not a number).
    #[error("subtopology {subtopology}, path #{index}: position {position} outside [0, 1]")]
    PositionOutOfRange {
        subtopology: usize,
        index: usize,
        position: f64,
    },
    /// The subtopologies reference no path segment at all (no path, or
    /// only zero-length waypoints).
    #[error("no path segment in {subtopologies} subtopologies")]
    NoSegment { subtopologies: usize },
    /// The marker resolver found no rule for this pair of positions.
    #[error("cannot collapse ({start}, {end}) into a single waypoint position")]
    UncollapsibleMarker { start: f64, end: f64 },
    /// A nested reason, located within the payload.
    #[error("subtopology {subtopology}, path {path}: {cause}")]
    InSubtopology {
        subtopology: usize,
        path: PathId,
        cause: Box<InvalidTopologyReason>,
    },
}

impl InvalidTopologyReason {
    /// Attach subtopology index and path id to this reason.
    pub fn located(self, subtopology: usize, path: PathId) -> Self {
        InvalidTopologyReason::InSubtopology {
            subtopology,
            path,
            cause: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for InvalidTopologyReason {
    fn from(err: serde_json::Error) -> Self {
        InvalidTopologyReason::Malformed(format!("invalid serialization: {err}"))
    }
}

impl From<serde_json::Error> for TopologyError {
    fn from(err: serde_json::Error) -> Self {
        TopologyError::InvalidTopology(err.into())
    }
}
