//! Topology codec: JSON wire format ⇄ stored topologies.
//!
//! [`TopologyCodec`] ties together the three collaborators the wire
//! format needs:
//! - a [`PathDirectory`] to resolve and project onto paths
//! - a [`TopologyStore`] to create and persist decoded topologies
//! - a [`CoordinateTransform`] between client and network coordinates
//!
//! The codec holds no mutable state; every call is independent and may
//! run concurrently with others on the same instance.
//!
//! [`PathDirectory`]: crate::network::PathDirectory
//! [`TopologyStore`]: crate::store::TopologyStore
//! [`CoordinateTransform`]: crate::geometry::transform::CoordinateTransform

pub mod decode;
pub mod encode;
pub mod marker;
pub mod wire;

use crate::config::TopologyConfig;
use crate::geometry::transform::SridTransform;

pub use marker::{MarkerRule, resolve_marker_position};
pub use wire::{PositionMap, WireInput, WirePoint, WireSubtopology};

/// Encodes and decodes topologies against a path network and a store.
#[derive(Debug, Clone)]
pub struct TopologyCodec<D, S, T = SridTransform> {
    directory: D,
    store: S,
    transform: T,
    config: TopologyConfig,
}

impl<D, S> TopologyCodec<D, S, SridTransform> {
    /// Codec using the built-in [`SridTransform`].
    pub fn new(directory: D, store: S, config: TopologyConfig) -> Self {
        Self::with_transform(directory, store, SridTransform, config)
    }
}

impl<D, S, T> TopologyCodec<D, S, T> {
    pub fn with_transform(directory: D, store: S, transform: T, config: TopologyConfig) -> Self {
        Self {
            directory,
            store,
            transform,
            config,
        }
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }
}
