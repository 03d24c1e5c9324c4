//! Topology persistence.
//!
//! [`TopologyStore`] is the seam between the codec and whatever keeps
//! topologies and their aggregations. [`InMemoryTopologyStore`] is the
//! bundled implementation; [`derive_geometry`] computes the cached
//! geometry a store attaches on `save`.

pub mod derive;
pub mod in_memory;

use std::sync::Arc;

use crate::topology::aggregation::PathAggregation;
use crate::topology::ids::TopologyId;
use crate::topology::model::Topology;
use crate::topology_error::TopologyError;

pub use derive::derive_geometry;
pub use in_memory::InMemoryTopologyStore;

/// Create/read/update access to stored topologies.
pub trait TopologyStore {
    /// Fetch a topology with its ordered aggregations.
    fn get_by_id(&self, id: TopologyId) -> Result<Topology, TopologyError>;

    /// Create an empty topology and assign its identifier.
    fn create(&self, kind: &str, offset: f64) -> Result<Topology, TopologyError>;

    /// Replace the aggregations of `topology` in one all-or-nothing step.
    fn bulk_insert_aggregations(
        &self,
        topology: TopologyId,
        aggregations: &[PathAggregation],
    ) -> Result<(), TopologyError>;

    /// Persist `topology`, computing its cached geometry when it has none.
    ///
    /// On return `topology` reflects the stored record.
    fn save(&self, topology: &mut Topology) -> Result<(), TopologyError>;

    /// Remove a topology together with its aggregations.
    fn delete(&self, id: TopologyId) -> Result<(), TopologyError>;
}

impl<T: TopologyStore + ?Sized> TopologyStore for &T {
    fn get_by_id(&self, id: TopologyId) -> Result<Topology, TopologyError> {
        (**self).get_by_id(id)
    }

    fn create(&self, kind: &str, offset: f64) -> Result<Topology, TopologyError> {
        (**self).create(kind, offset)
    }

    fn bulk_insert_aggregations(
        &self,
        topology: TopologyId,
        aggregations: &[PathAggregation],
    ) -> Result<(), TopologyError> {
        (**self).bulk_insert_aggregations(topology, aggregations)
    }

    fn save(&self, topology: &mut Topology) -> Result<(), TopologyError> {
        (**self).save(topology)
    }

    fn delete(&self, id: TopologyId) -> Result<(), TopologyError> {
        (**self).delete(id)
    }
}

impl<T: TopologyStore + ?Sized> TopologyStore for Arc<T> {
    fn get_by_id(&self, id: TopologyId) -> Result<Topology, TopologyError> {
        (**self).get_by_id(id)
    }

    fn create(&self, kind: &str, offset: f64) -> Result<Topology, TopologyError> {
        (**self).create(kind, offset)
    }

    fn bulk_insert_aggregations(
        &self,
        topology: TopologyId,
        aggregations: &[PathAggregation],
    ) -> Result<(), TopologyError> {
        (**self).bulk_insert_aggregations(topology, aggregations)
    }

    fn save(&self, topology: &mut Topology) -> Result<(), TopologyError> {
        (**self).save(topology)
    }

    fn delete(&self, id: TopologyId) -> Result<(), TopologyError> {
        (**self).delete(id)
    }
}
