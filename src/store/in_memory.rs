use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::debug_invariants::DebugInvariants;
use crate::network::PathDirectory;
use crate::store::TopologyStore;
use crate::store::derive::derive_geometry;
use crate::topology::aggregation::PathAggregation;
use crate::topology::ids::TopologyId;
use crate::topology::model::Topology;
use crate::topology_error::TopologyError;

/// Topology store held in memory.
///
/// Records live in a [`DashMap`] so independent topologies can be read
/// and written concurrently. Identifiers are assigned from 1 upwards.
/// The network is consulted to check path references on insertion and
/// to derive geometries on [`TopologyStore::save`].
#[derive(Debug)]
pub struct InMemoryTopologyStore<D> {
    network: D,
    records: DashMap<TopologyId, Topology>,
    next_id: AtomicU64,
}

impl<D: PathDirectory> InMemoryTopologyStore<D> {
    pub fn new(network: D) -> Self {
        Self {
            network,
            records: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn network(&self) -> &D {
        &self.network
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifiers of every stored topology, ascending.
    pub fn ids(&self) -> Vec<TopologyId> {
        let mut ids: Vec<TopologyId> = self.records.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        ids
    }
}

impl<D: PathDirectory> TopologyStore for InMemoryTopologyStore<D> {
    fn get_by_id(&self, id: TopologyId) -> Result<Topology, TopologyError> {
        self.records
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or(TopologyError::TopologyNotFound(id))
    }

    fn create(&self, kind: &str, offset: f64) -> Result<Topology, TopologyError> {
        let id = TopologyId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let topology = Topology::new(id, kind, offset);
        self.records.insert(id, topology.clone());
        Ok(topology)
    }

    fn bulk_insert_aggregations(
        &self,
        topology: TopologyId,
        aggregations: &[PathAggregation],
    ) -> Result<(), TopologyError> {
        let mut record = self
            .records
            .get_mut(&topology)
            .ok_or(TopologyError::TopologyNotFound(topology))?;

        let mut candidate = record.clone();
        candidate.set_aggregations(aggregations.to_vec());
        candidate.validate_invariants()?;
        for aggr in &candidate.aggregations {
            self.network.get(aggr.path)?;
        }

        record.aggregations = candidate.aggregations;
        record.geom = None;
        Ok(())
    }

    fn save(&self, topology: &mut Topology) -> Result<(), TopologyError> {
        let mut record = self
            .records
            .get_mut(&topology.id)
            .ok_or(TopologyError::TopologyNotFound(topology.id))?;

        let geom = match topology.geom.take() {
            Some(geom) => Some(geom),
            None => derive_geometry(&self.network, &record.aggregations, topology.offset)?,
        };
        record.kind = topology.kind.clone();
        record.offset = topology.offset;
        record.geom = geom;
        record.debug_assert_invariants();
        *topology = record.clone();
        Ok(())
    }

    fn delete(&self, id: TopologyId) -> Result<(), TopologyError> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or(TopologyError::TopologyNotFound(id))
    }
}
