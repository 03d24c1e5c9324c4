#![allow(dead_code)]
use geo_types::LineString;
use path_topology::prelude::*;

pub fn pid(u: u64) -> PathId {
    PathId::new(u)
}

/// Small network in a metric system (network SRID 3857):
///
/// ```text
///              1208 (30,100)
///                |
///  1264 (0,0) ---+--- (100,0)
///                |
///              1263 (30,-100)
/// ```
/// plus 1300, a remote path far to the north-east.
pub fn network() -> InMemoryPathNetwork {
    InMemoryPathNetwork::try_from_lines([
        (pid(1264), LineString::from(vec![(0.0, 0.0), (100.0, 0.0)])),
        (pid(1208), LineString::from(vec![(30.0, 0.0), (30.0, 100.0)])),
        (pid(1263), LineString::from(vec![(30.0, 0.0), (30.0, -100.0)])),
        (pid(1300), LineString::from(vec![(200.0, 200.0), (300.0, 200.0)])),
    ])
    .unwrap()
}

/// Wire and network share the network SRID, so coordinates pass through.
pub fn local_config() -> TopologyConfig {
    TopologyConfig::default().with_srids(3857, 3857)
}

pub type LocalStore<'a> = InMemoryTopologyStore<&'a InMemoryPathNetwork>;
pub type LocalCodec<'a> = TopologyCodec<&'a InMemoryPathNetwork, &'a LocalStore<'a>>;

pub fn store(network: &InMemoryPathNetwork) -> LocalStore<'_> {
    InMemoryTopologyStore::new(network)
}

pub fn codec<'a>(network: &'a InMemoryPathNetwork, store: &'a LocalStore<'a>) -> LocalCodec<'a> {
    TopologyCodec::new(network, store, local_config())
}

/// `(path, start, end, order)` of every aggregation.
pub fn quads(topology: &Topology) -> Vec<(u64, f64, f64, u32)> {
    topology
        .aggregations
        .iter()
        .map(|a| (a.path.get(), a.start_position, a.end_position, a.order))
        .collect()
}

pub fn assert_close(got: f64, want: f64) {
    assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
}

/// Store whose `save` always fails; optionally `delete` fails too.
pub struct FailingSaveStore<'a> {
    pub inner: LocalStore<'a>,
    pub fail_delete: bool,
}

impl<'a> FailingSaveStore<'a> {
    pub fn new(network: &'a InMemoryPathNetwork, fail_delete: bool) -> Self {
        Self {
            inner: InMemoryTopologyStore::new(network),
            fail_delete,
        }
    }
}

impl TopologyStore for FailingSaveStore<'_> {
    fn get_by_id(&self, id: TopologyId) -> Result<Topology, TopologyError> {
        self.inner.get_by_id(id)
    }

    fn create(&self, kind: &str, offset: f64) -> Result<Topology, TopologyError> {
        self.inner.create(kind, offset)
    }

    fn bulk_insert_aggregations(
        &self,
        topology: TopologyId,
        aggregations: &[PathAggregation],
    ) -> Result<(), TopologyError> {
        self.inner.bulk_insert_aggregations(topology, aggregations)
    }

    fn save(&self, _topology: &mut Topology) -> Result<(), TopologyError> {
        Err(TopologyError::Store("disk full".into()))
    }

    fn delete(&self, id: TopologyId) -> Result<(), TopologyError> {
        if self.fail_delete {
            return Err(TopologyError::Store("connection lost".into()));
        }
        self.inner.delete(id)
    }
}
