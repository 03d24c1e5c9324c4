use std::collections::BTreeMap;

use geo_types::{LineString, Point};

use crate::geometry::linear::Projection;
use crate::network::PathDirectory;
use crate::topology::ids::PathId;
use crate::topology::path::Path;
use crate::topology_error::TopologyError;

/// A path network held in memory, keyed by identifier.
///
/// Nearest-path queries scan every path; on equal distance the lowest
/// identifier wins so results are deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPathNetwork {
    paths: BTreeMap<PathId, Path>,
}

impl InMemoryPathNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from `(id, geometry)` pairs.
    pub fn try_from_lines<I>(lines: I) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = (PathId, LineString<f64>)>,
    {
        let mut network = Self::new();
        for (id, geom) in lines {
            network.insert(Path::try_new(id, geom)?);
        }
        Ok(network)
    }

    /// Insert or replace a path. Returns the previous path, if any.
    pub fn insert(&mut self, path: Path) -> Option<Path> {
        self.paths.insert(path.id, path)
    }

    pub fn remove(&mut self, id: PathId) -> Option<Path> {
        self.paths.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.values()
    }
}

impl PathDirectory for InMemoryPathNetwork {
    fn get(&self, id: PathId) -> Result<Path, TopologyError> {
        self.paths
            .get(&id)
            .cloned()
            .ok_or(TopologyError::PathNotFound(id))
    }

    fn project_nearest(&self, point: Point<f64>) -> Result<(Path, Projection), TopologyError> {
        let mut best: Option<(&Path, Projection)> = None;
        for path in self.paths.values() {
            let projection = path.project(point)?;
            let closer = best
                .as_ref()
                .is_none_or(|(_, b)| projection.offset.abs() < b.offset.abs());
            if closer {
                best = Some((path, projection));
            }
        }
        best.map(|(path, projection)| (path.clone(), projection))
            .ok_or(TopologyError::NoNearbyPath)
    }
}
