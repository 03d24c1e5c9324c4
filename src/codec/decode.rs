//! Wire payload → stored topology.

use geo_types::{Geometry, Point};
use serde_json::Value;

use crate::codec::TopologyCodec;
use crate::codec::marker::resolve_marker_position;
use crate::codec::wire::{WireInput, WirePoint, WireSubtopology, leading_pk};
use crate::geometry::literal::parse_geometry_literal;
use crate::geometry::transform::CoordinateTransform;
use crate::network::PathDirectory;
use crate::store::TopologyStore;
use crate::topology::aggregation::PathAggregation;
use crate::topology::ids::{PathId, TopologyId, parse_id_value};
use crate::topology::model::{TEMPORARY_KIND, Topology};
use crate::topology_error::{InvalidTopologyReason, TopologyError};

/// Aggregations of a line payload, numbered with one global counter.
#[derive(Debug, Default)]
struct AggregationChain {
    aggregations: Vec<PathAggregation>,
}

impl AggregationChain {
    fn next_order(&self) -> u32 {
        self.aggregations.len() as u32
    }

    fn push(&mut self, path: PathId, start: f64, end: f64) {
        let order = self.next_order();
        self.aggregations
            .push(PathAggregation::new(path, start, end, order));
    }

    fn push_marker(&mut self, path: PathId, position: f64) {
        let order = self.next_order();
        self.aggregations
            .push(PathAggregation::marker(path, position, order));
    }

    fn into_inner(self) -> Vec<PathAggregation> {
        self.aggregations
    }
}

fn check_position(
    subtopology: usize,
    index: usize,
    position: f64,
) -> Result<f64, InvalidTopologyReason> {
    if (0.0..=1.0).contains(&position) {
        Ok(position)
    } else {
        Err(InvalidTopologyReason::PositionOutOfRange {
            subtopology,
            index,
            position,
        })
    }
}

impl<D, S, T> TopologyCodec<D, S, T>
where
    D: PathDirectory,
    S: TopologyStore,
    T: CoordinateTransform,
{
    /// Decode a serialized topology, creating it in the store when the
    /// payload does not reference an existing one.
    ///
    /// Accepted inputs, tried in order:
    /// 1. a bare integer: the stored topology with that identifier
    /// 2. with linear referencing disabled: a WKT/EWKT geometry literal
    /// 3. a point object `{"lat", "lng", "pk"?, "kind"?, "snap"?}`
    /// 4. a list of subtopologies (a lone object counts as a list of one)
    pub fn deserialize(&self, input: &str) -> Result<Topology, TopologyError> {
        let text = input.trim();
        if let Ok(raw) = text.parse::<u64>() {
            log::debug!("deserialize: bare identifier {raw}");
            return self.store.get_by_id(TopologyId::new(raw));
        }
        if !self.config.linear_referencing {
            return self.create_from_literal(text);
        }
        let value: Value = serde_json::from_str(text)?;
        self.decode_value(&value)
    }

    /// Same as [`deserialize`](Self::deserialize) on an already parsed
    /// JSON document.
    pub fn deserialize_value(&self, value: &Value) -> Result<Topology, TopologyError> {
        if let Some(raw) = parse_id_value(value) {
            log::debug!("deserialize: bare identifier {raw}");
            return self.store.get_by_id(TopologyId::new(raw));
        }
        if !self.config.linear_referencing {
            return match value {
                Value::String(literal) => self.create_from_literal(literal),
                other => Err(TopologyError::InvalidGeometry(format!(
                    "expected a geometry literal, found `{other}`"
                ))),
            };
        }
        self.decode_value(value)
    }

    fn decode_value(&self, value: &Value) -> Result<Topology, TopologyError> {
        if let Some(existing) = self.reuse_existing(leading_pk(value))? {
            return Ok(existing);
        }
        match WireInput::from_value(value)? {
            WireInput::Identifier(id) => self.store.get_by_id(id),
            WireInput::Point(point) => self.decode_point(point),
            WireInput::Line(subtopologies) => self.decode_line(&subtopologies),
        }
    }

    /// Topology referenced by a round-tripped `pk`, if it still exists.
    ///
    /// Checked before the payload is decoded, so a client sending back an
    /// existing topology gets it even if the rest of its payload is stale.
    fn reuse_existing(&self, pk: Option<u64>) -> Result<Option<Topology>, TopologyError> {
        let Some(raw) = pk else {
            return Ok(None);
        };
        match self.store.get_by_id(TopologyId::new(raw)) {
            Ok(topology) => {
                log::debug!("deserialize: reusing topology {raw}");
                Ok(Some(topology))
            }
            Err(err) if err.is_not_found() => {
                log::debug!("deserialize: topology {raw} is gone, building a new one");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn decode_point(&self, point: WirePoint) -> Result<Topology, TopologyError> {
        let location = self.transform.transform_point(
            Point::new(point.lng, point.lat),
            self.config.wire_srid,
            self.config.network_srid,
        )?;

        let (path, position, offset) = match point.snap {
            Some(snap) => {
                let path = self.directory.get(snap)?;
                let projection = path.project(location)?;
                (path.id, projection.position, 0.0)
            }
            None => {
                let (path, projection) = self.directory.project_nearest(location)?;
                (path.id, projection.position, projection.offset)
            }
        };
        log::trace!("deserialize: point on path {path} at {position} (offset {offset})");

        let kind = point
            .kind
            .unwrap_or_else(|| self.config.default_kind.clone());
        let mut topology = self.store.create(&kind, offset)?;
        let marker = vec![PathAggregation::marker(path, position, 0)];
        let persisted = self.persist(&mut topology, marker, Some(location.into()));
        self.discard_on_error(topology.id, persisted)?;
        Ok(topology)
    }

    fn decode_line(&self, subtopologies: &[WireSubtopology]) -> Result<Topology, TopologyError> {
        let Some(first) = subtopologies.first() else {
            return Err(InvalidTopologyReason::EmptyList.into());
        };

        let offset = first.offset.unwrap_or(0.0);
        let mut topology = self.store.create(TEMPORARY_KIND, offset)?;
        log::debug!(
            "deserialize: building topology {} from {} subtopologies",
            topology.id,
            subtopologies.len()
        );

        let built = self
            .build_chain(subtopologies)
            .and_then(|aggregations| self.persist(&mut topology, aggregations, None));
        self.discard_on_error(topology.id, built)?;
        Ok(topology)
    }

    fn build_chain(
        &self,
        subtopologies: &[WireSubtopology],
    ) -> Result<Vec<PathAggregation>, TopologyError> {
        let mut chain = AggregationChain::default();
        let last = subtopologies.len().saturating_sub(1);
        for (j, subtopology) in subtopologies.iter().enumerate() {
            self.append_subtopology(&mut chain, j, subtopology, j == last)?;
        }
        // a lone marker is a point; anything else needs a segment
        let aggregations = chain.into_inner();
        let has_segment = aggregations.iter().any(|a| !a.is_marker());
        if aggregations.is_empty() || (aggregations.len() > 1 && !has_segment) {
            return Err(InvalidTopologyReason::NoSegment {
                subtopologies: subtopologies.len(),
            }
            .into());
        }
        Ok(aggregations)
    }

    /// Append the paths of subtopology `j`, then the waypoint marker that
    /// separates it from the next one.
    fn append_subtopology(
        &self,
        chain: &mut AggregationChain,
        j: usize,
        subtopology: &WireSubtopology,
        is_last: bool,
    ) -> Result<(), TopologyError> {
        let paths = subtopology
            .paths
            .as_deref()
            .ok_or(InvalidTopologyReason::MissingPaths { subtopology: j })?;

        for (i, &path) in paths.iter().enumerate() {
            let (start, end) = subtopology.positions.get(i);
            check_position(j, i, start)?;
            check_position(j, i, end)?;
            self.directory.get(path).map_err(|err| match err {
                TopologyError::PathNotFound(_) => TopologyError::from(
                    InvalidTopologyReason::UnknownPath {
                        subtopology: j,
                        index: i,
                        path,
                    },
                ),
                other => other,
            })?;
            chain.push(path, start, end);

            if i + 1 == paths.len() && !is_last {
                let position = resolve_marker_position(start, end, paths.len())
                    .map_err(|reason| reason.located(j, path))?;
                log::trace!("deserialize: waypoint after subtopology {j} on path {path} at {position}");
                chain.push_marker(path, position);
            }
        }
        Ok(())
    }

    fn persist(
        &self,
        topology: &mut Topology,
        aggregations: Vec<PathAggregation>,
        geom: Option<Geometry<f64>>,
    ) -> Result<(), TopologyError> {
        self.store
            .bulk_insert_aggregations(topology.id, &aggregations)?;
        topology.set_aggregations(aggregations);
        topology.geom = geom;
        self.store.save(topology)
    }

    /// Raw-geometry mode: store the literal as the topology geometry.
    fn create_from_literal(&self, literal: &str) -> Result<Topology, TopologyError> {
        let parsed = parse_geometry_literal(literal)?;
        let srid = parsed.srid.unwrap_or(self.config.wire_srid);
        let geom =
            self.transform
                .transform_geometry(&parsed.geometry, srid, self.config.network_srid)?;

        let mut topology = self.store.create(TEMPORARY_KIND, 0.0)?;
        log::debug!("deserialize: raw geometry stored as topology {}", topology.id);
        topology.geom = Some(geom);
        let saved = self.store.save(&mut topology);
        self.discard_on_error(topology.id, saved)?;
        Ok(topology)
    }

    /// Delete a half-built topology when `result` is an error.
    fn discard_on_error<R>(
        &self,
        id: TopologyId,
        result: Result<R, TopologyError>,
    ) -> Result<R, TopologyError> {
        if let Err(err) = &result {
            log::debug!("deserialize: discarding topology {id}: {err}");
            if let Err(cleanup) = self.store.delete(id) {
                log::warn!("failed to discard half-built topology {id}: {cleanup}");
            }
        }
        result
    }
}
