//! JSON wire format exchanged with clients.
//!
//! Three payload shapes are consumed:
//! - identifier only: `12` or `"12"`
//! - point: `{"lat": 45.1, "lng": 6.6, "pk": 3, "kind": "SIGNAGE", "snap": 1245}`
//! - line: `[{"offset": 0, "positions": {"0": [0, 0.3]}, "paths": [1264, 1208]}, ...]`
//!
//! Two are produced: point and line (with `pk`/`kind`/`offset` repeated
//! on every subtopology).

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::topology::ids::{PathId, TopologyId, parse_id_value};
use crate::topology_error::InvalidTopologyReason;

/// Position pair used when a path index has no entry in `positions`.
pub const FULL_PATH: (f64, f64) = (0.0, 1.0);

/// Per-path `(start, end)` positions of one subtopology, keyed by the
/// 0-based index of the path within the subtopology.
///
/// Clients send JSON objects whose keys are decimal strings
/// (`{"0": [0, 0.3], "1": [0.2, 1]}`); keys are parsed explicitly and a
/// key that is not an index is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionMap(BTreeMap<usize, (f64, f64)>);

impl PositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions of path `index`, or [`FULL_PATH`] when absent.
    pub fn get(&self, index: usize) -> (f64, f64) {
        self.0.get(&index).copied().unwrap_or(FULL_PATH)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains_key(&index)
    }

    pub fn insert(&mut self, index: usize, start: f64, end: f64) -> Option<(f64, f64)> {
        self.0.insert(index, (start, end))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, (f64, f64))> + '_ {
        self.0.iter().map(|(&i, &pair)| (i, pair))
    }
}

impl FromIterator<(f64, f64)> for PositionMap {
    /// Index each pair by its rank in the iterator.
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        PositionMap(iter.into_iter().enumerate().collect())
    }
}

impl Serialize for PositionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (index, (start, end)) in &self.0 {
            map.serialize_entry(&index.to_string(), &[start, end])?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PositionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PositionMapVisitor;

        impl<'de> Visitor<'de> for PositionMapVisitor {
            type Value = PositionMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping path indices to [start, end] pairs")
            }

            fn visit_unit<E: de::Error>(self) -> Result<PositionMap, E> {
                Ok(PositionMap::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PositionMap, A::Error> {
                let mut positions = BTreeMap::new();
                while let Some(key) = access.next_key::<String>()? {
                    let index = key.trim().parse::<usize>().map_err(|_| {
                        de::Error::custom(format!("position key `{key}` is not a path index"))
                    })?;
                    let pair: (f64, f64) = access.next_value()?;
                    positions.insert(index, pair);
                }
                Ok(PositionMap(positions))
            }
        }

        deserializer.deserialize_any(PositionMapVisitor)
    }
}

/// Identifier the client may have round-tripped; anything unusable
/// (missing, `0`, not a number) reads as `None`.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(parse_id_value)
        .filter(|&id| id != 0))
}

fn strict_path_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<PathId>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_id_value(&value)
            .map(|id| Some(PathId::new(id)))
            .ok_or_else(|| de::Error::custom(format!("`{value}` is not a path identifier"))),
    }
}

fn strict_path_ids<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<PathId>>, D::Error> {
    let Some(values) = Option::<Vec<Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    values
        .iter()
        .map(|value| {
            parse_id_value(value)
                .map(PathId::new)
                .ok_or_else(|| de::Error::custom(format!("`{value}` is not a path identifier")))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// A point topology on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub lng: f64,
    pub lat: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub pk: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "strict_path_id"
    )]
    pub snap: Option<PathId>,
}

/// One run of paths between two markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireSubtopology {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub pk: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Only meaningful on the first subtopology.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "strict_path_ids"
    )]
    pub paths: Option<Vec<PathId>>,
    #[serde(default)]
    pub positions: PositionMap,
}

/// A decoded client payload.
#[derive(Debug, Clone, PartialEq)]
pub enum WireInput {
    /// Reference to an existing topology.
    Identifier(TopologyId),
    Point(WirePoint),
    /// Non-empty list of subtopologies.
    Line(Vec<WireSubtopology>),
}

impl WireInput {
    /// Classify a parsed JSON payload.
    ///
    /// An object carrying both `lat` and `lng` is a point; any other
    /// object is a single subtopology.
    pub fn from_value(value: &Value) -> Result<Self, InvalidTopologyReason> {
        match value {
            Value::Number(_) | Value::String(_) => parse_id_value(value)
                .map(|id| WireInput::Identifier(TopologyId::new(id)))
                .ok_or_else(|| {
                    InvalidTopologyReason::Malformed(format!(
                        "`{value}` is neither an identifier nor a topology"
                    ))
                }),
            Value::Null => Err(InvalidTopologyReason::EmptyList),
            Value::Bool(_) => Err(InvalidTopologyReason::Malformed(format!(
                "`{value}` is not a topology"
            ))),
            Value::Object(obj) if obj.is_empty() => Err(InvalidTopologyReason::EmptyList),
            Value::Object(obj) if is_present(obj.get("lat")) && is_present(obj.get("lng")) => {
                serde_json::from_value::<WirePoint>(value.clone())
                    .map(WireInput::Point)
                    .map_err(|e| InvalidTopologyReason::Malformed(format!("point: {e}")))
            }
            Value::Object(_) => Ok(WireInput::Line(vec![parse_subtopology(0, value)?])),
            Value::Array(items) if items.is_empty() => Err(InvalidTopologyReason::EmptyList),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(j, item)| parse_subtopology(j, item))
                .collect::<Result<Vec<_>, _>>()
                .map(WireInput::Line),
        }
    }
}

/// `pk` of a point object, or of the first subtopology of a line, read
/// without validating the rest of the payload.
///
/// Same leniency as the typed fields: absent, `0` or non-numeric reads
/// as `None`.
pub fn leading_pk(value: &Value) -> Option<u64> {
    let first = match value {
        Value::Array(items) => items.first()?,
        Value::Object(_) => value,
        _ => return None,
    };
    first
        .get("pk")
        .and_then(parse_id_value)
        .filter(|&id| id != 0)
}

fn is_present(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

fn parse_subtopology(index: usize, value: &Value) -> Result<WireSubtopology, InvalidTopologyReason> {
    if !value.is_object() {
        return Err(InvalidTopologyReason::Malformed(format!(
            "subtopology {index}: expected an object, found `{value}`"
        )));
    }
    serde_json::from_value(value.clone())
        .map_err(|e| InvalidTopologyReason::Malformed(format!("subtopology {index}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positions_parse_string_keys() {
        let map: PositionMap = serde_json::from_value(json!({"0": [0, 0.3], "5": [0.2, 1]})).unwrap();
        assert_eq!(map.get(0), (0.0, 0.3));
        assert_eq!(map.get(5), (0.2, 1.0));
        assert_eq!(map.get(1), FULL_PATH);
        assert!(!map.contains(1));
    }

    #[test]
    fn positions_reject_non_index_keys() {
        let err = serde_json::from_value::<PositionMap>(json!({"first": [0, 1]})).unwrap_err();
        assert!(err.to_string().contains("not a path index"), "{err}");
    }

    #[test]
    fn positions_reject_bad_pairs() {
        assert!(serde_json::from_value::<PositionMap>(json!({"0": [0.1]})).is_err());
        assert!(serde_json::from_value::<PositionMap>(json!({"0": "0.1,0.2"})).is_err());
    }

    #[test]
    fn positions_serialize_with_string_keys() {
        let map: PositionMap = [(0.0, 0.3), (0.2, 1.0)].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"0":[0.0,0.3],"1":[0.2,1.0]}"#
        );
    }

    #[test]
    fn classify_identifier() {
        assert_eq!(
            WireInput::from_value(&json!(12)).unwrap(),
            WireInput::Identifier(TopologyId::new(12))
        );
        assert_eq!(
            WireInput::from_value(&json!("12")).unwrap(),
            WireInput::Identifier(TopologyId::new(12))
        );
        assert!(WireInput::from_value(&json!("twelve")).is_err());
    }

    #[test]
    fn classify_point() {
        let input = WireInput::from_value(&json!({"lat": 5.1, "lng": 6.6, "snap": "1245"})).unwrap();
        let WireInput::Point(point) = input else {
            panic!("expected a point");
        };
        assert_eq!(point.lat, 5.1);
        assert_eq!(point.snap, Some(PathId::new(1245)));
        assert_eq!(point.pk, None);
    }

    #[test]
    fn point_with_invalid_snap_is_malformed() {
        let err = WireInput::from_value(&json!({"lat": 5.1, "lng": 6.6, "snap": "north"})).unwrap_err();
        assert!(matches!(err, InvalidTopologyReason::Malformed(_)));
    }

    #[test]
    fn unusable_pk_is_ignored() {
        let WireInput::Point(point) =
            WireInput::from_value(&json!({"lat": 1, "lng": 2, "pk": "abc"})).unwrap()
        else {
            panic!("expected a point");
        };
        assert_eq!(point.pk, None);
        let WireInput::Line(subs) = WireInput::from_value(&json!([{"pk": 0, "paths": [1]}])).unwrap()
        else {
            panic!("expected a line");
        };
        assert_eq!(subs[0].pk, None);
    }

    #[test]
    fn lone_object_is_a_single_subtopology() {
        let input = WireInput::from_value(&json!({"paths": [7]})).unwrap();
        let WireInput::Line(subs) = input else {
            panic!("expected a line");
        };
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].paths, Some(vec![PathId::new(7)]));
        assert!(subs[0].positions.is_empty());
    }

    #[test]
    fn object_with_null_lat_is_not_a_point() {
        let input = WireInput::from_value(&json!({"lat": null, "lng": 2, "paths": [3]})).unwrap();
        assert!(matches!(input, WireInput::Line(_)));
    }

    #[test]
    fn empty_payloads() {
        for value in [json!([]), json!({}), json!(null)] {
            assert_eq!(
                WireInput::from_value(&value).unwrap_err(),
                InvalidTopologyReason::EmptyList
            );
        }
    }

    #[test]
    fn non_object_subtopology_names_its_index() {
        let err = WireInput::from_value(&json!([{"paths": [1]}, 4])).unwrap_err();
        let InvalidTopologyReason::Malformed(msg) = err else {
            panic!("expected malformed");
        };
        assert!(msg.starts_with("subtopology 1"), "{msg}");
    }

    #[test]
    fn missing_paths_is_kept_as_none() {
        let WireInput::Line(subs) = WireInput::from_value(&json!([{"offset": 2.5}])).unwrap() else {
            panic!("expected a line");
        };
        assert_eq!(subs[0].paths, None);
        assert_eq!(subs[0].offset, Some(2.5));
    }

    #[test]
    fn null_positions_read_as_empty() {
        let WireInput::Line(subs) =
            WireInput::from_value(&json!([{"paths": [1], "positions": null}])).unwrap()
        else {
            panic!("expected a line");
        };
        assert!(subs[0].positions.is_empty());
    }

    #[test]
    fn leading_pk_ignores_the_rest_of_the_payload() {
        assert_eq!(leading_pk(&json!([{"pk": 7, "paths": [1]}, {"paths": ["x"]}])), Some(7));
        assert_eq!(leading_pk(&json!({"pk": "9", "lat": 1.0})), Some(9));
        assert_eq!(leading_pk(&json!([{"paths": [1]}, {"pk": 7}])), None);
        assert_eq!(leading_pk(&json!([{"pk": 0}])), None);
        assert_eq!(leading_pk(&json!([])), None);
        assert_eq!(leading_pk(&json!(12)), None);
    }
}
