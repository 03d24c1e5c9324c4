mod util;

use geo_types::{Geometry, Point};
use path_topology::prelude::*;
use util::*;

#[test]
fn point_projects_onto_nearest_path() {
    let net = network();
    let store = store(&net);
    let codec = codec(&net, &store);

    let t = codec.deserialize(r#"{"lat": 5, "lng": 60}"#).unwrap();
    assert!(t.is_point());
    assert_eq!(t.kind, "TOPOLOGY");
    assert_eq!(t.aggregations.len(), 1);
    let marker = t.aggregations[0];
    assert_eq!(marker.path, pid(1264));
    assert_close(marker.start_position, 0.6);
    assert_eq!(marker.start_position, marker.end_position);
    assert_close(t.offset, 5.0);
    assert_eq!(t.geom, Some(Geometry::Point(Point::new(60.0, 5.0))));
    assert_eq!(store.get_by_id(t.id).unwrap(), t);
}

#[test]
fn point_on_the_right_gets_negative_offset() {
    let net = network();
    let store = store(&net);
    let t = codec(&net, &store)
        .deserialize(r#"{"lat": -4, "lng": 20, "kind": "SIGNAGE"}"#)
        .unwrap();
    assert_eq!(t.kind, "SIGNAGE");
    assert_eq!(t.aggregations[0].path, pid(1264));
    assert_close(t.aggregations[0].start_position, 0.2);
    assert_close(t.offset, -4.0);
}

#[test]
fn snapped_point_has_zero_offset() {
    let net = network();
    let store = store(&net);
    let t = codec(&net, &store)
        .deserialize(r#"{"lat": 5, "lng": 60, "snap": 1208}"#)
        .unwrap();
    assert_eq!(t.aggregations[0].path, pid(1208));
    assert_close(t.aggregations[0].start_position, 0.05);
    assert_eq!(t.offset, 0.0);
}

#[test]
fn snap_to_unknown_path_fails_without_leftovers() {
    let net = network();
    let store = store(&net);
    let err = codec(&net, &store)
        .deserialize(r#"{"lat": 5, "lng": 60, "snap": 77}"#)
        .unwrap_err();
    assert_eq!(err, TopologyError::PathNotFound(pid(77)));
    assert!(store.is_empty());
}

#[test]
fn existing_pk_is_reused() {
    let net = network();
    let store = store(&net);
    let codec = codec(&net, &store);
    let first = codec.deserialize(r#"{"lat": 5, "lng": 60}"#).unwrap();

    let payload = format!(r#"{{"lat": 50, "lng": 50, "pk": {}}}"#, first.id);
    let again = codec.deserialize(&payload).unwrap();
    assert_eq!(again, first);
    assert_eq!(store.len(), 1);
}

#[test]
fn stale_pk_builds_a_new_point() {
    let net = network();
    let store = store(&net);
    let t = codec(&net, &store)
        .deserialize(r#"{"lat": 5, "lng": 60, "pk": 999}"#)
        .unwrap();
    assert_ne!(t.id, TopologyId::new(999));
    assert_eq!(t.aggregations[0].path, pid(1264));
}

#[test]
fn bare_identifier_resolves_existing_topology() {
    let net = network();
    let store = store(&net);
    let codec = codec(&net, &store);
    let t = codec.deserialize(r#"{"lat": 5, "lng": 60}"#).unwrap();

    assert_eq!(codec.deserialize(&t.id.to_string()).unwrap(), t);
    assert_eq!(codec.deserialize(&format!(" {} ", t.id)).unwrap(), t);
    assert_eq!(
        codec.deserialize("42").unwrap_err(),
        TopologyError::TopologyNotFound(TopologyId::new(42))
    );
}

#[test]
fn empty_network_has_no_nearby_path() {
    let net = InMemoryPathNetwork::new();
    let store = store(&net);
    let err = codec(&net, &store)
        .deserialize(r#"{"lat": 5, "lng": 60}"#)
        .unwrap_err();
    assert_eq!(err, TopologyError::NoNearbyPath);
    assert!(store.is_empty());
}

#[test]
fn wire_coordinates_are_transformed_to_the_network() {
    let net = network();
    let store = store(&net);
    let codec = TopologyCodec::new(&net, &store, TopologyConfig::default());

    let t = codec
        .deserialize(r#"{"lat": 0.00005, "lng": 0.0005}"#)
        .unwrap();
    let Some(Geometry::Point(p)) = t.geom else {
        panic!("expected a point geometry, got {:?}", t.geom);
    };
    assert!((p.x() - 55.66).abs() < 0.01, "x = {}", p.x());
    assert!((p.y() - 5.566).abs() < 0.01, "y = {}", p.y());
    assert_eq!(t.aggregations[0].path, pid(1264));

    let wire: WirePoint = serde_json::from_str(&codec.serialize(&t, false).unwrap()).unwrap();
    assert!((wire.lng - 0.0005).abs() < 1e-12);
    assert!((wire.lat - 0.00005).abs() < 1e-12);
}

#[test]
fn out_of_range_latitude_is_a_transform_error() {
    let net = network();
    let store = store(&net);
    let codec = TopologyCodec::new(&net, &store, TopologyConfig::default());
    let err = codec.deserialize(r#"{"lat": 89.9, "lng": 0}"#).unwrap_err();
    assert!(
        matches!(err, TopologyError::CoordinateTransform { from: 4326, to: 3857, .. }),
        "unexpected error: {err:?}"
    );
    assert!(store.is_empty());
}
