//! Coordinate reference system transforms.
//!
//! The codec only needs to move coordinates between the client (wire)
//! system and the network system. [`CoordinateTransform`] is the seam;
//! [`SridTransform`] covers identity and WGS84 ⇄ Web Mercator.

use std::f64::consts::PI;

use geo::MapCoords;
use geo_types::{Coord, Geometry, Point};

use crate::topology_error::TopologyError;

/// EPSG code of WGS84 longitude/latitude.
pub const WGS84: u32 = 4326;
/// EPSG code of spherical Web Mercator.
pub const WEB_MERCATOR: u32 = 3857;

const EARTH_RADIUS: f64 = 6_378_137.0;
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Converts coordinates between spatial reference systems.
pub trait CoordinateTransform {
    /// Transform a single coordinate from `from` to `to`.
    fn transform(&self, coord: Coord<f64>, from: u32, to: u32)
    -> Result<Coord<f64>, TopologyError>;

    /// Transform a point.
    fn transform_point(
        &self,
        point: Point<f64>,
        from: u32,
        to: u32,
    ) -> Result<Point<f64>, TopologyError> {
        self.transform(point.0, from, to).map(Point::from)
    }

    /// Transform every coordinate of a geometry.
    fn transform_geometry(
        &self,
        geometry: &Geometry<f64>,
        from: u32,
        to: u32,
    ) -> Result<Geometry<f64>, TopologyError> {
        if from == to {
            return Ok(geometry.clone());
        }
        geometry.try_map_coords(|c| self.transform(c, from, to))
    }
}

/// Built-in transform: identity plus EPSG:4326 ⇄ EPSG:3857.
#[derive(Debug, Default, Clone, Copy)]
pub struct SridTransform;

impl CoordinateTransform for SridTransform {
    fn transform(
        &self,
        coord: Coord<f64>,
        from: u32,
        to: u32,
    ) -> Result<Coord<f64>, TopologyError> {
        match (from, to) {
            _ if from == to => Ok(coord),
            (WGS84, WEB_MERCATOR) => lnglat_to_mercator(coord).map_err(|reason| {
                TopologyError::CoordinateTransform { from, to, reason }
            }),
            (WEB_MERCATOR, WGS84) => Ok(mercator_to_lnglat(coord)),
            _ => Err(TopologyError::CoordinateTransform {
                from,
                to,
                reason: "unsupported SRID pair".into(),
            }),
        }
    }
}

fn lnglat_to_mercator(c: Coord<f64>) -> Result<Coord<f64>, String> {
    if !c.x.is_finite() || !c.y.is_finite() {
        return Err(format!("non-finite coordinate ({}, {})", c.x, c.y));
    }
    if c.y.abs() > MAX_MERCATOR_LATITUDE {
        return Err(format!("latitude {} outside Web Mercator bounds", c.y));
    }
    Ok(Coord {
        x: c.x.to_radians() * EARTH_RADIUS,
        y: (PI / 4.0 + c.y.to_radians() / 2.0).tan().ln() * EARTH_RADIUS,
    })
}

fn mercator_to_lnglat(c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (c.x / EARTH_RADIUS).to_degrees(),
        y: (2.0 * (c.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_when_srids_match() {
        let c = Coord { x: 1.5, y: -2.0 };
        assert_eq!(SridTransform.transform(c, 2154, 2154).unwrap(), c);
    }

    #[test]
    fn wgs84_mercator_round_trip() {
        let c = Coord { x: 6.6, y: 45.1 };
        let m = SridTransform.transform(c, WGS84, WEB_MERCATOR).unwrap();
        assert!((m.x - 734_708.64).abs() < 0.01, "{m:?}");
        let back = SridTransform.transform(m, WEB_MERCATOR, WGS84).unwrap();
        assert!((back.x - c.x).abs() < 1e-9);
        assert!((back.y - c.y).abs() < 1e-9);
    }

    #[test]
    fn polar_latitude_is_rejected() {
        let err = SridTransform
            .transform(Coord { x: 0.0, y: 89.0 }, WGS84, WEB_MERCATOR)
            .unwrap_err();
        assert!(matches!(err, TopologyError::CoordinateTransform { from: 4326, to: 3857, .. }));
    }

    #[test]
    fn unknown_pair_is_rejected() {
        assert!(
            SridTransform
                .transform(Coord { x: 0.0, y: 0.0 }, WGS84, 2154)
                .is_err()
        );
    }

    #[test]
    fn geometry_transform_maps_every_coordinate() {
        let line: Geometry<f64> = geo_types::LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]).into();
        let out = SridTransform
            .transform_geometry(&line, WGS84, WEB_MERCATOR)
            .unwrap();
        let Geometry::LineString(ls) = out else {
            panic!("expected a line string");
        };
        assert!(ls.0[0].x.abs() < 1e-6 && ls.0[0].y.abs() < 1e-6);
        assert!(ls.0[1].x > 100_000.0);
    }
}
