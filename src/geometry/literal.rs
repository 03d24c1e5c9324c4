//! Geometry literals accepted in raw-geometry mode.
//!
//! Supported: plain WKT (`POINT(1 2)`) and PostGIS-style EWKT with an SRID
//! prefix (`SRID=4326;LINESTRING(0 0, 1 1)`).

use std::str::FromStr;

use geo_types::Geometry;

use crate::topology_error::TopologyError;

/// A parsed geometry literal and the SRID it declared, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryLiteral {
    pub srid: Option<u32>,
    pub geometry: Geometry<f64>,
}

/// Parses a WKT or EWKT literal.
pub fn parse_geometry_literal(literal: &str) -> Result<GeometryLiteral, TopologyError> {
    let literal = literal.trim();
    let (srid, body) = split_srid(literal)?;
    Ok(GeometryLiteral {
        srid,
        geometry: parse_wkt(body)?,
    })
}

fn split_srid(literal: &str) -> Result<(Option<u32>, &str), TopologyError> {
    let Some((head, body)) = literal.split_once(';') else {
        return Ok((None, literal));
    };
    let head = head.trim();
    let Some(raw) = head
        .get(..5)
        .filter(|prefix| prefix.eq_ignore_ascii_case("SRID="))
        .map(|_| &head[5..])
    else {
        return Err(TopologyError::InvalidGeometry(format!(
            "unexpected prefix `{head}` in geometry literal"
        )));
    };
    let srid = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| TopologyError::InvalidGeometry(format!("invalid SRID: {raw}")))?;
    Ok((Some(srid), body.trim()))
}

/// Parses plain WKT into a `geo_types` geometry.
pub fn parse_wkt(wkt: &str) -> Result<Geometry<f64>, TopologyError> {
    wkt::Wkt::<f64>::from_str(wkt)
        .map_err(|e| TopologyError::InvalidGeometry(format!("WKT parse error: {e:?}")))
        .and_then(|w| {
            w.try_into().map_err(|e: wkt::conversion::Error| {
                TopologyError::InvalidGeometry(format!("WKT conversion error: {e:?}"))
            })
        })
}
