//! Linear referencing primitives on path geometries.
//!
//! Positions are fractions of the total Euclidean length of a line, in
//! `[0.0, 1.0]`. Offsets are signed lateral distances: positive on the
//! left of the line direction, negative on the right.

use geo::{Closest, ClosestPoint, Euclidean, Length, LineInterpolatePoint, LineLocatePoint};
use geo_types::{Coord, Line, LineString, Point};

use crate::topology_error::TopologyError;

/// Result of projecting a point onto a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Fraction of the line length at the closest point.
    pub position: f64,
    /// Signed distance from the line (positive to the left).
    pub offset: f64,
}

/// Euclidean length of `line`.
#[inline]
pub fn line_length(line: &LineString<f64>) -> f64 {
    line.length::<Euclidean>()
}

fn ensure_linear(line: &LineString<f64>) -> Result<f64, TopologyError> {
    let length = line_length(line);
    if line.0.len() < 2 || length <= 0.0 || !length.is_finite() {
        return Err(TopologyError::InvalidGeometry(format!(
            "path geometry must have a positive length (got {} vertices, length {length})",
            line.0.len()
        )));
    }
    Ok(length)
}

/// Projects `point` onto `line`, returning its position and signed offset.
pub fn project(line: &LineString<f64>, point: Point<f64>) -> Result<Projection, TopologyError> {
    ensure_linear(line)?;
    let position = line
        .line_locate_point(&point)
        .ok_or_else(|| TopologyError::InvalidGeometry("cannot locate point on path".into()))?
        .clamp(0.0, 1.0);
    let closest = match line.closest_point(&point) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => p,
        Closest::Indeterminate => point_at(line, position)?,
    };
    let gap = distance(point.0, closest.0);
    let side = segment_at(line, position)
        .map(|segment| side_of(segment, point.0))
        .unwrap_or(0.0);
    let offset = if side < 0.0 { -gap } else { gap };
    Ok(Projection { position, offset })
}

/// Point located at `position` along `line`.
pub fn point_at(line: &LineString<f64>, position: f64) -> Result<Point<f64>, TopologyError> {
    line.line_interpolate_point(position.clamp(0.0, 1.0))
        .ok_or_else(|| TopologyError::InvalidGeometry(format!("cannot interpolate at {position}")))
}

/// Point at `position`, shifted laterally by `offset`.
pub fn offset_point(
    line: &LineString<f64>,
    position: f64,
    offset: f64,
) -> Result<Point<f64>, TopologyError> {
    let on_line = point_at(line, position)?;
    if offset == 0.0 {
        return Ok(on_line);
    }
    let normal = segment_at(line, position)
        .and_then(left_normal)
        .ok_or_else(|| TopologyError::InvalidGeometry("cannot offset on a degenerate path".into()))?;
    Ok(Point::new(
        on_line.x() + normal.x * offset,
        on_line.y() + normal.y * offset,
    ))
}

/// Portion of `line` between two positions.
///
/// The result runs from `start` to `end`, so it is reversed when
/// `start > end`.
pub fn sub_line(
    line: &LineString<f64>,
    start: f64,
    end: f64,
) -> Result<LineString<f64>, TopologyError> {
    let length = ensure_linear(line)?;
    if start > end {
        let mut reversed = sub_line(line, end, start)?;
        reversed.0.reverse();
        return Ok(reversed);
    }
    let from = start.clamp(0.0, 1.0) * length;
    let to = end.clamp(0.0, 1.0) * length;

    let mut coords = vec![point_at(line, start)?.0];
    let mut walked = 0.0;
    for segment in line.lines() {
        walked += distance(segment.start, segment.end);
        if walked > from && walked < to {
            coords.push(segment.end);
        }
    }
    coords.push(point_at(line, end)?.0);
    Ok(LineString::new(coords))
}

/// Shifts every vertex of `line` by `offset` along its averaged left normal.
pub fn offset_line(line: &LineString<f64>, offset: f64) -> LineString<f64> {
    if offset == 0.0 || line.0.len() < 2 {
        return line.clone();
    }
    let normals: Vec<Option<Coord<f64>>> = line.lines().map(left_normal).collect();
    let shifted = line
        .0
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let before = i.checked_sub(1).and_then(|j| normals.get(j).copied().flatten());
            let after = normals.get(i).copied().flatten();
            let normal = match (before, after) {
                (Some(a), Some(b)) => unit(Coord {
                    x: a.x + b.x,
                    y: a.y + b.y,
                })
                .unwrap_or(a),
                (Some(n), None) | (None, Some(n)) => n,
                (None, None) => Coord { x: 0.0, y: 0.0 },
            };
            Coord {
                x: c.x + normal.x * offset,
                y: c.y + normal.y * offset,
            }
        })
        .collect();
    LineString::new(shifted)
}

/// Concatenates consecutive lines, dropping repeated junction vertices.
pub fn join_lines<I>(parts: I) -> LineString<f64>
where
    I: IntoIterator<Item = LineString<f64>>,
{
    let mut coords: Vec<Coord<f64>> = Vec::new();
    for part in parts {
        for c in part.0 {
            if coords.last() != Some(&c) {
                coords.push(c);
            }
        }
    }
    LineString::new(coords)
}

fn segment_at(line: &LineString<f64>, position: f64) -> Option<Line<f64>> {
    let target = position.clamp(0.0, 1.0) * line_length(line);
    let mut walked = 0.0;
    let mut last = None;
    for segment in line.lines() {
        let len = distance(segment.start, segment.end);
        if len == 0.0 {
            continue;
        }
        walked += len;
        last = Some(segment);
        if walked >= target {
            break;
        }
    }
    last
}

fn side_of(segment: Line<f64>, c: Coord<f64>) -> f64 {
    let d = segment.delta();
    d.x * (c.y - segment.start.y) - d.y * (c.x - segment.start.x)
}

fn left_normal(segment: Line<f64>) -> Option<Coord<f64>> {
    let d = segment.delta();
    unit(Coord { x: -d.y, y: d.x })
}

fn unit(c: Coord<f64>) -> Option<Coord<f64>> {
    let norm = c.x.hypot(c.y);
    (norm > 0.0).then(|| Coord {
        x: c.x / norm,
        y: c.y / norm,
    })
}

#[inline]
fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn horizontal() -> LineString<f64> {
        LineString::from(vec![(0.0, 0.0), (10.0, 0.0)])
    }

    fn elbow() -> LineString<f64> {
        LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])
    }

    #[test]
    fn project_left_and_right() {
        let left = project(&horizontal(), Point::new(3.0, 2.0)).unwrap();
        assert!((left.position - 0.3).abs() < EPS);
        assert!((left.offset - 2.0).abs() < EPS);

        let right = project(&horizontal(), Point::new(7.0, -1.5)).unwrap();
        assert!((right.position - 0.7).abs() < EPS);
        assert!((right.offset + 1.5).abs() < EPS);
    }

    #[test]
    fn project_beyond_ends_clamps() {
        let p = project(&horizontal(), Point::new(-5.0, 0.0)).unwrap();
        assert_eq!(p.position, 0.0);
        assert!((p.offset.abs() - 5.0).abs() < EPS);
    }

    #[test]
    fn project_rejects_degenerate_lines() {
        let dot = LineString::from(vec![(1.0, 1.0), (1.0, 1.0)]);
        assert!(matches!(
            project(&dot, Point::new(0.0, 0.0)),
            Err(TopologyError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn sub_line_keeps_interior_vertices() {
        let part = sub_line(&elbow(), 0.25, 0.75).unwrap();
        let coords: Vec<(f64, f64)> = part.0.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(coords, vec![(5.0, 0.0), (10.0, 0.0), (10.0, 5.0)]);
    }

    #[test]
    fn sub_line_reversed_when_start_after_end() {
        let part = sub_line(&elbow(), 0.75, 0.25).unwrap();
        let coords: Vec<(f64, f64)> = part.0.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(coords, vec![(10.0, 5.0), (10.0, 0.0), (5.0, 0.0)]);
    }

    #[test]
    fn offset_point_moves_left() {
        let p = offset_point(&horizontal(), 0.5, 2.0).unwrap();
        assert!((p.x() - 5.0).abs() < EPS);
        assert!((p.y() - 2.0).abs() < EPS);
    }

    #[test]
    fn offset_line_shifts_straight_line() {
        let shifted = offset_line(&horizontal(), -1.0);
        for c in shifted.0 {
            assert!((c.y + 1.0).abs() < EPS);
        }
    }

    #[test]
    fn join_drops_shared_vertices() {
        let a = LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]);
        let b = LineString::from(vec![(1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(join_lines([a, b]).0.len(), 3);
    }
}
