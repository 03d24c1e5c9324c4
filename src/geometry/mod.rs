//! Geometry utilities for path-topology.
//!
//! This module provides the linear-referencing primitives used by the
//! path network and the topology store, geometry literal parsing for
//! raw-geometry mode, and coordinate system transforms.

pub mod linear;
pub mod literal;
pub mod transform;

pub use linear::{Projection, join_lines, offset_line, offset_point, point_at, project, sub_line};
pub use literal::{GeometryLiteral, parse_geometry_literal};
pub use transform::{CoordinateTransform, SridTransform, WEB_MERCATOR, WGS84};
