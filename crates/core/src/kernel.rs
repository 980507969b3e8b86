//! Capability seam for the computational-geometry backend.
//!
//! The editing services only need a handful of geometric primitives:
//! set union, face extraction from a planar edge graph, the
//! minimum-area rotated rectangle, point distance, reflection across a
//! line, and line/line crossings. Putting them behind a trait keeps the
//! orchestration logic independent of which geometry library backs it
//! and isolates floating-point robustness differences to one place.

use geo_types::{Coord, Geometry, LineString, MultiPolygon, Polygon};

/// Geometric primitives consumed by the editing services.
///
/// Implementations must be deterministic: the same inputs always
/// produce the same outputs, in the same order.
pub trait GeometryKernel {
    /// Set union of a non-empty slice of polygons.
    ///
    /// Inputs that touch or overlap fuse into fewer parts; disjoint
    /// inputs survive as separate parts of the result.
    fn union_polygons(&self, polygons: &[Polygon<f64>]) -> MultiPolygon<f64>;

    /// Extract the closed faces induced by a planar edge graph.
    ///
    /// The input linestrings are noded at mutual crossings first;
    /// dangling edges that do not bound a face contribute nothing.
    /// Faces are returned with counter-clockwise exteriors, largest
    /// first is not guaranteed — order follows edge discovery.
    fn polygonize(&self, edges: &[LineString<f64>]) -> Vec<Polygon<f64>>;

    /// The four corners of the minimum-area rotated rectangle
    /// enclosing a geometry, in ring order.
    ///
    /// Returns `None` when the rectangle is degenerate (empty,
    /// single-point or collinear input yields fewer than 4 distinct
    /// corners).
    fn minimum_rotated_rect(&self, geometry: &Geometry<f64>) -> Option<[Coord<f64>; 4]>;

    /// Euclidean distance between two coordinates.
    fn distance(&self, a: Coord<f64>, b: Coord<f64>) -> f64;

    /// Reflect a geometry across the infinite line through `a` and `b`.
    ///
    /// Must be an involution: applying it twice returns the original
    /// coordinates up to floating-point tolerance.
    fn reflect_across(&self, geometry: &Geometry<f64>, a: Coord<f64>, b: Coord<f64>)
        -> Geometry<f64>;

    /// Points where `a` crosses `b`, deduplicated, in no particular order.
    ///
    /// Collinear overlap contributes the overlap segment's endpoints.
    fn crossings(&self, a: &LineString<f64>, b: &LineString<f64>) -> Vec<Coord<f64>>;
}
