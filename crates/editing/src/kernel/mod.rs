//! Default geometry kernel backed by the `geo` crate.
//!
//! Union, minimum rotated rectangle and affine reflection come
//! straight from `geo`; planar noding and face extraction are
//! implemented in this module (no crate in the stack provides a
//! polygonizer). Everything is exposed through the
//! [`GeometryKernel`] capability trait so the editing services never
//! name `geo` algorithms directly.

mod noding;
mod polygonize;

use geo::{AffineOps, AffineTransform, BooleanOps, MinimumRotatedRect};
use geo_types::{Coord, Geometry, LineString, MultiPolygon, Polygon};

use mapedit_core::GeometryKernel;

use noding::{line_crossings, vertex_key};

/// The stock kernel. Stateless; construct freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoKernel;

impl GeometryKernel for GeoKernel {
    fn union_polygons(&self, polygons: &[Polygon<f64>]) -> MultiPolygon<f64> {
        let mut parts = polygons.iter();
        let first = match parts.next() {
            Some(p) => MultiPolygon::new(vec![p.clone()]),
            None => return MultiPolygon::new(vec![]),
        };
        parts.fold(first, |acc, p| acc.union(p))
    }

    fn polygonize(&self, edges: &[LineString<f64>]) -> Vec<Polygon<f64>> {
        polygonize::polygonize(edges)
    }

    fn minimum_rotated_rect(&self, geometry: &Geometry<f64>) -> Option<[Coord<f64>; 4]> {
        let rect = geometry.minimum_rotated_rect()?;
        let ring = &rect.exterior().0;

        // The rectangle ring closes on its first coordinate; collect
        // the distinct corners and reject collapsed (collinear) input.
        let mut corners: Vec<Coord<f64>> = Vec::with_capacity(4);
        for &c in ring {
            if !corners.iter().any(|&k| vertex_key(k) == vertex_key(c)) {
                corners.push(c);
            }
        }
        if corners.len() == 4 {
            Some([corners[0], corners[1], corners[2], corners[3]])
        } else {
            None
        }
    }

    fn distance(&self, a: Coord<f64>, b: Coord<f64>) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    fn reflect_across(
        &self,
        geometry: &Geometry<f64>,
        a: Coord<f64>,
        b: Coord<f64>,
    ) -> Geometry<f64> {
        if self.distance(a, b) < noding::SNAP_EPSILON {
            return geometry.clone();
        }

        // Reflection about the line through `a` at angle θ:
        // conjugate a pure axis reflection with the translation
        // moving `a` to the origin.
        let theta = (b.y - a.y).atan2(b.x - a.x);
        let (sin2, cos2) = (2.0 * theta).sin_cos();
        let transform = AffineTransform::new(
            cos2,
            sin2,
            a.x - cos2 * a.x - sin2 * a.y,
            sin2,
            -cos2,
            a.y - sin2 * a.x + cos2 * a.y,
        );
        geometry.affine_transform(&transform)
    }

    fn crossings(&self, a: &LineString<f64>, b: &LineString<f64>) -> Vec<Coord<f64>> {
        line_crossings(a, b)
    }
}
