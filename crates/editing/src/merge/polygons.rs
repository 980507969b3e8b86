//! Polygon and multipolygon merging.

use geo_types::{Geometry, MultiPolygon, Polygon};

use mapedit_core::{Error, GeometryKernel, Result};

/// Union polygons into one, rejecting results that fall apart.
///
/// A single-polygon selection class promises a single-polygon result;
/// disjoint inputs would silently change the feature's kind, so they
/// are refused instead.
pub(super) fn merge_polygons(
    kernel: &dyn GeometryKernel,
    geometries: &[&Geometry<f64>],
) -> Result<Polygon<f64>> {
    let parts: Vec<Polygon<f64>> = geometries
        .iter()
        .filter_map(|g| match g {
            Geometry::Polygon(p) => Some(p.clone()),
            _ => None,
        })
        .collect();

    let mut union = kernel.union_polygons(&parts);
    match union.0.len() {
        1 => Ok(union.0.remove(0)),
        parts => Err(Error::DisjointResult { parts }),
    }
}

/// Union multipolygons unconditionally.
///
/// The multi kind already admits any number of parts, so disjoint
/// inputs are fine here.
pub(super) fn merge_multi_polygons(
    kernel: &dyn GeometryKernel,
    geometries: &[&Geometry<f64>],
) -> MultiPolygon<f64> {
    let parts: Vec<Polygon<f64>> = geometries
        .iter()
        .filter_map(|g| match g {
            Geometry::MultiPolygon(mp) => Some(mp.0.clone()),
            _ => None,
        })
        .flatten()
        .collect();
    kernel.union_polygons(&parts)
}
