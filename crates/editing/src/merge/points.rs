//! Point and multipoint merging.

use geo_types::{Geometry, MultiPoint, Point};

use mapedit_core::{Error, Result};

/// Collapse points to their vertex-mean centroid.
pub(super) fn merge_points(geometries: &[&Geometry<f64>]) -> Result<Point<f64>> {
    crate::centroid::vertex_mean_of(geometries.iter().copied())
        .map(Point::from)
        .ok_or(Error::SelectionTooSmall {
            needed: 2,
            found: 0,
        })
}

/// Union of the coordinate sets, first feature's coordinates first.
///
/// Duplicates across features appear once; order within a feature is
/// preserved so the result is deterministic.
pub(super) fn merge_multi_points(geometries: &[&Geometry<f64>]) -> MultiPoint<f64> {
    let mut merged: Vec<Point<f64>> = Vec::new();
    for geometry in geometries {
        if let Geometry::MultiPoint(mp) = geometry {
            for &p in &mp.0 {
                if !merged.iter().any(|&q| q == p) {
                    merged.push(p);
                }
            }
        }
    }
    MultiPoint::new(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_points_collapse_to_centroid() {
        let a: Geometry<f64> = point! { x: 0.0, y: 0.0 }.into();
        let b: Geometry<f64> = point! { x: 2.0, y: 0.0 }.into();
        let merged = merge_points(&[&a, &b]).unwrap();
        assert_eq!(merged, point! { x: 1.0, y: 0.0 });
    }

    #[test]
    fn test_multi_points_union_drops_duplicates() {
        let a: Geometry<f64> =
            MultiPoint::new(vec![point! { x: 0.0, y: 0.0 }, point! { x: 1.0, y: 0.0 }]).into();
        let b: Geometry<f64> =
            MultiPoint::new(vec![point! { x: 1.0, y: 0.0 }, point! { x: 2.0, y: 0.0 }]).into();
        let merged = merge_multi_points(&[&a, &b]);
        assert_eq!(merged.0.len(), 3, "shared coordinate appears once");
        assert_eq!(merged.0[0], point! { x: 0.0, y: 0.0 });
    }
}
