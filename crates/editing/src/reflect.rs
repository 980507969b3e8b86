//! Mirror a feature across an axis of its own footprint.
//!
//! The axis comes from the feature's minimum rotated rectangle: the
//! line through the midpoints of one pair of opposite sides. Midpoints
//! of the two short sides are separated by the rectangle's long
//! dimension, so that pair carries the long axis and the other pair
//! the short axis. The result stays inside the original footprint,
//! which keeps the verb useful on rotated shapes where a plain
//! bounding-box flip would drift.

use geo_types::Coord;
use tracing::debug;

use mapedit_core::prelude::*;

/// Which rectangle axis to mirror across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// The line along the rectangle's longer dimension.
    #[default]
    Long,
    /// The line along the rectangle's shorter dimension.
    Short,
}

/// Parameters for reflection
#[derive(Debug, Clone, Default)]
pub struct ReflectParams {
    pub axis: Axis,
}

/// Reflect each selected feature across an axis of its footprint.
pub struct Reflect;

impl EditOperation for Reflect {
    type Params = ReflectParams;

    fn name(&self) -> &'static str {
        "reflect"
    }

    fn description(&self) -> &'static str {
        "Mirror features across the long or short axis of their minimum rotated rectangle"
    }

    fn apply(
        &self,
        store: &mut FeatureStore,
        kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        params: Self::Params,
    ) -> Result<Commit> {
        let mut replacements = Vec::with_capacity(selection.len());
        for &id in selection {
            let geometry = store.geometry(id)?;
            let (a, b) = reflection_axis(kernel, geometry, params.axis)?;
            replacements.push((id, kernel.reflect_across(geometry, a, b)));
        }

        let mut commit = Commit::new();
        for (id, geometry) in replacements {
            store.replace_geometry(id, geometry)?;
            commit.replaced.push(id);
        }
        debug!(features = commit.replaced.len(), axis = ?params.axis, "reflected");
        Ok(commit)
    }
}

/// Endpoints of the requested mirror line.
fn reflection_axis(
    kernel: &dyn GeometryKernel,
    geometry: &geo_types::Geometry<f64>,
    axis: Axis,
) -> Result<(Coord<f64>, Coord<f64>)> {
    let corners = kernel
        .minimum_rotated_rect(geometry)
        .ok_or(Error::DegenerateAxis)?;

    let mid = |a: Coord<f64>, b: Coord<f64>| Coord {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    };

    // Midpoints of opposite sides, in ring order.
    let first = (mid(corners[0], corners[1]), mid(corners[2], corners[3]));
    let second = (mid(corners[1], corners[2]), mid(corners[3], corners[0]));

    let first_span = kernel.distance(first.0, first.1);
    let second_span = kernel.distance(second.0, second.1);

    // The wider-separated midpoint pair lies along the long axis.
    // A square is ambiguous; the first pair wins deterministically.
    let (long, short) = if first_span >= second_span {
        (first, second)
    } else {
        (second, first)
    };
    Ok(match axis {
        Axis::Long => long,
        Axis::Short => short,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::GeoKernel;
    use geo::CoordsIter;
    use geo_types::{line_string, Geometry};

    fn l_shape() -> Geometry<f64> {
        // Wide in x, so the long axis runs horizontally.
        line_string![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 5.0, y: 2.0),
        ]
        .into()
    }

    #[test]
    fn test_reflect_long_axis_flips_vertically() {
        let mut store = FeatureStore::new();
        let id = store.add(l_shape()).unwrap();

        Reflect
            .apply(
                &mut store,
                &GeoKernel,
                &[id],
                ReflectParams { axis: Axis::Long },
            )
            .unwrap();

        let coords: Vec<_> = store.geometry(id).unwrap().coords_iter().collect();
        // The long axis is the horizontal line y = 1, so y maps to 2 - y.
        assert!((coords[0].y - 2.0).abs() < 1e-9);
        assert!((coords[0].x - 0.0).abs() < 1e-9, "x is unchanged");
        assert!((coords[2].y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_reflect_is_an_involution() {
        let mut store = FeatureStore::new();
        let id = store.add(l_shape()).unwrap();
        let params = ReflectParams { axis: Axis::Short };

        Reflect
            .apply(&mut store, &GeoKernel, &[id], params.clone())
            .unwrap();
        Reflect
            .apply(&mut store, &GeoKernel, &[id], params)
            .unwrap();

        let back: Vec<_> = store.geometry(id).unwrap().coords_iter().collect();
        let orig: Vec<_> = l_shape().coords_iter().collect();
        for (o, b) in orig.iter().zip(&back) {
            assert!((o.x - b.x).abs() < 1e-9 && (o.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_collinear_feature_has_no_axis() {
        let mut store = FeatureStore::new();
        let id = store
            .add(line_string![(x: 0.0, y: 0.0), (x: 5.0, y: 5.0)].into())
            .unwrap();

        let err = Reflect
            .apply(&mut store, &GeoKernel, &[id], ReflectParams::default())
            .unwrap_err();
        assert_eq!(err, Error::DegenerateAxis);
    }
}
