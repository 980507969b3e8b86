//! Shape simplification with a size-relative tolerance.
//!
//! Douglas-Peucker with the tolerance derived from the feature itself:
//! a ratio of its planar length (lines) or perimeter (polygons). The
//! same ratio then thins a street and a coastline proportionally
//! instead of gutting the small one and sparing the large one.

use geo::line_measures::{Euclidean, LengthMeasurable};
use geo::Simplify as GeoSimplify;
use geo_types::{Geometry, LineString, Polygon};
use tracing::debug;

use mapedit_core::prelude::*;

/// Parameters for simplification
#[derive(Debug, Clone)]
pub struct SimplifyParams {
    /// Tolerance as a fraction of the feature's length or perimeter.
    pub tolerance_ratio: f64,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            tolerance_ratio: 0.05,
        }
    }
}

/// Simplify each selected feature in place.
pub struct Simplify;

impl EditOperation for Simplify {
    type Params = SimplifyParams;

    fn name(&self) -> &'static str {
        "simplify"
    }

    fn description(&self) -> &'static str {
        "Remove vertices within a size-relative tolerance of the shape"
    }

    fn apply(
        &self,
        store: &mut FeatureStore,
        _kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        params: Self::Params,
    ) -> Result<Commit> {
        // Resolve everything before writing anything.
        let mut replacements = Vec::with_capacity(selection.len());
        for &id in selection {
            let geometry = store.geometry(id)?;
            replacements.push((id, simplify_geometry(geometry, params.tolerance_ratio)));
        }

        let mut commit = Commit::new();
        for (id, geometry) in replacements {
            store.replace_geometry(id, geometry)?;
            commit.replaced.push(id);
        }
        debug!(features = commit.replaced.len(), ratio = params.tolerance_ratio, "simplified");
        Ok(commit)
    }
}

/// Planar extent that the tolerance ratio scales against.
fn reference_extent(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::LineString(ls) => ls.length(&Euclidean),
        Geometry::MultiLineString(mls) => mls.0.iter().map(|ls| ls.length(&Euclidean)).sum(),
        Geometry::Polygon(p) => perimeter(p),
        Geometry::MultiPolygon(mp) => mp.0.iter().map(perimeter).sum(),
        _ => 0.0,
    }
}

fn perimeter(polygon: &Polygon<f64>) -> f64 {
    let ext = polygon.exterior().length(&Euclidean);
    let int: f64 = polygon
        .interiors()
        .iter()
        .map(|r| r.length(&Euclidean))
        .sum();
    ext + int
}

/// Simplify with tolerance `ratio * extent`. Points pass through.
pub fn simplify_geometry(geometry: &Geometry<f64>, ratio: f64) -> Geometry<f64> {
    let tolerance = ratio * reference_extent(geometry);
    if tolerance <= 0.0 {
        return geometry.clone();
    }

    match geometry {
        Geometry::LineString(ls) => Geometry::LineString(ls.simplify(&tolerance)),
        Geometry::Polygon(p) => Geometry::Polygon(simplify_polygon(p, tolerance)),
        Geometry::MultiLineString(mls) => Geometry::MultiLineString(
            mls.0.iter().map(|ls| ls.simplify(&tolerance)).collect(),
        ),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(
            mp.0.iter().map(|p| simplify_polygon(p, tolerance)).collect(),
        ),
        other => other.clone(),
    }
}

fn simplify_polygon(polygon: &Polygon<f64>, tolerance: f64) -> Polygon<f64> {
    let exterior = simplify_ring(polygon.exterior(), tolerance);
    // Interior rings that collapse stop being holes at all.
    let interiors: Vec<LineString<f64>> = polygon
        .interiors()
        .iter()
        .map(|ring| ring.simplify(&tolerance))
        .filter(|ring| ring.0.len() >= 4)
        .collect();
    Polygon::new(exterior, interiors)
}

/// An exterior that would collapse below 4 coordinates keeps its vertices.
fn simplify_ring(ring: &LineString<f64>, tolerance: f64) -> LineString<f64> {
    let simplified = ring.simplify(&tolerance);
    if simplified.0.len() < 4 {
        ring.clone()
    } else {
        simplified
    }
}
