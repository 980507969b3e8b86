//! Single-gesture edits: straighten, reverse, delete, move, rotate.

use geo::{AffineOps, AffineTransform};
use geo_types::{Geometry, LineString, MultiLineString};
use tracing::debug;

use mapedit_core::prelude::*;

use crate::centroid::vertex_mean_of;

/// Replace each selected line with its endpoint chord.
pub struct Straighten;

impl EditOperation for Straighten {
    type Params = ();

    fn name(&self) -> &'static str {
        "straighten"
    }

    fn description(&self) -> &'static str {
        "Drop interior vertices, keeping only a line's endpoints"
    }

    fn apply(
        &self,
        store: &mut FeatureStore,
        _kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        _params: (),
    ) -> Result<Commit> {
        let mut replacements = Vec::with_capacity(selection.len());
        for &id in selection {
            let straightened = match store.geometry(id)? {
                Geometry::LineString(ls) => Geometry::LineString(chord(ls)),
                Geometry::MultiLineString(mls) => Geometry::MultiLineString(
                    MultiLineString::new(mls.0.iter().map(chord).collect()),
                ),
                other => return Err(unsupported(other)),
            };
            replacements.push((id, straightened));
        }
        replace_all(store, replacements, "straightened")
    }
}

fn chord(line: &LineString<f64>) -> LineString<f64> {
    match (line.0.first(), line.0.last()) {
        (Some(&first), Some(&last)) if line.0.len() > 2 => LineString::new(vec![first, last]),
        _ => line.clone(),
    }
}

/// Reverse the vertex order of each selected line.
pub struct Reverse;

impl EditOperation for Reverse {
    type Params = ();

    fn name(&self) -> &'static str {
        "reverse"
    }

    fn description(&self) -> &'static str {
        "Reverse a line's direction of travel"
    }

    fn apply(
        &self,
        store: &mut FeatureStore,
        _kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        _params: (),
    ) -> Result<Commit> {
        let mut replacements = Vec::with_capacity(selection.len());
        for &id in selection {
            let reversed = match store.geometry(id)? {
                Geometry::LineString(ls) => Geometry::LineString(reversed_line(ls)),
                Geometry::MultiLineString(mls) => Geometry::MultiLineString(MultiLineString::new(
                    mls.0.iter().map(reversed_line).collect(),
                )),
                other => return Err(unsupported(other)),
            };
            replacements.push((id, reversed));
        }
        replace_all(store, replacements, "reversed")
    }
}

fn reversed_line(line: &LineString<f64>) -> LineString<f64> {
    LineString::new(line.0.iter().rev().copied().collect())
}

/// Remove the selected features.
pub struct Delete;

impl EditOperation for Delete {
    type Params = ();

    fn name(&self) -> &'static str {
        "delete"
    }

    fn description(&self) -> &'static str {
        "Remove the selected features from the store"
    }

    fn apply(
        &self,
        store: &mut FeatureStore,
        _kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        _params: (),
    ) -> Result<Commit> {
        for &id in selection {
            if !store.contains(id) {
                return Err(Error::UnknownFeature(id));
            }
        }
        let mut commit = Commit::new();
        for &id in selection {
            store.remove(id);
            commit.removed.push(id);
        }
        debug!(features = commit.removed.len(), "deleted");
        Ok(commit)
    }
}

/// Parameters for translation
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateParams {
    pub dx: f64,
    pub dy: f64,
}

/// Shift each selected feature by a fixed offset.
pub struct Translate;

impl EditOperation for Translate {
    type Params = TranslateParams;

    fn name(&self) -> &'static str {
        "translate"
    }

    fn description(&self) -> &'static str {
        "Move features by an offset in map units"
    }

    fn apply(
        &self,
        store: &mut FeatureStore,
        _kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        params: Self::Params,
    ) -> Result<Commit> {
        let transform = AffineTransform::translate(params.dx, params.dy);
        let mut replacements = Vec::with_capacity(selection.len());
        for &id in selection {
            replacements.push((id, store.geometry(id)?.affine_transform(&transform)));
        }
        replace_all(store, replacements, "translated")
    }
}

/// Parameters for rotation
#[derive(Debug, Clone, Copy)]
pub struct RotateParams {
    /// Counter-clockwise angle in degrees.
    pub angle_deg: f64,
}

impl Default for RotateParams {
    /// A quarter turn clockwise, the common map-editing gesture.
    fn default() -> Self {
        Self { angle_deg: -90.0 }
    }
}

/// Rotate the selection as a block about its vertex-mean centroid.
pub struct Rotate;

impl EditOperation for Rotate {
    type Params = RotateParams;

    fn name(&self) -> &'static str {
        "rotate"
    }

    fn description(&self) -> &'static str {
        "Rotate features about the selection's vertex-mean centroid"
    }

    fn apply(
        &self,
        store: &mut FeatureStore,
        _kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        params: Self::Params,
    ) -> Result<Commit> {
        let mut geometries = Vec::with_capacity(selection.len());
        for &id in selection {
            geometries.push((id, store.geometry(id)?));
        }
        let anchor = vertex_mean_of(geometries.iter().map(|(_, g)| *g)).ok_or(
            Error::SelectionTooSmall {
                needed: 1,
                found: 0,
            },
        )?;

        let transform = AffineTransform::rotate(params.angle_deg, anchor);
        let replacements: Vec<_> = geometries
            .into_iter()
            .map(|(id, g)| (id, g.affine_transform(&transform)))
            .collect();
        replace_all(store, replacements, "rotated")
    }
}

fn unsupported(geometry: &Geometry<f64>) -> Error {
    match GeometryKind::of(geometry) {
        Some(kind) => Error::UnsupportedKind(kind),
        None => Error::UnsupportedGeometry(mapedit_core::feature::geometry_type_name(geometry)),
    }
}

fn replace_all(
    store: &mut FeatureStore,
    replacements: Vec<(FeatureId, Geometry<f64>)>,
    verb: &'static str,
) -> Result<Commit> {
    let mut commit = Commit::new();
    for (id, geometry) in replacements {
        store.replace_geometry(id, geometry)?;
        commit.replaced.push(id);
    }
    debug!(features = commit.replaced.len(), verb, "applied");
    Ok(commit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::GeoKernel;
    use geo::CoordsIter;
    use geo_types::{line_string, point};

    fn bent_line() -> Geometry<f64> {
        line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 5.0), (x: 2.0, y: 0.0)].into()
    }

    #[test]
    fn test_straighten_keeps_endpoints() {
        let mut store = FeatureStore::new();
        let id = store.add(bent_line()).unwrap();

        Straighten.apply(&mut store, &GeoKernel, &[id], ()).unwrap();

        assert_eq!(
            store.geometry(id).unwrap(),
            &line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)].into()
        );
    }

    #[test]
    fn test_straighten_two_vertex_line_is_idempotent() {
        let mut store = FeatureStore::new();
        let id = store
            .add(line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)].into())
            .unwrap();
        Straighten.apply(&mut store, &GeoKernel, &[id], ()).unwrap();
        assert_eq!(
            store.geometry(id).unwrap(),
            &line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)].into()
        );
    }

    #[test]
    fn test_straighten_applies_per_part() {
        let mut store = FeatureStore::new();
        let id = store
            .add(
                MultiLineString::new(vec![
                    line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 5.0), (x: 2.0, y: 0.0)],
                    line_string![(x: 10.0, y: 0.0), (x: 11.0, y: 5.0), (x: 12.0, y: 0.0)],
                ])
                .into(),
            )
            .unwrap();

        Straighten.apply(&mut store, &GeoKernel, &[id], ()).unwrap();

        match store.geometry(id).unwrap() {
            Geometry::MultiLineString(mls) => {
                assert_eq!(mls.0.len(), 2, "part count unchanged");
                assert_eq!(mls.0[0], line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)]);
                assert_eq!(mls.0[1], line_string![(x: 10.0, y: 0.0), (x: 12.0, y: 0.0)]);
            }
            other => panic!("expected a multilinestring, got {:?}", other),
        }
    }

    #[test]
    fn test_straighten_rejects_points() {
        let mut store = FeatureStore::new();
        let id = store.add(point! { x: 0.0, y: 0.0 }.into()).unwrap();
        let err = Straighten
            .apply(&mut store, &GeoKernel, &[id], ())
            .unwrap_err();
        assert_eq!(err, Error::UnsupportedKind(GeometryKind::Point));
    }

    #[test]
    fn test_reverse_twice_restores() {
        let mut store = FeatureStore::new();
        let id = store.add(bent_line()).unwrap();

        Reverse.apply(&mut store, &GeoKernel, &[id], ()).unwrap();
        assert_eq!(
            store.geometry(id).unwrap(),
            &line_string![(x: 2.0, y: 0.0), (x: 1.0, y: 5.0), (x: 0.0, y: 0.0)].into()
        );

        Reverse.apply(&mut store, &GeoKernel, &[id], ()).unwrap();
        assert_eq!(store.geometry(id).unwrap(), &bent_line());
    }

    #[test]
    fn test_delete_removes_all_or_nothing() {
        let mut store = FeatureStore::new();
        let a = store.add(point! { x: 0.0, y: 0.0 }.into()).unwrap();
        let ghost = FeatureId(999);

        let err = Delete
            .apply(&mut store, &GeoKernel, &[a, ghost], ())
            .unwrap_err();
        assert_eq!(err, Error::UnknownFeature(ghost));
        assert!(store.contains(a), "nothing removed on failure");

        let commit = Delete.apply(&mut store, &GeoKernel, &[a], ()).unwrap();
        assert_eq!(commit.removed, vec![a]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_translate_shifts_coordinates() {
        let mut store = FeatureStore::new();
        let id = store.add(point! { x: 1.0, y: 2.0 }.into()).unwrap();

        Translate
            .apply(
                &mut store,
                &GeoKernel,
                &[id],
                TranslateParams { dx: 3.0, dy: -1.0 },
            )
            .unwrap();

        assert_eq!(
            store.geometry(id).unwrap(),
            &point! { x: 4.0, y: 1.0 }.into()
        );
    }

    #[test]
    fn test_rotate_quarter_turn_about_shared_centroid() {
        let mut store = FeatureStore::new();
        let a = store.add(point! { x: 0.0, y: 0.0 }.into()).unwrap();
        let b = store.add(point! { x: 2.0, y: 0.0 }.into()).unwrap();

        Rotate
            .apply(
                &mut store,
                &GeoKernel,
                &[a, b],
                RotateParams { angle_deg: 90.0 },
            )
            .unwrap();

        // Anchor is (1, 0); after a quarter turn the points sit on the
        // vertical line through it, still opposite each other.
        let ca = store.geometry(a).unwrap().coords_iter().next().unwrap();
        let cb = store.geometry(b).unwrap().coords_iter().next().unwrap();
        assert!((ca.x - 1.0).abs() < 1e-9 && (cb.x - 1.0).abs() < 1e-9);
        assert!((ca.y + cb.y).abs() < 1e-9, "points stay opposite the anchor");
        assert!((ca.y.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_round_trip() {
        let mut store = FeatureStore::new();
        let id = store.add(bent_line()).unwrap();

        Rotate
            .apply(&mut store, &GeoKernel, &[id], RotateParams { angle_deg: 37.0 })
            .unwrap();
        Rotate
            .apply(&mut store, &GeoKernel, &[id], RotateParams { angle_deg: -37.0 })
            .unwrap();

        let back: Vec<_> = store.geometry(id).unwrap().coords_iter().collect();
        let orig: Vec<_> = bent_line().coords_iter().collect();
        for (o, b) in orig.iter().zip(&back) {
            assert!(
                (o.x - b.x).abs() < 1e-9 && (o.y - b.y).abs() < 1e-9,
                "rotating back must restore {:?}, got {:?}",
                o,
                b
            );
        }
    }
}
