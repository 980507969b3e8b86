//! Exploding a polyline into its individual segments.

use geo_types::{Geometry, LineString};
use tracing::debug;

use mapedit_core::prelude::*;

/// Break each selected linestring at every interior vertex.
///
/// A line of N vertices becomes N-1 two-point segments. The original
/// feature keeps its id and attributes and carries the first segment;
/// the rest are added as new features.
pub struct NodeSplit;

impl EditOperation for NodeSplit {
    type Params = ();

    fn name(&self) -> &'static str {
        "node_split"
    }

    fn description(&self) -> &'static str {
        "Split linestrings into one segment per vertex pair"
    }

    fn apply(
        &self,
        store: &mut FeatureStore,
        _kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        _params: (),
    ) -> Result<Commit> {
        // Validate the whole selection before producing anything.
        let mut exploded: Vec<(FeatureId, Vec<LineString<f64>>)> =
            Vec::with_capacity(selection.len());
        for &id in selection {
            let line = match store.geometry(id)? {
                Geometry::LineString(ls) => ls,
                other => {
                    return Err(Error::UnsupportedKind(
                        GeometryKind::of(other).unwrap_or(GeometryKind::LineString),
                    ))
                }
            };
            if line.0.len() < 3 {
                return Err(Error::InsufficientVertices {
                    needed: 3,
                    found: line.0.len(),
                });
            }
            let segments: Vec<LineString<f64>> = line
                .lines()
                .map(|seg| LineString::new(vec![seg.start, seg.end]))
                .collect();
            exploded.push((id, segments));
        }

        let mut commit = Commit::new();
        for (id, mut segments) in exploded {
            let rest = segments.split_off(1);
            let first = segments.remove(0);
            store.replace_geometry(id, first.into())?;
            commit.replaced.push(id);
            for segment in rest {
                commit.added.push(store.add(segment.into())?);
            }
        }
        debug!(
            replaced = commit.replaced.len(),
            added = commit.added.len(),
            "node split"
        );
        Ok(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::GeoKernel;
    use geo_types::{line_string, point};

    #[test]
    fn test_four_vertices_three_segments() {
        let mut store = FeatureStore::new();
        let id = store
            .add(
                line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0), (x: 3.0, y: 0.0)]
                    .into(),
            )
            .unwrap();

        let commit = NodeSplit.apply(&mut store, &GeoKernel, &[id], ()).unwrap();

        assert_eq!(commit.replaced, vec![id]);
        assert_eq!(commit.added.len(), 2);
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.geometry(id).unwrap(),
            &line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)].into(),
            "original keeps the first segment"
        );
        assert_eq!(
            store.geometry(commit.added[1]).unwrap(),
            &line_string![(x: 2.0, y: 0.0), (x: 3.0, y: 0.0)].into()
        );
    }

    #[test]
    fn test_two_vertex_line_rejected() {
        let mut store = FeatureStore::new();
        let id = store
            .add(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)].into())
            .unwrap();

        let err = NodeSplit
            .apply(&mut store, &GeoKernel, &[id], ())
            .unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientVertices {
                needed: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_non_line_rejected_before_mutation() {
        let mut store = FeatureStore::new();
        let line = store
            .add(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)].into())
            .unwrap();
        let pt = store.add(point! { x: 0.0, y: 0.0 }.into()).unwrap();

        let err = NodeSplit
            .apply(&mut store, &GeoKernel, &[line, pt], ())
            .unwrap_err();
        assert_eq!(err, Error::UnsupportedKind(GeometryKind::Point));
        assert_eq!(store.len(), 2, "store unchanged after rejection");
    }
}
