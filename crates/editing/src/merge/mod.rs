//! Merging selected features into one.
//!
//! Every geometry kind merges, each with its own rule:
//! - points collapse to their vertex-mean centroid
//! - linestrings chain end to end where they share endpoints
//! - polygons take their set union, refusing disjoint results
//! - the multi kinds take part-set or coordinate-set unions
//!
//! Points merge into a fresh feature with empty attributes; for every
//! other kind the first selected feature survives and carries the
//! merged geometry while the rest are removed. A merge that cannot
//! honor its rule fails before touching the store.

mod lines;
mod points;
mod polygons;

use geo_types::{Geometry, LineString};
use tracing::debug;

use mapedit_core::prelude::*;

/// How the merged geometry lands in the store.
enum Outcome {
    /// All inputs removed, one new feature added.
    Fresh(Geometry<f64>),
    /// First input keeps its identity and takes the geometry;
    /// the remaining inputs are removed.
    ReplaceFirst(Geometry<f64>),
}

/// Merge the selected features of one kind into a single feature.
pub struct Merge;

impl EditOperation for Merge {
    type Params = ();

    fn name(&self) -> &'static str {
        "merge"
    }

    fn description(&self) -> &'static str {
        "Combine selected features of the same kind into one feature"
    }

    fn apply(
        &self,
        store: &mut FeatureStore,
        kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        _params: (),
    ) -> Result<Commit> {
        if selection.len() < 2 {
            return Err(Error::SelectionTooSmall {
                needed: 2,
                found: selection.len(),
            });
        }

        let mut geometries: Vec<(FeatureId, &Geometry<f64>)> = Vec::with_capacity(selection.len());
        for &id in selection {
            geometries.push((id, store.geometry(id)?));
        }

        let kind = GeometryKind::of(geometries[0].1).ok_or(Error::UnsupportedGeometry(
            mapedit_core::feature::geometry_type_name(geometries[0].1),
        ))?;
        for (_, geometry) in &geometries {
            match GeometryKind::of(geometry) {
                Some(found) if found == kind => {}
                Some(found) => {
                    return Err(Error::TypeMismatch {
                        expected: kind,
                        found,
                    })
                }
                None => {
                    return Err(Error::UnsupportedGeometry(
                        mapedit_core::feature::geometry_type_name(geometry),
                    ))
                }
            }
        }

        let refs: Vec<&Geometry<f64>> = geometries.iter().map(|(_, g)| *g).collect();
        // Compute the merged geometry up front; the store is only
        // touched once nothing can fail anymore.
        let outcome = match kind {
            GeometryKind::Point => Outcome::Fresh(points::merge_points(&refs)?.into()),
            GeometryKind::MultiPoint => {
                Outcome::ReplaceFirst(points::merge_multi_points(&refs).into())
            }
            GeometryKind::LineString => {
                let all: Vec<&LineString<f64>> = refs
                    .iter()
                    .filter_map(|g| match g {
                        Geometry::LineString(ls) => Some(ls),
                        _ => None,
                    })
                    .collect();
                if !lines::any_pair_connected(&all) {
                    return Err(Error::Disconnected);
                }
                let others: Vec<_> = geometries[1..]
                    .iter()
                    .filter_map(|(id, g)| match g {
                        Geometry::LineString(ls) => Some((*id, ls)),
                        _ => None,
                    })
                    .collect();
                // Secondary chains are discarded with their features.
                let (chain, _) = lines::chain_lines(all[0], &others);
                Outcome::ReplaceFirst(chain.into())
            }
            GeometryKind::MultiLineString => {
                Outcome::ReplaceFirst(lines::merge_multi_lines(&refs).into())
            }
            GeometryKind::Polygon => {
                Outcome::ReplaceFirst(polygons::merge_polygons(kernel, &refs)?.into())
            }
            GeometryKind::MultiPolygon => {
                Outcome::ReplaceFirst(polygons::merge_multi_polygons(kernel, &refs).into())
            }
        };

        let mut commit = Commit::new();
        match outcome {
            Outcome::Fresh(merged) => {
                for &id in selection {
                    store.remove(id);
                    commit.removed.push(id);
                }
                commit.added.push(store.add(merged)?);
            }
            Outcome::ReplaceFirst(merged) => {
                store.replace_geometry(selection[0], merged)?;
                commit.replaced.push(selection[0]);
                for &id in &selection[1..] {
                    store.remove(id);
                    commit.removed.push(id);
                }
            }
        }
        debug!(kind = %kind, removed = commit.removed.len(), "merged");
        Ok(commit)
    }
}
