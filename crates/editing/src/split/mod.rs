//! Splitting features along a drawn cut line.
//!
//! Splitting is the one two-phase edit: the user first arms the split
//! on the selected feature, then draws the cut line, and only then
//! does geometry change. [`SplitSession`] holds the armed state;
//! [`NodeSplit`] is the one-shot variant that breaks a line at its own
//! vertices.

mod cut;
mod nodes;

pub use nodes::NodeSplit;

use geo_types::{Geometry, LineString};
use tracing::debug;

use mapedit_core::prelude::*;

/// Phase of a split in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitState {
    /// No split armed.
    #[default]
    Idle,
    /// Waiting for the cut line for this target.
    AwaitingCutLine { target: FeatureId },
}

/// The two-phase split workflow.
///
/// `begin` validates and arms; `complete` consumes the drawn cut line
/// and commits. Completing disarms whether or not the cut produced
/// pieces, so a missed cut drops back to normal selection and the user
/// re-arms to retry; `cancel` disarms at any time.
#[derive(Debug, Default)]
pub struct SplitSession {
    state: SplitState,
}

impl SplitSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SplitState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SplitState::AwaitingCutLine { .. })
    }

    /// Arm a split on the first selected feature.
    ///
    /// Only linestrings and polygons can be split.
    pub fn begin(&mut self, store: &FeatureStore, selection: &[FeatureId]) -> Result<()> {
        let target = *selection.first().ok_or(Error::SelectionTooSmall {
            needed: 1,
            found: 0,
        })?;
        let kind = store
            .kind_of(target)
            .ok_or(Error::UnknownFeature(target))?;
        match kind {
            GeometryKind::LineString | GeometryKind::Polygon => {
                self.state = SplitState::AwaitingCutLine { target };
                debug!(?target, %kind, "split armed");
                Ok(())
            }
            other => Err(Error::UnsupportedKind(other)),
        }
    }

    /// Disarm without changing anything.
    pub fn cancel(&mut self) {
        self.state = SplitState::Idle;
    }

    /// Execute the armed split along `cut_line`.
    ///
    /// The target keeps its identity and attributes and carries the
    /// first piece; every other piece becomes a new feature with empty
    /// attributes.
    pub fn complete(
        &mut self,
        store: &mut FeatureStore,
        kernel: &dyn GeometryKernel,
        cut_line: &LineString<f64>,
    ) -> Result<Commit> {
        let SplitState::AwaitingCutLine { target } = self.state else {
            return Err(Error::SplitNotPending);
        };
        // The drawn cut consumes the armed state either way.
        self.state = SplitState::Idle;

        let pieces: Vec<Geometry<f64>> = match store.geometry(target)? {
            Geometry::LineString(line) => cut::split_line(kernel, line, cut_line)?
                .into_iter()
                .map(Geometry::LineString)
                .collect(),
            Geometry::Polygon(polygon) => cut::split_polygon(kernel, polygon, cut_line)?
                .into_iter()
                .map(Geometry::Polygon)
                .collect(),
            other => return Err(Error::UnsupportedKind(
                GeometryKind::of(other).unwrap_or(GeometryKind::LineString),
            )),
        };

        let mut commit = Commit::new();
        let mut pieces = pieces.into_iter();
        if let Some(first) = pieces.next() {
            store.replace_geometry(target, first)?;
            commit.replaced.push(target);
        }
        for piece in pieces {
            commit.added.push(store.add(piece)?);
        }
        debug!(?target, pieces = commit.added.len(), "split committed");
        Ok(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::GeoKernel;
    use geo::Area;
    use geo_types::{line_string, point, polygon};

    fn square() -> Geometry<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 4.0),
        ]
        .into()
    }

    #[test]
    fn test_full_split_workflow() {
        let mut store = FeatureStore::new();
        let id = store.add(square()).unwrap();
        let mut session = SplitSession::new();

        session.begin(&store, &[id]).unwrap();
        assert!(session.is_pending());

        let cut = line_string![(x: 2.0, y: -1.0), (x: 2.0, y: 5.0)];
        let commit = session.complete(&mut store, &GeoKernel, &cut).unwrap();

        assert_eq!(commit.replaced, vec![id], "target carries the first piece");
        assert_eq!(commit.added.len(), 1);
        assert!(!session.is_pending(), "session disarms after commit");
        assert_eq!(store.len(), 2);
        let total: f64 = commit
            .replaced
            .iter()
            .chain(&commit.added)
            .map(|&piece| match store.geometry(piece).unwrap() {
                Geometry::Polygon(p) => p.unsigned_area(),
                _ => 0.0,
            })
            .sum();
        assert!((total - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_complete_without_begin() {
        let mut store = FeatureStore::new();
        let mut session = SplitSession::new();
        let cut = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        let err = session.complete(&mut store, &GeoKernel, &cut).unwrap_err();
        assert_eq!(err, Error::SplitNotPending);
    }

    #[test]
    fn test_missed_cut_disarms_session() {
        let mut store = FeatureStore::new();
        let id = store.add(square()).unwrap();
        let mut session = SplitSession::new();
        session.begin(&store, &[id]).unwrap();

        let miss = line_string![(x: 10.0, y: 10.0), (x: 11.0, y: 11.0)];
        let err = session.complete(&mut store, &GeoKernel, &miss).unwrap_err();

        assert_eq!(err, Error::NoSplitProduced);
        assert!(!session.is_pending(), "a drawn cut always ends the phase");
        assert!(store.contains(id));
        assert_eq!(store.geometry(id).unwrap(), &square());
    }

    #[test]
    fn test_point_cannot_be_split() {
        let mut store = FeatureStore::new();
        let id = store.add(point! { x: 0.0, y: 0.0 }.into()).unwrap();
        let mut session = SplitSession::new();

        let err = session.begin(&store, &[id]).unwrap_err();
        assert_eq!(err, Error::UnsupportedKind(GeometryKind::Point));
        assert!(!session.is_pending());
    }

    #[test]
    fn test_cancel_disarms() {
        let mut store = FeatureStore::new();
        let id = store.add(square()).unwrap();
        let mut session = SplitSession::new();
        session.begin(&store, &[id]).unwrap();
        session.cancel();

        let cut = line_string![(x: 2.0, y: -1.0), (x: 2.0, y: 5.0)];
        assert_eq!(
            session.complete(&mut store, &GeoKernel, &cut).unwrap_err(),
            Error::SplitNotPending
        );
    }
}
