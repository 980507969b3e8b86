//! The editing session: store, selection, and verb dispatch.
//!
//! [`EditSession`] is the single entry point an application drives.
//! It owns the feature store, the kernel, the current selection and
//! the split workflow, applies verbs against the selection, and keeps
//! the selection in step with what each commit did.

use geo_types::{Geometry, LineString};
use tracing::info;

use mapedit_core::prelude::*;

use crate::kernel::GeoKernel;
use crate::merge::Merge;
use crate::mutations::{Delete, Reverse, Rotate, RotateParams, Straighten, Translate, TranslateParams};
use crate::reflect::{Axis, Reflect, ReflectParams};
use crate::simplify::{Simplify, SimplifyParams};
use crate::split::{NodeSplit, SplitSession, SplitState};

/// What the pointer is doing right now. One mode at a time; switching
/// modes disarms a pending split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Picking features and applying verbs.
    #[default]
    Select,
    /// Dragging the selection across the map.
    Translate,
    /// Dragging the selection around its centroid.
    Rotate,
    /// Drawing the cut line for an armed split.
    SplitAcquire,
}

/// The current selection: a kind-uniform, ordered set of feature ids.
///
/// Order matters (the first selected feature anchors merges and
/// splits) and uniformity is enforced at selection time so every verb
/// can assume it.
#[derive(Debug, Default)]
pub struct Selection {
    ids: Vec<FeatureId>,
}

impl Selection {
    /// Add a feature, enforcing kind uniformity.
    pub fn select(&mut self, store: &FeatureStore, id: FeatureId) -> Result<()> {
        let kind = store.kind_of(id).ok_or(Error::UnknownFeature(id))?;
        if let Some(expected) = self.ids.first().and_then(|&first| store.kind_of(first)) {
            if expected != kind {
                return Err(Error::TypeMismatch {
                    expected,
                    found: kind,
                });
            }
        }
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
        Ok(())
    }

    pub fn deselect(&mut self, id: FeatureId) {
        self.ids.retain(|&i| i != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[FeatureId] {
        &self.ids
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A single editing gesture, with its knobs inline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditVerb {
    Straighten,
    Reverse,
    Simplify { tolerance_ratio: f64 },
    Reflect { axis: Axis },
    Merge,
    NodeSplit,
    Delete,
    Translate { dx: f64, dy: f64 },
    Rotate { angle_deg: f64 },
}

impl EditVerb {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Straighten => "straighten",
            Self::Reverse => "reverse",
            Self::Simplify { .. } => "simplify",
            Self::Reflect { .. } => "reflect",
            Self::Merge => "merge",
            Self::NodeSplit => "node_split",
            Self::Delete => "delete",
            Self::Translate { .. } => "translate",
            Self::Rotate { .. } => "rotate",
        }
    }
}

/// An interactive editing session over one feature store.
pub struct EditSession {
    store: FeatureStore,
    kernel: Box<dyn GeometryKernel>,
    selection: Selection,
    split: SplitSession,
    mode: InteractionMode,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_kernel(Box::new(GeoKernel))
    }

    /// Run the session on a custom geometry backend.
    pub fn with_kernel(kernel: Box<dyn GeometryKernel>) -> Self {
        Self {
            store: FeatureStore::new(),
            kernel,
            selection: Selection::default(),
            split: SplitSession::new(),
            mode: InteractionMode::default(),
        }
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FeatureStore {
        &mut self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Switch interaction mode, disarming any pending split.
    ///
    /// `SplitAcquire` cannot be entered here; it is only reached
    /// through [`Self::begin_split`], which validates the selection
    /// first, so the mode and the split state never disagree.
    pub fn set_mode(&mut self, mode: InteractionMode) -> Result<()> {
        if mode == InteractionMode::SplitAcquire {
            return Err(Error::SplitNotPending);
        }
        if self.split.is_pending() {
            self.split.cancel();
        }
        self.mode = mode;
        Ok(())
    }

    /// Add a feature and return its id.
    pub fn add_feature(&mut self, geometry: Geometry<f64>) -> Result<FeatureId> {
        self.store.add(geometry)
    }

    pub fn select(&mut self, id: FeatureId) -> Result<()> {
        self.selection.select(&self.store, id)
    }

    pub fn deselect(&mut self, id: FeatureId) {
        self.selection.deselect(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Apply a verb to the current selection.
    ///
    /// On success the selection follows the commit: removed features
    /// drop out and the features the verb created become selected, so
    /// a merge or split leaves its result ready for the next gesture.
    pub fn apply(&mut self, verb: EditVerb) -> Result<Commit> {
        let ids = self.selection.ids().to_vec();
        let store = &mut self.store;
        let kernel = self.kernel.as_ref();

        let commit = match verb {
            EditVerb::Straighten => Straighten.apply(store, kernel, &ids, ()),
            EditVerb::Reverse => Reverse.apply(store, kernel, &ids, ()),
            EditVerb::Simplify { tolerance_ratio } => {
                Simplify.apply(store, kernel, &ids, SimplifyParams { tolerance_ratio })
            }
            EditVerb::Reflect { axis } => {
                Reflect.apply(store, kernel, &ids, ReflectParams { axis })
            }
            EditVerb::Merge => Merge.apply(store, kernel, &ids, ()),
            EditVerb::NodeSplit => NodeSplit.apply(store, kernel, &ids, ()),
            EditVerb::Delete => Delete.apply(store, kernel, &ids, ()),
            EditVerb::Translate { dx, dy } => {
                Translate.apply(store, kernel, &ids, TranslateParams { dx, dy })
            }
            EditVerb::Rotate { angle_deg } => {
                Rotate.apply(store, kernel, &ids, RotateParams { angle_deg })
            }
        }?;

        self.sync_selection(&commit);
        info!(
            verb = verb.name(),
            removed = commit.removed.len(),
            added = commit.added.len(),
            replaced = commit.replaced.len(),
            "verb committed"
        );
        Ok(commit)
    }

    /// Arm a split on the first selected feature.
    pub fn begin_split(&mut self) -> Result<()> {
        self.split.begin(&self.store, self.selection.ids())?;
        self.mode = InteractionMode::SplitAcquire;
        Ok(())
    }

    /// Execute the armed split along a drawn cut line.
    ///
    /// Drawing the cut ends the acquisition phase whether or not it
    /// produced pieces; a miss drops back to normal selection.
    pub fn complete_split(&mut self, cut_line: &LineString<f64>) -> Result<Commit> {
        let was_pending = self.split.is_pending();
        let result = self
            .split
            .complete(&mut self.store, self.kernel.as_ref(), cut_line);
        if was_pending {
            self.mode = InteractionMode::Select;
        }
        let commit = result?;
        self.sync_selection(&commit);
        info!(pieces = commit.added.len() + 1, "split committed");
        Ok(commit)
    }

    /// Disarm a pending split.
    pub fn cancel_split(&mut self) {
        self.split.cancel();
        self.mode = InteractionMode::Select;
    }

    pub fn split_state(&self) -> SplitState {
        self.split.state()
    }

    fn sync_selection(&mut self, commit: &Commit) {
        for &id in &commit.removed {
            self.selection.deselect(id);
        }
        for &id in &commit.added {
            // Commits only ever add kinds consistent with the
            // selection they came from.
            let selected = self.selection.select(&self.store, id);
            debug_assert!(selected.is_ok(), "commit added a mismatched kind");
        }
    }
}
