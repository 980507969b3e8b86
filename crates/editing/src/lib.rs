//! # MapEdit Editing
//!
//! The interactive editing verbs for MapEdit feature stores.
//!
//! This crate provides:
//! - `EditSession`: selection, verb dispatch and the split workflow
//! - merge, split, node split, reflect and simplify services
//! - straighten, reverse, delete, translate and rotate mutations
//! - `GeoKernel`: the default `geo`-backed geometry kernel
//!
//! Everything operates on `mapedit-core` stores and reports its work
//! as `Commit`s; no verb leaves the store half-edited on failure.

pub mod centroid;
pub mod kernel;
pub mod merge;
pub mod mutations;
pub mod reflect;
pub mod session;
pub mod simplify;
pub mod split;

pub use kernel::GeoKernel;
pub use merge::Merge;
pub use mutations::{
    Delete, Reverse, Rotate, RotateParams, Straighten, Translate, TranslateParams,
};
pub use reflect::{Axis, Reflect, ReflectParams};
pub use session::{EditSession, EditVerb, InteractionMode, Selection};
pub use simplify::{simplify_geometry, Simplify, SimplifyParams};
pub use split::{NodeSplit, SplitSession, SplitState};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::kernel::GeoKernel;
    pub use crate::reflect::Axis;
    pub use crate::session::{EditSession, EditVerb, InteractionMode};
    pub use crate::split::SplitState;
    pub use mapedit_core::prelude::*;
}
