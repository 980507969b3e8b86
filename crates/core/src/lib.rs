//! # MapEdit Core
//!
//! Core types for the MapEdit vector feature editing engine.
//!
//! This crate provides:
//! - `Feature` / `FeatureStore`: the editable entities and the ordered
//!   collection that owns them
//! - `GeometryKind`: the six editable shape categories
//! - `Commit`: what an operation did to the store
//! - `GeometryKernel`: capability trait for the geometry backend
//! - `EditOperation`: trait for editing verbs, for a consistent API
//!
//! All coordinates are finite planar pairs in one shared, implicit
//! reference frame; the engine never reprojects.

pub mod error;
pub mod feature;
pub mod kernel;

pub use error::{Error, Result};
pub use feature::{
    AttributeValue, Commit, Feature, FeatureId, FeatureStore, GeometryKind,
};
pub use kernel::GeometryKernel;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::feature::{
        AttributeValue, Commit, Feature, FeatureId, FeatureStore, GeometryKind,
    };
    pub use crate::kernel::GeometryKernel;
    pub use crate::EditOperation;
}

/// Core trait for editing verbs.
///
/// An editing verb validates its preconditions against the selected
/// features, computes a new feature set, and commits it to the store —
/// or fails before mutating anything. Implementations are stateless;
/// per-invocation knobs travel in `Params`.
pub trait EditOperation {
    /// Parameters controlling the verb's behavior
    type Params: Default;

    /// Returns the verb name
    fn name(&self) -> &'static str;

    /// Returns a description of what the verb does
    fn description(&self) -> &'static str;

    /// Apply the verb to the selected features.
    ///
    /// On success, returns the commit describing every store mutation.
    /// On failure, the store is left exactly as it was.
    fn apply(
        &self,
        store: &mut FeatureStore,
        kernel: &dyn GeometryKernel,
        selection: &[FeatureId],
        params: Self::Params,
    ) -> Result<Commit>;
}
