//! Error types for MapEdit
//!
//! Every editing failure is detected synchronously, reported as a
//! user-facing message via `Display`, and leaves the feature store
//! unmodified. No error is fatal: the engine stays usable after any
//! rejected operation.

use thiserror::Error;

use crate::feature::{FeatureId, GeometryKind};

/// Main error type for MapEdit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("cannot edit mixed geometry kinds: selection holds {expected}, got {found}")]
    TypeMismatch {
        expected: GeometryKind,
        found: GeometryKind,
    },

    #[error("cannot merge: lines share no endpoint")]
    Disconnected,

    #[error("cannot merge: union would produce a disjoint result ({parts} parts)")]
    DisjointResult { parts: usize },

    #[error("no split produced: the cutting line does not cross the target")]
    NoSplitProduced,

    #[error("nothing to split: need at least {needed} vertices, found {found}")]
    InsufficientVertices { needed: usize, found: usize },

    #[error("cannot reflect: bounding rectangle is degenerate (collinear geometry)")]
    DegenerateAxis,

    #[error("selection too small: need at least {needed} features, found {found}")]
    SelectionTooSmall { needed: usize, found: usize },

    #[error("no feature with id {0:?} in the store")]
    UnknownFeature(FeatureId),

    #[error("operation does not apply to {0} geometries")]
    UnsupportedKind(GeometryKind),

    #[error("geometry type {0} is not editable")]
    UnsupportedGeometry(&'static str),

    #[error("no split is pending: draw a cutting line first")]
    SplitNotPending,
}

/// Result type alias for MapEdit operations
pub type Result<T> = std::result::Result<T, Error>;
