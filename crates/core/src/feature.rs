//! Feature model: geometry + attributes, and the store that owns them.
//!
//! A [`Feature`] pairs one of the six editable geometry kinds with an
//! attribute map. Features live in a [`FeatureStore`], an ordered,
//! id-keyed collection; editing services mutate geometries in place or
//! ask the store to add/remove features, and describe what they did in
//! a [`Commit`].

use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The editable shape categories.
///
/// `geo` carries more variants (`Line`, `Rect`, `Triangle`,
/// `GeometryCollection`); those are rejected at the store boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl GeometryKind {
    /// Classify a geometry, or `None` if it is not an editable kind.
    pub fn of(geometry: &Geometry<f64>) -> Option<Self> {
        match geometry {
            Geometry::Point(_) => Some(Self::Point),
            Geometry::LineString(_) => Some(Self::LineString),
            Geometry::Polygon(_) => Some(Self::Polygon),
            Geometry::MultiPoint(_) => Some(Self::MultiPoint),
            Geometry::MultiLineString(_) => Some(Self::MultiLineString),
            Geometry::MultiPolygon(_) => Some(Self::MultiPolygon),
            _ => None,
        }
    }

    /// True for the multi-part kinds.
    pub fn is_multi(&self) -> bool {
        matches!(
            self,
            Self::MultiPoint | Self::MultiLineString | Self::MultiPolygon
        )
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
        };
        f.write_str(name)
    }
}

/// Name of a geometry variant, for error messages about non-editable input.
pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Unique identifier for a feature in the store.
///
/// Ids are assigned by the store and never reused, so a stale id held
/// by a collaborator can only miss, not alias a different feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub u64);

/// An editable entity: one geometry plus its attributes.
#[derive(Debug, Clone)]
pub struct Feature {
    pub id: FeatureId,
    pub geometry: Geometry<f64>,
    pub properties: HashMap<String, AttributeValue>,
}

impl Feature {
    /// The feature's geometry kind.
    ///
    /// Always defined: the store only admits editable kinds.
    pub fn kind(&self) -> GeometryKind {
        GeometryKind::of(&self.geometry).expect("store only holds editable kinds")
    }

    /// Set an attribute
    pub fn set_property(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.properties.insert(key.into(), value);
    }

    /// Get an attribute
    pub fn get_property(&self, key: &str) -> Option<&AttributeValue> {
        self.properties.get(key)
    }
}

/// What a committed operation did to the store.
///
/// Collaborators (selection, rendering) use this to resync: removed
/// features vanished, added features are new, replaced features kept
/// their identity but carry new geometry. A failed operation reports
/// nothing — there are no partial commits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Commit {
    pub removed: Vec<FeatureId>,
    pub added: Vec<FeatureId>,
    pub replaced: Vec<FeatureId>,
}

impl Commit {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the operation touched nothing.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.replaced.is_empty()
    }

    /// Fold another commit into this one (for verbs applied per feature).
    pub fn absorb(&mut self, other: Commit) {
        self.removed.extend(other.removed);
        self.added.extend(other.added);
        self.replaced.extend(other.replaced);
    }
}

/// Ordered, owning collection of features.
///
/// Insertion order is preserved for iteration (display order); lookup
/// is by id. All mutation flows through a single control path, so no
/// interior locking is needed.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: HashMap<FeatureId, Feature>,
    /// Insertion order (also display order).
    order: Vec<FeatureId>,
    /// Counter for generating unique ids.
    next_id: u64,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self {
            features: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a feature with empty attributes. Returns its id.
    pub fn add(&mut self, geometry: Geometry<f64>) -> crate::Result<FeatureId> {
        self.add_with_properties(geometry, HashMap::new())
    }

    /// Add a feature with the given attributes. Returns its id.
    pub fn add_with_properties(
        &mut self,
        geometry: Geometry<f64>,
        properties: HashMap<String, AttributeValue>,
    ) -> crate::Result<FeatureId> {
        if GeometryKind::of(&geometry).is_none() {
            return Err(crate::Error::UnsupportedGeometry(geometry_type_name(
                &geometry,
            )));
        }
        let id = FeatureId(self.next_id);
        self.next_id += 1;
        self.order.push(id);
        self.features.insert(
            id,
            Feature {
                id,
                geometry,
                properties,
            },
        );
        Ok(id)
    }

    /// Get a feature by id.
    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(&id)
    }

    /// Get a feature mutably by id.
    pub fn get_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        self.features.get_mut(&id)
    }

    /// The geometry of a feature, or `UnknownFeature`.
    pub fn geometry(&self, id: FeatureId) -> crate::Result<&Geometry<f64>> {
        self.features
            .get(&id)
            .map(|f| &f.geometry)
            .ok_or(crate::Error::UnknownFeature(id))
    }

    /// The kind of a feature, if present.
    pub fn kind_of(&self, id: FeatureId) -> Option<GeometryKind> {
        self.features.get(&id).map(|f| f.kind())
    }

    /// Replace a feature's geometry in place, keeping identity and attributes.
    pub fn replace_geometry(
        &mut self,
        id: FeatureId,
        geometry: Geometry<f64>,
    ) -> crate::Result<()> {
        if GeometryKind::of(&geometry).is_none() {
            return Err(crate::Error::UnsupportedGeometry(geometry_type_name(
                &geometry,
            )));
        }
        match self.features.get_mut(&id) {
            Some(feature) => {
                feature.geometry = geometry;
                Ok(())
            }
            None => Err(crate::Error::UnknownFeature(id)),
        }
    }

    /// Remove a feature, returning it if present.
    pub fn remove(&mut self, id: FeatureId) -> Option<Feature> {
        let removed = self.features.remove(&id);
        if removed.is_some() {
            self.order.retain(|&i| i != id);
        }
        removed
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        self.features.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate features in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.order.iter().filter_map(|id| self.features.get(id))
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.order.iter().copied()
    }
}
