//! Bill-of-materials references and the catalog definitions they come from.

use serde::{Deserialize, Serialize};

use crate::domain::entities::common::{Coordinate, KeyedContainer, VersionReference};
use crate::domain::version::{Version, VersionRange};

/// A BOM imported by the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bom {
    pub coordinate: Coordinate,
    pub version: VersionReference,
    /// Lower ranks are imported first.
    pub order: i32,
}

impl Bom {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: VersionReference,
    ) -> Self {
        Self {
            coordinate: Coordinate::new(group_id, artifact_id),
            version,
            order: i32::MAX,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

/// BOMs by id. Iteration is by `(order, insertion)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BomContainer {
    inner: KeyedContainer<Bom>,
}

impl BomContainer {
    pub fn add(&mut self, id: impl Into<String>, bom: Bom) {
        self.inner.add(id, bom);
    }

    pub fn remove(&mut self, id: &str) -> Option<Bom> {
        self.inner.remove(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.inner.has(id)
    }

    pub fn get(&self, id: &str) -> Option<&Bom> {
        self.inner.get(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Import order. `sort_by_key` is stable, so equal ranks keep insertion
    /// order.
    pub fn ordered(&self) -> Vec<(&str, &Bom)> {
        let mut items: Vec<_> = self.inner.iter().collect();
        items.sort_by_key(|(_, bom)| bom.order);
        items
    }
}

impl Serialize for BomContainer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let ordered = self.ordered();
        let mut map = serializer.serialize_map(Some(ordered.len()))?;
        for (id, bom) in ordered {
            map.serialize_entry(id, bom)?;
        }
        map.end()
    }
}

/// One row of a BOM's compatibility table: which BOM version to use for a
/// range of platform versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomMapping {
    pub compatibility: VersionRange,
    pub version: String,
}

/// A catalog entry describing a BOM capabilities can refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomDefinition {
    pub id: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version_property: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub mappings: Vec<BomMapping>,
}

impl BomDefinition {
    /// The first mapping whose range admits `platform`.
    pub fn resolve_version(&self, platform: &Version) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.compatibility.matches(platform))
            .map(|m| m.version.as_str())
    }

    pub fn to_bom(&self) -> Bom {
        Bom::new(
            self.group_id.clone(),
            self.artifact_id.clone(),
            VersionReference::property(self.version_property.clone()),
        )
        .with_order(self.order)
    }
}
