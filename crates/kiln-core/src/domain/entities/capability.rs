//! Capability catalog entries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::entities::common::VersionReference;
use crate::domain::entities::dependency::Dependency;
use crate::domain::value_objects::DependencyScope;
use crate::domain::version::{Version, VersionRange};

/// A requestable capability and the dependency it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub scope: DependencyScope,
    #[serde(default)]
    pub facets: BTreeSet<String>,
    /// Id of a catalog BOM that manages this artifact's version.
    #[serde(default)]
    pub bom: Option<String>,
    /// Platform versions the capability supports. `None` means all.
    #[serde(default)]
    pub compatibility: Option<VersionRange>,
}

impl Capability {
    pub fn new(
        id: impl Into<String>,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            category: String::new(),
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            scope: DependencyScope::Compile,
            facets: BTreeSet::new(),
            bom: None,
            compatibility: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>, category: impl Into<String>) -> Self {
        self.name = name.into();
        self.category = category.into();
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn facets<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn bom(mut self, bom: impl Into<String>) -> Self {
        self.bom = Some(bom.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn compatibility(mut self, range: VersionRange) -> Self {
        self.compatibility = Some(range);
        self
    }

    pub fn has_facet(&self, tag: &str) -> bool {
        self.facets.contains(tag)
    }

    pub fn supports(&self, platform: &Version) -> bool {
        self.compatibility
            .as_ref()
            .is_none_or(|range| range.matches(platform))
    }

    /// The dependency record this capability seeds the build with.
    pub fn to_dependency(&self) -> Dependency {
        let mut builder = Dependency::builder(self.group_id.clone(), self.artifact_id.clone())
            .scope(self.scope)
            .facets(self.facets.iter().cloned());
        if let Some(version) = &self.version {
            builder = builder.version(VersionReference::value(version.clone()));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_dependency_carries_scope_and_facets() {
        let cap = Capability::new("webflux", "org.springframework.boot", "spring-boot-starter-webflux")
            .facets(["reactive", "json"]);
        let dep = cap.to_dependency();
        assert_eq!(dep.artifact_id(), "spring-boot-starter-webflux");
        assert!(dep.has_facet("reactive"));
        assert!(dep.version().is_none());
    }

    #[test]
    fn explicit_version_becomes_literal_reference() {
        let cap = Capability::new("lombok", "org.projectlombok", "lombok").version("1.18.30");
        assert_eq!(
            cap.to_dependency().version(),
            Some(&VersionReference::value("1.18.30"))
        );
    }

    #[test]
    fn compatibility_gates_platform() {
        let cap = Capability::new("x", "g", "a")
            .compatibility(VersionRange::parse("[3.0.0,3.3.0)").unwrap());
        assert!(cap.supports(&Version::new(3, 2, 0)));
        assert!(!cap.supports(&Version::new(3, 3, 0)));
        assert!(Capability::new("y", "g", "b").supports(&Version::new(9, 0, 0)));
    }
}
