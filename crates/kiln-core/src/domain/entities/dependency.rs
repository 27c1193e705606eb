//! Dependency records.
//!
//! A [`Dependency`] is immutable once built. Customizers that need a
//! different artifact remove the record and add a new one; `with_*`
//! helpers make that a one-liner.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::entities::common::{Coordinate, VersionReference};
use crate::domain::value_objects::DependencyScope;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<VersionReference>,
    scope: DependencyScope,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    facets: BTreeSet<String>,
}

impl Dependency {
    pub fn builder(group_id: impl Into<String>, artifact_id: impl Into<String>) -> DependencyBuilder {
        DependencyBuilder {
            coordinate: Coordinate::new(group_id, artifact_id),
            version: None,
            scope: DependencyScope::default(),
            facets: BTreeSet::new(),
        }
    }

    /// Shorthand for a compile-scope, unversioned record.
    pub fn of(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self::builder(group_id, artifact_id).build()
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }
    pub fn group_id(&self) -> &str {
        &self.coordinate.group_id
    }
    pub fn artifact_id(&self) -> &str {
        &self.coordinate.artifact_id
    }
    pub fn version(&self) -> Option<&VersionReference> {
        self.version.as_ref()
    }
    pub fn scope(&self) -> DependencyScope {
        self.scope
    }
    pub fn facets(&self) -> &BTreeSet<String> {
        &self.facets
    }

    pub fn has_facet(&self, tag: &str) -> bool {
        self.facets.contains(tag)
    }

    /// A copy pointing at a different artifact in the same group.
    pub fn with_artifact_id(&self, artifact_id: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.coordinate.artifact_id = artifact_id.into();
        copy
    }

    pub fn with_scope(&self, scope: DependencyScope) -> Self {
        let mut copy = self.clone();
        copy.scope = scope;
        copy
    }

    pub fn with_version(&self, version: VersionReference) -> Self {
        let mut copy = self.clone();
        copy.version = Some(version);
        copy
    }

    pub fn into_builder(self) -> DependencyBuilder {
        DependencyBuilder {
            coordinate: self.coordinate,
            version: self.version,
            scope: self.scope,
            facets: self.facets,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DependencyBuilder {
    coordinate: Coordinate,
    version: Option<VersionReference>,
    scope: DependencyScope,
    facets: BTreeSet<String>,
}

impl DependencyBuilder {
    pub fn version(mut self, version: VersionReference) -> Self {
        self.version = Some(version);
        self
    }

    pub fn scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn facet(mut self, tag: impl Into<String>) -> Self {
        self.facets.insert(tag.into());
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

    pub fn build(self) -> Dependency {
        Dependency {
            coordinate: self.coordinate,
            version: self.version,
            scope: self.scope,
            facets: self.facets,
        }
    }
}
