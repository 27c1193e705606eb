//! The mutable build model customizers rewrite.
//!
//! A [`Build`] is owned by a single generation request. Every mutation is
//! synchronous and visible to the next read; nothing here does I/O.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::bom::{Bom, BomContainer};
use crate::domain::entities::common::KeyedContainer;
use crate::domain::entities::dependency::Dependency;
use crate::domain::entities::plugin::{Plugin, PluginContainer};
use crate::domain::error::DomainError;
use crate::domain::value_objects::BuildSystem;

// ── Properties ───────────────────────────────────────────────────────────────

/// Build properties. Last writer wins; iteration is sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyContainer {
    values: BTreeMap<String, String>,
}

impl PropertyContainer {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ── Repositories ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub name: String,
    pub url: String,
    pub snapshots_enabled: bool,
}

impl Repository {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            snapshots_enabled: false,
        }
    }

    pub fn with_snapshots(mut self) -> Self {
        self.snapshots_enabled = true;
        self
    }
}

// ── Profiles ─────────────────────────────────────────────────────────────────

/// A named sub-scope with its own dependencies, plugins and properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "KeyedContainer::is_empty")]
    pub dependencies: KeyedContainer<Dependency>,
    #[serde(skip_serializing_if = "PluginContainer::is_empty")]
    pub plugins: PluginContainer,
    #[serde(skip_serializing_if = "PropertyContainer::is_empty")]
    pub properties: PropertyContainer,
}

impl Profile {
    pub fn add_dependency(&mut self, id: impl Into<String>, dependency: Dependency) {
        self.dependencies.add(id, dependency);
    }
}

/// Where a plugin is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginScope {
    Root,
    Profile(String),
}

// ── Settings ─────────────────────────────────────────────────────────────────

/// Project identity copied from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSettings {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub name: String,
    pub package_name: String,
}

// ── Build ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Build {
    build_system: BuildSystem,
    settings: BuildSettings,
    dependencies: KeyedContainer<Dependency>,
    boms: BomContainer,
    plugins: PluginContainer,
    properties: PropertyContainer,
    #[serde(skip_serializing_if = "KeyedContainer::is_empty")]
    profiles: KeyedContainer<Profile>,
    #[serde(skip_serializing_if = "KeyedContainer::is_empty")]
    repositories: KeyedContainer<Repository>,
}

impl Build {
    pub fn new(build_system: BuildSystem, settings: BuildSettings) -> Self {
        Self {
            build_system,
            settings,
            dependencies: KeyedContainer::new(),
            boms: BomContainer::default(),
            plugins: PluginContainer::default(),
            properties: PropertyContainer::default(),
            profiles: KeyedContainer::new(),
            repositories: KeyedContainer::new(),
        }
    }

    pub fn build_system(&self) -> BuildSystem {
        self.build_system
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    // ── dependencies ─────────────────────────────────────────────────────

    /// Re-adding an id replaces the record.
    pub fn add_dependency(&mut self, id: impl Into<String>, dependency: Dependency) {
        self.dependencies.add(id, dependency);
    }

    pub fn remove_dependency(&mut self, id: &str) -> Option<Dependency> {
        self.dependencies.remove(id)
    }

    pub fn has_dependency(&self, id: &str) -> bool {
        self.dependencies.has(id)
    }

    pub fn get_dependency(&self, id: &str) -> Option<&Dependency> {
        self.dependencies.get(id)
    }

    pub fn dependencies(&self) -> impl Iterator<Item = (&str, &Dependency)> {
        self.dependencies.iter()
    }

    pub fn dependency_ids(&self) -> Vec<String> {
        self.dependencies.keys().map(str::to_string).collect()
    }

    /// Whether any dependency currently in the root scope carries `tag`.
    pub fn has_facet(&self, tag: &str) -> bool {
        self.dependencies.values().any(|d| d.has_facet(tag))
    }

    // ── BOMs ─────────────────────────────────────────────────────────────

    pub fn add_bom(&mut self, id: impl Into<String>, bom: Bom) {
        self.boms.add(id, bom);
    }

    pub fn remove_bom(&mut self, id: &str) -> Option<Bom> {
        self.boms.remove(id)
    }

    pub fn has_bom(&self, id: &str) -> bool {
        self.boms.has(id)
    }

    pub fn get_bom(&self, id: &str) -> Option<&Bom> {
        self.boms.get(id)
    }

    pub fn boms(&self) -> &BomContainer {
        &self.boms
    }

    // ── properties ───────────────────────────────────────────────────────

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.set(key, value);
    }

    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.has(key)
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &PropertyContainer {
        &self.properties
    }

    // ── plugins ──────────────────────────────────────────────────────────

    /// Configure the plugin `group:artifact` in `scope`, declaring it if it
    /// is not there yet.
    ///
    /// The configurator works on a copy. When the result is restricted to a
    /// different build tool the copy is discarded and the model is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`DomainError::IncompatiblePlugin`] when the configured plugin is
    /// only valid for another build system.
    pub fn add_plugin(
        &mut self,
        scope: &PluginScope,
        group_id: &str,
        artifact_id: &str,
        configure: impl FnOnce(&mut Plugin),
    ) -> Result<(), DomainError> {
        let existing = match scope {
            PluginScope::Root => self.plugins.get(group_id, artifact_id),
            PluginScope::Profile(name) => self
                .profiles
                .get(name)
                .and_then(|p| p.plugins.get(group_id, artifact_id)),
        };
        let mut plugin = existing
            .cloned()
            .unwrap_or_else(|| Plugin::new(group_id, artifact_id));
        configure(&mut plugin);

        if let Some(required) = plugin.only_for {
            if required != self.build_system {
                return Err(DomainError::IncompatiblePlugin {
                    coordinate: plugin.coordinate.to_string(),
                    required: required.to_string(),
                    actual: self.build_system.to_string(),
                });
            }
        }

        match scope {
            PluginScope::Root => self.plugins.put(plugin),
            PluginScope::Profile(name) => self.profile(name).plugins.put(plugin),
        }
        Ok(())
    }

    pub fn plugins(&self) -> &PluginContainer {
        &self.plugins
    }

    // ── profiles ─────────────────────────────────────────────────────────

    /// The profile `name`, created empty on first access.
    pub fn profile(&mut self, name: &str) -> &mut Profile {
        self.profiles.get_or_insert_with(name, Profile::default)
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn profiles(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.profiles.iter()
    }

    // ── repositories ─────────────────────────────────────────────────────

    pub fn add_repository(&mut self, id: impl Into<String>, repository: Repository) {
        self.repositories.add(id, repository);
    }

    pub fn has_repository(&self, id: &str) -> bool {
        self.repositories.has(id)
    }

    pub fn repositories(&self) -> impl Iterator<Item = (&str, &Repository)> {
        self.repositories.iter()
    }
}
