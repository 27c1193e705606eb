//! Orchestration output: compose services, test service connections, and
//! the generated file set.
//!
//! Everything here is keyed and sorted so identical inputs produce
//! byte-identical output.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::error::DomainError;

// ── Compose services ─────────────────────────────────────────────────────────

/// One service in the orchestration descriptor.
///
/// Values are owned copies; changing one never touches the catalog
/// descriptor it was derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeService {
    pub image: String,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub ports: BTreeSet<u16>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl ComposeService {
    pub fn new(image: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// `image:tag`.
    pub fn image_tag(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn with_environment(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.ports.insert(port);
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Fold `later` into `self`. Scalars from `later` win, maps are merged
    /// with `later` winning on key collisions, ports are unioned.
    pub fn merge(&mut self, later: ComposeService) {
        if !later.image.is_empty() {
            self.image = later.image;
        }
        if !later.tag.is_empty() {
            self.tag = later.tag;
        }
        if later.website.is_some() {
            self.website = later.website;
        }
        if later.command.is_some() {
            self.command = later.command;
        }
        self.environment.extend(later.environment);
        self.labels.extend(later.labels);
        self.ports.extend(later.ports);
    }
}

/// Services by compose name, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposeFile {
    services: BTreeMap<String, ComposeService>,
}

impl ComposeFile {
    /// Add or merge into the service called `name`.
    pub fn add(&mut self, name: impl Into<String>, service: ComposeService) {
        let name = name.into();
        match self.services.get_mut(&name) {
            Some(existing) => existing.merge(service),
            None => {
                self.services.insert(name, service);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ComposeService> {
        self.services.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ComposeService> {
        self.services.remove(name)
    }

    pub fn services(&self) -> impl Iterator<Item = (&str, &ComposeService)> {
        self.services.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

// ── Service connections ──────────────────────────────────────────────────────

/// A container the generated integration tests start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceConnection {
    pub id: String,
    /// `image:tag`.
    pub image: String,
    pub container_class: String,
    /// Whether the container class is the generic one, needing an explicit
    /// connection name.
    pub generic: bool,
}

impl ServiceConnection {
    pub fn of_container(
        id: impl Into<String>,
        image: impl Into<String>,
        container_class: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            image: image.into(),
            container_class: container_class.into(),
            generic: false,
        }
    }

    pub fn of_generic_container(id: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: image.into(),
            container_class: "GenericContainer".into(),
            generic: true,
        }
    }
}

/// Connections keyed by id, sorted. Re-adding an id replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServiceConnections {
    connections: BTreeMap<String, ServiceConnection>,
}

impl ServiceConnections {
    pub fn add(&mut self, connection: ServiceConnection) {
        self.connections.insert(connection.id.clone(), connection);
    }

    pub fn get(&self, id: &str) -> Option<&ServiceConnection> {
        self.connections.get(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.connections.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceConnection> {
        self.connections.values()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

// ── Generated files ──────────────────────────────────────────────────────────

/// Files ready to be written under `root`.
#[derive(Debug, Clone)]
pub struct ProjectFiles {
    pub(crate) root: PathBuf,
    pub(crate) files: Vec<GeneratedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

impl ProjectFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: String) {
        self.files.push(GeneratedFile {
            path: path.into(),
            content,
        });
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: String) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == std::path::Path::new(path))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for file in &self.files {
            if file.path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: file.path.display().to_string(),
                });
            }
            if !seen.insert(&file.path) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}
