//! Version table read from TOML.
//!
//! ```toml
//! [[platform]]
//! group_id = "org.springframework.boot"       # optional
//! artifact_id = "spring-boot-dependencies"    # optional
//! version = "3.2.0"
//!
//! [platform.versions]
//! "org.jetbrains.kotlinx:kotlinx-coroutines-reactor" = "1.7.3"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::Path,
};

use serde::Deserialize;
use tracing::debug;

use kiln_core::{
    application::{
        ApplicationError,
        customizer::context::{PLATFORM_BOM, PLATFORM_GROUP},
        ports::{ManagedVersions, VersionResolver},
    },
    error::KilnResult,
};

#[derive(Debug, Deserialize)]
struct VersionsFile {
    #[serde(default)]
    platform: Vec<PlatformEntry>,
}

#[derive(Debug, Deserialize)]
struct PlatformEntry {
    #[serde(default = "default_group")]
    group_id: String,
    #[serde(default = "default_artifact")]
    artifact_id: String,
    version: String,
    #[serde(default)]
    versions: ManagedVersions,
}

fn default_group() -> String {
    PLATFORM_GROUP.to_string()
}

fn default_artifact() -> String {
    PLATFORM_BOM.to_string()
}

type Key = (String, String, String);

/// Answers from a fixed table; unknown coordinates are an error.
#[derive(Debug, Clone, Default)]
pub struct StaticVersionResolver {
    table: BTreeMap<Key, ManagedVersions>,
}

impl StaticVersionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(
        mut self,
        group_id: &str,
        artifact_id: &str,
        version: &str,
        versions: ManagedVersions,
    ) -> Self {
        self.table.insert(
            (group_id.into(), artifact_id.into(), version.into()),
            versions,
        );
        self
    }

    /// Parse a versions file. `origin` is only used in errors.
    pub fn parse(raw: &str, origin: &Path) -> KilnResult<Self> {
        let file: VersionsFile = toml::from_str(raw).map_err(|e| ApplicationError::CatalogLoad {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        let table = file
            .platform
            .into_iter()
            .map(|p| ((p.group_id, p.artifact_id, p.version), p.versions))
            .collect();
        Ok(Self { table })
    }

    pub fn load(path: &Path) -> KilnResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&raw, path)
    }

    /// Layer `other` over `self`; `other` wins per platform.
    pub fn merge(mut self, other: StaticVersionResolver) -> Self {
        self.table.extend(other.table);
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl VersionResolver for StaticVersionResolver {
    fn resolve(&self, group_id: &str, artifact_id: &str, version: &str) -> KilnResult<ManagedVersions> {
        let key = (group_id.to_string(), artifact_id.to_string(), version.to_string());
        debug!(coordinate = %format!("{group_id}:{artifact_id}:{version}"), "static lookup");
        self.table.get(&key).cloned().ok_or_else(|| {
            ApplicationError::VersionResolution {
                coordinate: format!("{group_id}:{artifact_id}:{version}"),
                reason: "not in the version table".into(),
            }
            .into()
        })
    }
}
