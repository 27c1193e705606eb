//! TOML capability catalog loader.
//!
//! Reads `[[capability]]` and `[[bom]]` tables from a single file or from
//! every `*.toml` file under a directory tree.
//!
//! # File format
//!
//! ```toml
//! [[capability]]
//! id          = "cloud-gateway"
//! name        = "Gateway"
//! category    = "Spring Cloud Routing"
//! group_id    = "org.springframework.cloud"
//! artifact_id = "spring-cloud-starter-gateway"
//! scope       = "compile"                # optional, default compile
//! facets      = ["web"]                  # optional
//! bom         = "spring-cloud"           # optional, id of a [[bom]]
//! compatibility = "[3.1.0,3.4.0-M1)"     # optional version range
//!
//! [[bom]]
//! id               = "spring-cloud"
//! group_id         = "org.springframework.cloud"
//! artifact_id      = "spring-cloud-dependencies"
//! version_property = "spring-cloud.version"
//!
//! [[bom.mappings]]
//! compatibility = "[3.2.0-M1,3.4.0-M1)"
//! version       = "2023.0.3"
//! ```
//!
//! A malformed range fails the file it is in.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use kiln_core::{
    application::ApplicationError,
    domain::{BomDefinition, Capability},
    error::KilnResult,
};

use crate::catalog::InMemoryCatalog;

/// Deserialized catalog file.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "capability")]
    pub capabilities: Vec<Capability>,
    #[serde(default, rename = "bom")]
    pub boms: Vec<BomDefinition>,
}

impl CatalogFile {
    /// Parse one file's worth of TOML. `origin` is only used in errors.
    pub fn parse(raw: &str, origin: &Path) -> KilnResult<Self> {
        toml::from_str(raw).map_err(|e| {
            ApplicationError::CatalogLoad {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn read(path: &Path) -> KilnResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&raw, path)
    }
}

/// Loads an [`InMemoryCatalog`] from a file or directory.
pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// # Errors
    ///
    /// [`ApplicationError::CatalogLoad`] when the path is missing or a single
    /// catalog file is invalid. Inside a directory, invalid files are skipped
    /// with a `WARN` log.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> KilnResult<InMemoryCatalog> {
        if !self.path.exists() {
            return Err(ApplicationError::CatalogLoad {
                path: self.path.clone(),
                reason: "path not found".into(),
            }
            .into());
        }

        if self.path.is_file() {
            let file = CatalogFile::read(&self.path)?;
            return InMemoryCatalog::new(file.capabilities, file.boms);
        }

        let mut capabilities = Vec::new();
        let mut boms = Vec::new();
        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "toml"));

        for entry in walker {
            match CatalogFile::read(entry.path()) {
                Ok(file) => {
                    debug!(
                        file = %entry.path().display(),
                        capabilities = file.capabilities.len(),
                        boms = file.boms.len(),
                        "loaded catalog file"
                    );
                    capabilities.extend(file.capabilities);
                    boms.extend(file.boms);
                }
                Err(e) => {
                    warn!(
                        file = %entry.path().display(),
                        error = %e,
                        "skipping catalog file due to load error"
                    );
                }
            }
        }

        debug!(capabilities = capabilities.len(), "finished loading catalog");
        InMemoryCatalog::new(capabilities, boms)
    }
}
