//! Catalog data that ships with Kiln.
//!
//! Both files are compiled into the binary, so a fresh install works
//! without any catalog on disk. `catalog.path` / `catalog.versions_path`
//! layer user files over them.

use std::path::Path;

use tracing::{debug, instrument};

use kiln_core::error::KilnResult;

use crate::catalog::InMemoryCatalog;
use crate::catalog_loader::CatalogFile;
use crate::version_resolver::StaticVersionResolver;

const CAPABILITIES: &str = include_str!("../catalog/capabilities.toml");
const VERSIONS: &str = include_str!("../catalog/versions.toml");

/// The built-in capability catalog.
#[instrument]
pub fn builtin_catalog() -> KilnResult<InMemoryCatalog> {
    let file = CatalogFile::parse(CAPABILITIES, Path::new("builtin:capabilities.toml"))?;
    debug!(capabilities = file.capabilities.len(), boms = file.boms.len(), "parsed builtin catalog");
    InMemoryCatalog::new(file.capabilities, file.boms)
}

/// The built-in platform version table.
pub fn builtin_versions() -> KilnResult<StaticVersionResolver> {
    StaticVersionResolver::parse(VERSIONS, Path::new("builtin:versions.toml"))
}
