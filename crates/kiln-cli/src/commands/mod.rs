//! Command handlers plus the adapter wiring they share.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use kiln_adapters::{
    CachingVersionResolver, CatalogLoader, InMemoryCatalog, StaticVersionResolver,
    builtin_catalog, builtin_versions,
};
use kiln_core::application::ports::{CapabilityCatalog, VersionResolver};

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod generate;
pub mod info;
pub mod init;
pub mod list;
pub mod services;

/// The built-in catalog, with `catalog.path` layered over it.
#[instrument(skip_all)]
pub fn load_catalog(config: &AppConfig) -> CliResult<Arc<dyn CapabilityCatalog>> {
    let mut catalog: InMemoryCatalog = builtin_catalog()?;
    if let Some(path) = &config.catalog.path {
        let extra = CatalogLoader::new(path).load()?;
        info!(path = %path.display(), capabilities = extra.len(), "layering user catalog");
        catalog = catalog.merge(extra)?;
    }
    debug!(capabilities = catalog.len(), "catalog ready");
    Ok(Arc::new(catalog))
}

/// The built-in version table, with `catalog.versions_path` layered over
/// it, behind a deduplicating cache.
#[instrument(skip_all)]
pub fn load_resolver(config: &AppConfig) -> CliResult<Arc<dyn VersionResolver>> {
    let mut versions: StaticVersionResolver = builtin_versions()?;
    if let Some(path) = &config.catalog.versions_path {
        let extra = StaticVersionResolver::load(path)?;
        info!(path = %path.display(), platforms = extra.len(), "layering user versions");
        versions = versions.merge(extra);
    }
    Ok(Arc::new(CachingVersionResolver::new(Arc::new(versions))))
}
