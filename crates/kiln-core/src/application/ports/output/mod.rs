//! Driven (output) ports - implemented by infrastructure.

use std::collections::BTreeMap;
use std::path::Path;

use crate::application::services::GenerationResult;
use crate::domain::{BomDefinition, Capability, ProjectFiles};
use crate::error::KilnResult;

/// Read-only capability metadata, loaded once per process.
///
/// Implemented by:
/// - `kiln_adapters::catalog::InMemoryCatalog`
pub trait CapabilityCatalog: Send + Sync {
    fn get(&self, id: &str) -> Option<&Capability>;

    /// All capabilities, sorted by id.
    fn capabilities(&self) -> Vec<&Capability>;

    fn bom(&self, id: &str) -> Option<&BomDefinition>;

    /// All BOM definitions, sorted by id.
    fn boms(&self) -> Vec<&BomDefinition>;
}

/// Managed library versions: `group:artifact` → version.
pub type ManagedVersions = BTreeMap<String, String>;

/// Maps a platform BOM coordinate to the library versions it manages.
///
/// Implementations may block on I/O. Callers on the request path should
/// go through a deduplicating cache.
///
/// Implemented by:
/// - `kiln_adapters::version_resolver::StaticVersionResolver`
/// - `kiln_adapters::version_resolver::CachingVersionResolver`
#[cfg_attr(test, mockall::automock)]
pub trait VersionResolver: Send + Sync {
    fn resolve(&self, group_id: &str, artifact_id: &str, version: &str)
    -> KilnResult<ManagedVersions>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kiln_adapters::filesystem::LocalFilesystem` (production)
/// - `kiln_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KilnResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> KilnResult<()>;
}

/// Turns a finished generation into files.
///
/// Implemented by:
/// - `kiln_adapters::renderer::StandardRenderer`
pub trait ResultRenderer: Send + Sync {
    fn render(&self, result: &GenerationResult, output_root: &Path) -> KilnResult<ProjectFiles>;
}
