//! Infrastructure adapters for Kiln.
//!
//! This crate implements the ports defined in `kiln_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_catalog;
pub mod catalog;
pub mod catalog_loader;
pub mod filesystem;
pub mod renderer;
pub mod version_resolver;

// Re-export commonly used adapters
pub use builtin_catalog::{builtin_catalog, builtin_versions};
pub use catalog::InMemoryCatalog;
pub use catalog_loader::CatalogLoader;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::{ModelFormat, StandardRenderer};
pub use version_resolver::{CachingVersionResolver, StaticVersionResolver};
