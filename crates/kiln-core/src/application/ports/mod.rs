//! Application ports (traits) for external dependencies.
//!
//! Driven ports are called by the application and implemented in
//! `kiln-adapters`:
//!
//! - `CapabilityCatalog`: capability and BOM metadata
//! - `VersionResolver`: platform version → managed library versions
//! - `Filesystem`: file operations
//! - `ResultRenderer`: generation result → files

pub mod output;

pub use output::{CapabilityCatalog, Filesystem, ManagedVersions, ResultRenderer, VersionResolver};

#[cfg(test)]
pub use output::MockVersionResolver;
