//! Application layer for Kiln.
//!
//! This layer contains:
//! - **Customizers**: conditionally activated rules and the pipeline that
//!   runs them
//! - **Services**: use case orchestration (GenerationService, CatalogService)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! Business rules on data live in `crate::domain`; rules that rewrite a
//! generation target live in [`customizer`].

pub mod customizer;
pub mod error;
pub mod ports;
pub mod services;

pub use customizer::{Customizer, GenerationContext, Pipeline};

pub use services::{
    CapabilityFilter, CapabilityInfo, CatalogService, GenerationResult, GenerationService,
    OutputService,
};

pub use ports::{CapabilityCatalog, Filesystem, ManagedVersions, ResultRenderer, VersionResolver};

pub use error::ApplicationError;
