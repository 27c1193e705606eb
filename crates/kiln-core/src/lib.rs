//! Kiln Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Kiln, the
//! build customization engine behind project generation: a request names
//! a platform version, a build tool, a language and a set of capabilities;
//! Kiln turns it into a build model and the orchestration files that go
//! with it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             kiln-cli (CLI)              │
//! │       (Implements Driving Ports)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (GenerationService, CatalogService, ..) │
//! │   Customizer pipelines: build, compose, │
//! │          service connections            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Catalog, VersionResolver, Filesystem,  │
//! │               Renderer)                 │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      kiln-adapters (Infrastructure)     │
//! │ (TOML catalog, caching resolver, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Version, Build, Condition, Services)  │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kiln_core::prelude::*;
//!
//! # fn run(catalog: Arc<dyn CapabilityCatalog>, resolver: Arc<dyn VersionResolver>) -> KilnResult<()> {
//! let description = ProjectDescription::builder()
//!     .platform_str("3.2.0")?
//!     .build_system(BuildSystem::Gradle)
//!     .dependencies(["web", "data-jpa", "postgresql", "docker-compose"])
//!     .build()?;
//!
//! let service = GenerationService::new(catalog, ServiceCatalog::builtin(), resolver);
//! let result = service.generate(&description)?;
//! assert!(result.compose.has("postgres"));
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CapabilityFilter, CapabilityInfo, CatalogService, Customizer, GenerationContext,
        GenerationResult, GenerationService, OutputService, Pipeline,
        ports::{CapabilityCatalog, Filesystem, ManagedVersions, ResultRenderer, VersionResolver},
    };
    pub use crate::domain::{
        Build, BuildSystem, Capability, ComposeFile, ComposeService, Condition, Dependency,
        DependencyScope, Language, ProjectDescription, ProjectFiles, ServiceCatalog,
        ServiceConnections, Version, VersionRange,
    };
    pub use crate::error::{KilnError, KilnResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
