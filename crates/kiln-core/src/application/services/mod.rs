//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer, the customizer pipelines and the
//! ports to accomplish use cases like "generate a project" or "list the
//! catalog".

pub mod catalog_service;
pub mod generation_service;

pub use catalog_service::{CapabilityFilter, CapabilityInfo, CatalogService};
pub use generation_service::{GenerationResult, GenerationService, OutputService, seed_build};
