pub mod bom;
pub mod build;
pub mod capability;
pub mod common;
pub mod compose;
pub mod dependency;
pub mod description;
pub mod plugin;

pub use crate::domain::DomainError;
pub use build::Build;
pub use capability::Capability;
pub use description::ProjectDescription;
