//! Core domain layer for Kiln.
//!
//! Pure data and rules: versions, the build model, activation conditions,
//! the service catalog, and the orchestration output model. All I/O lives
//! behind ports in the application layer.
//!
//! - **No I/O**: nothing here touches the filesystem or network
//! - **No tracing**: observability belongs to the outer layers
//! - **Owned values**: entities are `Clone`; copying is how branches stay
//!   independent of shared originals
pub mod condition;
pub mod entities;
pub mod error;
pub mod service_catalog;
pub mod value_objects;
pub mod version;

mod validation;

pub use condition::{Condition, ConditionContext};
pub use entities::{
    bom::{Bom, BomContainer, BomDefinition, BomMapping},
    build::{Build, BuildSettings, PluginScope, Profile, PropertyContainer, Repository},
    capability::Capability,
    common::{Coordinate, KeyedContainer, VersionReference},
    compose::{
        ComposeFile, ComposeService, GeneratedFile, ProjectFiles, ServiceConnection,
        ServiceConnections,
    },
    dependency::{Dependency, DependencyBuilder},
    description::{DescriptionBuilder, HasPlatform, NoPlatform, ProjectDescription},
    plugin::{Configuration, Execution, Plugin, PluginContainer, Setting, SettingValue},
};
pub use error::{DomainError, ErrorCategory};
pub use service_catalog::{SERVICE_REGISTRY, ServiceCatalog, ServiceDef, ServiceDescriptor};
pub use validation::DomainValidator;
pub use value_objects::{BuildSystem, DependencyScope, Language};
pub use version::{Qualifier, Version, VersionRange};

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Capability> {
        vec![
            Capability::new("web", "org.springframework.boot", "spring-boot-starter-web"),
            Capability::new("legacy", "com.example", "legacy-starter")
                .compatibility(VersionRange::parse("[2.7.0,3.0.0-M1)").unwrap()),
        ]
    }

    fn lookup<'a>(caps: &'a [Capability]) -> impl Fn(&str) -> Option<&'a Capability> {
        move |id| caps.iter().find(|c| c.id == id)
    }

    fn description(deps: &[&str]) -> ProjectDescription {
        ProjectDescription::builder()
            .platform(Version::new(3, 2, 0))
            .dependencies(deps.iter().copied())
            .build()
            .unwrap()
    }

    #[test]
    fn validator_accepts_known_capabilities() {
        let caps = catalog();
        assert!(DomainValidator::validate_description(&description(&["web"]), lookup(&caps)).is_ok());
    }

    #[test]
    fn validator_rejects_unknown_capability() {
        let caps = catalog();
        let err = DomainValidator::validate_description(&description(&["web", "nope"]), lookup(&caps))
            .unwrap_err();
        assert_eq!(err, DomainError::UnknownCapability { id: "nope".into() });
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn validator_rejects_incompatible_platform() {
        let caps = catalog();
        let err = DomainValidator::validate_description(&description(&["legacy"]), lookup(&caps))
            .unwrap_err();
        assert!(matches!(err, DomainError::IncompatibleCapability { ref range, .. } if range == "[2.7.0,3.0.0-M1)"));
        assert_eq!(err.category(), ErrorCategory::Compatibility);
    }

    #[test]
    fn malformed_range_is_internal() {
        let err = VersionRange::parse("[3.0.0").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.suggestions().is_empty());
    }
}
