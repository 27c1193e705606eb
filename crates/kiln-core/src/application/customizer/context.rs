//! Read-only request context handed to every customizer.

use std::cell::OnceCell;

use tracing::debug;

use crate::application::ports::{CapabilityCatalog, ManagedVersions, VersionResolver};
use crate::domain::{
    BuildSystem, Capability, ConditionContext, Dependency, DomainError, Language,
    ProjectDescription, ServiceCatalog, Version,
};
use crate::error::KilnResult;

/// Group of the platform BOM the version catalog is keyed by.
pub const PLATFORM_GROUP: &str = "org.springframework.boot";
pub const PLATFORM_BOM: &str = "spring-boot-dependencies";

/// Everything a customizer may consult besides its target.
///
/// Condition queries answer for the *original* request. Managed versions
/// are resolved lazily, at most once per request.
pub struct GenerationContext<'a> {
    description: &'a ProjectDescription,
    catalog: &'a dyn CapabilityCatalog,
    services: &'a ServiceCatalog,
    resolver: &'a dyn VersionResolver,
    managed: OnceCell<KilnResult<ManagedVersions>>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        description: &'a ProjectDescription,
        catalog: &'a dyn CapabilityCatalog,
        services: &'a ServiceCatalog,
        resolver: &'a dyn VersionResolver,
    ) -> Self {
        Self {
            description,
            catalog,
            services,
            resolver,
            managed: OnceCell::new(),
        }
    }

    pub fn description(&self) -> &ProjectDescription {
        self.description
    }

    pub fn catalog(&self) -> &dyn CapabilityCatalog {
        self.catalog
    }

    pub fn services(&self) -> &ServiceCatalog {
        self.services
    }

    pub fn capability(&self, id: &str) -> Option<&Capability> {
        self.catalog.get(id)
    }

    /// The seed record for catalog id `id`.
    ///
    /// # Errors
    ///
    /// [`DomainError::CatalogInconsistency`] when a rule needs a capability
    /// the catalog does not define.
    pub fn dependency(&self, id: &str) -> KilnResult<Dependency> {
        self.catalog
            .get(id)
            .map(Capability::to_dependency)
            .ok_or_else(|| {
                DomainError::inconsistency(id, "required by a customizer but not in the catalog")
                    .into()
            })
    }

    /// Library versions managed by the requested platform.
    pub fn managed_versions(&self) -> KilnResult<&ManagedVersions> {
        let resolved = self.managed.get_or_init(|| {
            let version = self.description.platform_version().to_string();
            debug!(platform = %version, "resolving managed versions");
            self.resolver.resolve(PLATFORM_GROUP, PLATFORM_BOM, &version)
        });
        match resolved {
            Ok(versions) => Ok(versions),
            Err(e) => Err(e.clone()),
        }
    }
}

impl ConditionContext for GenerationContext<'_> {
    fn is_requested(&self, key: &str) -> bool {
        self.description.is_requested(key)
    }

    fn has_requested_facet(&self, facet: &str) -> bool {
        self.description
            .dependencies()
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .any(|c| c.has_facet(facet))
    }

    fn platform_version(&self) -> &Version {
        self.description.platform_version()
    }

    fn build_system(&self) -> BuildSystem {
        self.description.build_system()
    }

    fn language(&self) -> Language {
        self.description.language()
    }
}
