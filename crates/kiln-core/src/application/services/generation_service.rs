//! Generation service - main application orchestrator.
//!
//! A request goes through four stages:
//! 1. Validate the description against the capability catalog
//! 2. Seed a build model with the requested capabilities
//! 3. Run the build, compose and service connection pipelines
//! 4. Render and write the result (see [`OutputService`])

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        customizer::{self, GenerationContext, Pipeline},
        ports::{CapabilityCatalog, Filesystem, ResultRenderer, VersionResolver},
    },
    domain::{
        Build, BuildSettings, ComposeFile, DomainError, DomainValidator as validator,
        ProjectDescription, ProjectFiles, ServiceCatalog, ServiceConnections,
    },
    error::KilnResult,
};

/// Everything one request produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub request_id: Uuid,
    pub description: ProjectDescription,
    pub build: Build,
    pub compose: ComposeFile,
    pub connections: ServiceConnections,
    /// Customizer names in the order they ran, per pipeline.
    pub applied: Vec<String>,
}

/// The build before any customizer has run: one record per requested
/// capability, keyed by its catalog id.
///
/// # Errors
///
/// [`DomainError::UnknownCapability`] for an id the catalog lacks.
pub fn seed_build(
    description: &ProjectDescription,
    catalog: &dyn CapabilityCatalog,
) -> KilnResult<Build> {
    let settings = BuildSettings {
        group: description.group().to_string(),
        artifact: description.artifact().to_string(),
        version: description.version().to_string(),
        name: description.name().to_string(),
        package_name: description.package_name().to_string(),
    };
    let mut build = Build::new(description.build_system(), settings);
    for id in description.dependencies() {
        let capability = catalog
            .get(id)
            .ok_or_else(|| DomainError::UnknownCapability { id: id.clone() })?;
        build.add_dependency(id.clone(), capability.to_dependency());
    }
    Ok(build)
}

/// Runs the customizer pipelines for a request.
///
/// Catalogs and the resolver are shared across requests; every request
/// gets fresh targets.
pub struct GenerationService {
    catalog: Arc<dyn CapabilityCatalog>,
    services: Arc<ServiceCatalog>,
    resolver: Arc<dyn VersionResolver>,
    build_pipeline: Pipeline<Build>,
    compose_pipeline: Pipeline<ComposeFile>,
    connections_pipeline: Pipeline<ServiceConnections>,
}

impl GenerationService {
    /// A service with every built-in rule registered.
    pub fn new(
        catalog: Arc<dyn CapabilityCatalog>,
        services: Arc<ServiceCatalog>,
        resolver: Arc<dyn VersionResolver>,
    ) -> Self {
        Self::with_pipelines(
            catalog,
            services,
            resolver,
            customizer::build::default_pipeline(),
            customizer::compose::compose_pipeline(),
            customizer::compose::connections_pipeline(),
        )
    }

    pub fn with_pipelines(
        catalog: Arc<dyn CapabilityCatalog>,
        services: Arc<ServiceCatalog>,
        resolver: Arc<dyn VersionResolver>,
        build_pipeline: Pipeline<Build>,
        compose_pipeline: Pipeline<ComposeFile>,
        connections_pipeline: Pipeline<ServiceConnections>,
    ) -> Self {
        Self {
            catalog,
            services,
            resolver,
            build_pipeline,
            compose_pipeline,
            connections_pipeline,
        }
    }

    pub fn catalog(&self) -> &dyn CapabilityCatalog {
        self.catalog.as_ref()
    }

    pub fn services(&self) -> &ServiceCatalog {
        &self.services
    }

    /// Produce the build model and orchestration output for `description`.
    ///
    /// # Errors
    ///
    /// - Validation errors for unknown or incompatible capabilities
    /// - [`ApplicationError::CustomizationFailed`] naming the failing rule
    #[instrument(skip_all, fields(request = %description))]
    pub fn generate(&self, description: &ProjectDescription) -> KilnResult<GenerationResult> {
        let request_id = Uuid::new_v4();
        info!(%request_id, "generating project");

        validator::validate_description(description, |id| self.catalog.get(id))?;

        let ctx = GenerationContext::new(
            description,
            self.catalog.as_ref(),
            &self.services,
            self.resolver.as_ref(),
        );

        let mut build = seed_build(description, self.catalog.as_ref())?;
        let mut applied = self.build_pipeline.run(&mut build, &ctx)?;

        let mut compose = ComposeFile::default();
        applied.extend(self.compose_pipeline.run(&mut compose, &ctx)?);

        let mut connections = ServiceConnections::default();
        applied.extend(self.connections_pipeline.run(&mut connections, &ctx)?);

        info!(
            dependencies = build.dependency_ids().len(),
            compose_services = compose.len(),
            connections = connections.len(),
            "generation complete"
        );

        Ok(GenerationResult {
            request_id,
            description: description.clone(),
            build,
            compose,
            connections,
            applied,
        })
    }
}

/// Renders a [`GenerationResult`] and writes it to disk.
pub struct OutputService {
    renderer: Box<dyn ResultRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl OutputService {
    pub fn new(renderer: Box<dyn ResultRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Render without writing.
    pub fn render(&self, result: &GenerationResult, output: &Path) -> KilnResult<ProjectFiles> {
        let files = self.renderer.render(result, output)?;
        validator::validate_project_files(&files)?;
        Ok(files)
    }

    /// Render and write under `output`.
    ///
    /// An existing `output` is an error unless `force` is set. A failed
    /// write removes whatever was written.
    #[instrument(skip_all, fields(output = %output.display(), force))]
    pub fn write(
        &self,
        result: &GenerationResult,
        output: &Path,
        force: bool,
    ) -> KilnResult<ProjectFiles> {
        let files = self.render(result, output)?;

        if self.filesystem.exists(files.root()) {
            if !force {
                return Err(ApplicationError::OutputExists {
                    path: files.root().to_path_buf(),
                }
                .into());
            }
            warn!("overwriting existing output");
            self.filesystem.remove_dir_all(files.root())?;
        }

        match self.write_all(&files) {
            Ok(()) => {
                info!(files = files.file_count(), "output written");
                Ok(files)
            }
            Err(e) => {
                warn!("write failed, attempting rollback");
                self.rollback(files.root());
                Err(e)
            }
        }
    }

    fn write_all(&self, files: &ProjectFiles) -> KilnResult<()> {
        self.filesystem.create_dir_all(files.root())?;
        for file in files.files() {
            let path = files.root().join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
        }
        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(error = %e, path = %root.display(), "rollback failed");
        } else {
            info!("rollback successful");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::customizer::testing::{NothingManaged, TestCatalog};
    use crate::application::customizer::{Customizer, Pipeline};
    use crate::domain::{Condition, Version};

    fn service() -> GenerationService {
        GenerationService::new(
            Arc::new(TestCatalog::new()),
            ServiceCatalog::builtin(),
            Arc::new(NothingManaged),
        )
    }

    fn describe(deps: &[&str]) -> ProjectDescription {
        ProjectDescription::builder()
            .platform(Version::new(3, 2, 0))
            .dependencies(deps.iter().copied())
            .build()
            .unwrap()
    }

    #[test]
    fn seed_keys_records_by_catalog_id() {
        let catalog = TestCatalog::new();
        let build = seed_build(&describe(&["web", "lombok"]), &catalog).unwrap();
        assert_eq!(build.dependency_ids(), vec!["web", "lombok"]);
        assert_eq!(build.settings().group, "com.example");
    }

    #[test]
    fn unknown_capability_is_rejected_before_any_rule() {
        let err = service().generate(&describe(&["web", "nope"])).unwrap_err();
        assert!(matches!(
            err.domain_cause(),
            Some(DomainError::UnknownCapability { id }) if id == "nope"
        ));
    }

    #[test]
    fn session_marker_never_reaches_the_result() {
        let result = service()
            .generate(&describe(&["session", "data-redis"]))
            .unwrap();
        assert!(result.build.has_dependency("spring-session-data-redis"));
        assert!(!result.build.has_dependency("session"));
        assert!(result.applied.contains(&"SessionMarkerCleanupCustomizer".to_string()));
    }

    #[test]
    fn compose_and_connections_are_filled() {
        let result = service()
            .generate(&describe(&["postgresql", "docker-compose", "testcontainers"]))
            .unwrap();
        assert!(result.compose.has("postgres"));
        assert!(result.connections.has("postgres"));
        assert!(result.build.has_dependency("testcontainers-postgresql"));
    }

    struct Failing;

    impl Customizer<Build> for Failing {
        fn name(&self) -> &str {
            "Failing"
        }

        fn activation(&self) -> Condition {
            Condition::requested("web")
        }

        fn customize(&self, _build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
            Err(DomainError::inconsistency("web", "boom").into())
        }
    }

    #[test]
    fn failing_rule_aborts_generation() {
        let service = GenerationService::with_pipelines(
            Arc::new(TestCatalog::new()),
            ServiceCatalog::builtin(),
            Arc::new(NothingManaged),
            Pipeline::new("build").register(Failing),
            Pipeline::new("compose"),
            Pipeline::new("service-connections"),
        );
        let err = service.generate(&describe(&["web"])).unwrap_err();
        assert!(matches!(
            err,
            crate::error::KilnError::Application(ApplicationError::CustomizationFailed {
                ref customizer,
                ..
            }) if customizer == "Failing"
        ));
    }
}
