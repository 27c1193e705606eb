//! Shared fixtures for customizer unit tests.

use std::sync::Arc;

use crate::application::customizer::GenerationContext;
use crate::application::ports::{CapabilityCatalog, ManagedVersions, VersionResolver};
use crate::application::services::seed_build;
use crate::domain::{
    BomDefinition, BomMapping, Build, BuildSystem, Capability, DependencyScope, Language,
    ProjectDescription, ServiceCatalog, Version, VersionRange,
};
use crate::error::KilnResult;

const BOOT: &str = "org.springframework.boot";

fn starter(id: &str, artifact: &str) -> Capability {
    Capability::new(id, BOOT, artifact)
}

/// A small catalog covering every id the built-in rules touch.
pub(crate) struct TestCatalog {
    capabilities: Vec<Capability>,
    boms: Vec<BomDefinition>,
}

impl TestCatalog {
    pub(crate) fn new() -> Self {
        let capabilities = vec![
            starter("web", "spring-boot-starter-web").facets(["web", "json"]),
            starter("webflux", "spring-boot-starter-webflux").facets(["reactive", "json"]),
            Capability::new(
                "cloud-gateway",
                "org.springframework.cloud",
                "spring-cloud-starter-gateway",
            )
            .bom("spring-cloud"),
            starter("data-redis", "spring-boot-starter-data-redis").facets(["redis"]),
            starter("data-redis-reactive", "spring-boot-starter-data-redis-reactive")
                .facets(["redis", "reactive"]),
            starter("data-mongodb", "spring-boot-starter-data-mongodb").facets(["mongodb"]),
            starter("data-mongodb-reactive", "spring-boot-starter-data-mongodb-reactive")
                .facets(["mongodb", "reactive"]),
            starter("data-cassandra", "spring-boot-starter-data-cassandra").facets(["cassandra"]),
            starter("data-cassandra-reactive", "spring-boot-starter-data-cassandra-reactive")
                .facets(["cassandra", "reactive"]),
            starter("data-jpa", "spring-boot-starter-data-jpa"),
            Capability::new("session", "org.springframework.session", "spring-session-core")
                .facets(["marker"]),
            starter("jdbc", "spring-boot-starter-jdbc"),
            Capability::new("hazelcast", "com.hazelcast", "hazelcast"),
            Capability::new("kafka", "org.springframework.kafka", "spring-kafka").facets(["kafka"]),
            starter("amqp", "spring-boot-starter-amqp").facets(["rabbitmq"]),
            starter("security", "spring-boot-starter-security"),
            Capability::new("lombok", "org.projectlombok", "lombok")
                .scope(DependencyScope::Provided),
            Capability::new("testcontainers", "org.testcontainers", "junit-jupiter")
                .scope(DependencyScope::TestCompile),
            Capability::new("docker-compose", BOOT, "spring-boot-docker-compose")
                .scope(DependencyScope::Runtime),
            Capability::new("postgresql", "org.postgresql", "postgresql")
                .scope(DependencyScope::Runtime)
                .facets(["postgres"]),
            Capability::new("vaadin", "com.vaadin", "vaadin-spring-boot-starter").bom("vaadin"),
            Capability::new("native", "org.graalvm.buildtools", "native-maven-plugin")
                .facets(["marker"]),
        ];
        let boms = vec![
            BomDefinition {
                id: "spring-cloud".into(),
                group_id: "org.springframework.cloud".into(),
                artifact_id: "spring-cloud-dependencies".into(),
                version_property: "spring-cloud.version".into(),
                order: i32::MAX,
                mappings: vec![
                    mapping("[3.1.0,3.2.0-M1)", "2022.0.5"),
                    mapping("[3.2.0-M1,3.4.0-M1)", "2023.0.3"),
                ],
            },
            BomDefinition {
                id: "vaadin".into(),
                group_id: "com.vaadin".into(),
                artifact_id: "vaadin-bom".into(),
                version_property: "vaadin.version".into(),
                order: i32::MAX,
                mappings: vec![mapping("3.0.0", "24.4.12")],
            },
        ];
        Self { capabilities, boms }
    }
}

fn mapping(range: &str, version: &str) -> BomMapping {
    BomMapping {
        compatibility: VersionRange::parse(range).unwrap(),
        version: version.into(),
    }
}

impl CapabilityCatalog for TestCatalog {
    fn get(&self, id: &str) -> Option<&Capability> {
        self.capabilities.iter().find(|c| c.id == id)
    }

    fn capabilities(&self) -> Vec<&Capability> {
        self.capabilities.iter().collect()
    }

    fn bom(&self, id: &str) -> Option<&BomDefinition> {
        self.boms.iter().find(|b| b.id == id)
    }

    fn boms(&self) -> Vec<&BomDefinition> {
        self.boms.iter().collect()
    }
}

/// Resolves every platform to an empty version table.
pub(crate) struct NothingManaged;

impl VersionResolver for NothingManaged {
    fn resolve(&self, _group_id: &str, _artifact_id: &str, _version: &str) -> KilnResult<ManagedVersions> {
        Ok(ManagedVersions::new())
    }
}

/// A request plus everything needed to build a [`GenerationContext`] for it.
///
/// Defaults: platform 3.2.0, Maven, Java.
pub(crate) struct Fixture {
    dependencies: Vec<String>,
    platform: Version,
    build_system: BuildSystem,
    language: Language,
    description: ProjectDescription,
    catalog: TestCatalog,
    services: Arc<ServiceCatalog>,
    resolver: Box<dyn VersionResolver>,
}

impl Fixture {
    pub(crate) fn new(dependencies: &[&str]) -> Self {
        let mut fixture = Self {
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            platform: Version::new(3, 2, 0),
            build_system: BuildSystem::Maven,
            language: Language::Java,
            description: ProjectDescription::builder()
                .platform(Version::new(3, 2, 0))
                .build()
                .unwrap(),
            catalog: TestCatalog::new(),
            services: ServiceCatalog::builtin(),
            resolver: Box::new(NothingManaged),
        };
        fixture.refresh();
        fixture
    }

    pub(crate) fn platform(mut self, version: &str) -> Self {
        self.platform = Version::parse(version).unwrap();
        self.refresh();
        self
    }

    pub(crate) fn kotlin(mut self) -> Self {
        self.language = Language::Kotlin;
        self.refresh();
        self
    }

    pub(crate) fn gradle(mut self) -> Self {
        self.build_system = BuildSystem::Gradle;
        self.refresh();
        self
    }

    pub(crate) fn resolver(mut self, resolver: impl VersionResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    fn refresh(&mut self) {
        self.description = ProjectDescription::builder()
            .platform(self.platform.clone())
            .build_system(self.build_system)
            .language(self.language)
            .dependencies(self.dependencies.iter().cloned())
            .build()
            .unwrap();
    }

    pub(crate) fn description(&self) -> &ProjectDescription {
        &self.description
    }

    pub(crate) fn ctx(&self) -> GenerationContext<'_> {
        GenerationContext::new(
            &self.description,
            &self.catalog,
            &self.services,
            self.resolver.as_ref(),
        )
    }

    /// The build as it looks before any rule runs.
    pub(crate) fn seed(&self) -> Build {
        seed_build(&self.description, &self.catalog).unwrap()
    }
}
