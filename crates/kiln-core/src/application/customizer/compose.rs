//! Orchestration rules: the compose file and the test service connections.
//!
//! Both targets are driven by one binding table. A binding ties a catalog
//! facet to a registered service. For each binding there is one compose
//! rule (active with `docker-compose`) and one connection rule (active with
//! `testcontainers`).

use tracing::debug;

use crate::application::customizer::{Customizer, GenerationContext, Pipeline};
use crate::domain::{ComposeFile, Condition, ServiceConnection, ServiceConnections};
use crate::error::KilnResult;

pub const DOCKER_COMPOSE: &str = "docker-compose";
pub const TESTCONTAINERS: &str = "testcontainers";

/// Facet → registered service.
#[derive(Debug, Clone, Copy)]
pub struct ServiceBinding {
    pub facet: &'static str,
    pub service_id: &'static str,
    /// Service name in the compose file and connection id.
    pub name: &'static str,
    /// Dedicated container class. `None` uses the generic container.
    pub container_class: Option<&'static str>,
}

pub static SERVICE_BINDINGS: &[ServiceBinding] = &[
    ServiceBinding {
        facet: "cassandra",
        service_id: "cassandra",
        name: "cassandra",
        container_class: Some("CassandraContainer"),
    },
    ServiceBinding {
        facet: "elasticsearch",
        service_id: "elasticsearch",
        name: "elasticsearch",
        container_class: Some("ElasticsearchContainer"),
    },
    ServiceBinding {
        facet: "kafka",
        service_id: "kafka",
        name: "kafka",
        container_class: Some("KafkaContainer"),
    },
    ServiceBinding {
        facet: "mariadb",
        service_id: "mariaDb",
        name: "mariadb",
        container_class: Some("MariaDBContainer"),
    },
    ServiceBinding {
        facet: "mongodb",
        service_id: "mongoDb",
        name: "mongodb",
        container_class: Some("MongoDBContainer"),
    },
    ServiceBinding {
        facet: "mysql",
        service_id: "mysql",
        name: "mysql",
        container_class: Some("MySQLContainer"),
    },
    ServiceBinding {
        facet: "neo4j",
        service_id: "neo4j",
        name: "neo4j",
        container_class: Some("Neo4jContainer"),
    },
    ServiceBinding {
        facet: "ollama",
        service_id: "ollama",
        name: "ollama",
        container_class: Some("OllamaContainer"),
    },
    ServiceBinding {
        facet: "postgres",
        service_id: "postgres",
        name: "postgres",
        container_class: Some("PostgreSQLContainer"),
    },
    ServiceBinding {
        facet: "rabbitmq",
        service_id: "rabbit",
        name: "rabbitmq",
        container_class: Some("RabbitMQContainer"),
    },
    ServiceBinding {
        facet: "redis",
        service_id: "redis",
        name: "redis",
        container_class: None,
    },
    ServiceBinding {
        facet: "zipkin",
        service_id: "zipkin",
        name: "zipkin",
        container_class: None,
    },
];

/// Adds the bound service to the compose file.
pub struct ComposeServiceCustomizer {
    binding: ServiceBinding,
    name: String,
}

impl ComposeServiceCustomizer {
    pub fn new(binding: ServiceBinding) -> Self {
        Self {
            name: format!("{}ComposeCustomizer", binding.name),
            binding,
        }
    }
}

impl Customizer<ComposeFile> for ComposeServiceCustomizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn activation(&self) -> Condition {
        Condition::requested(DOCKER_COMPOSE).and(Condition::facet(self.binding.facet))
    }

    fn customize(&self, compose: &mut ComposeFile, ctx: &GenerationContext<'_>) -> KilnResult<()> {
        let found = ctx.services().do_with(self.binding.service_id, |service| {
            compose.add(self.binding.name, service);
        });
        if !found {
            debug!(service = self.binding.service_id, "service not registered, skipped");
        }
        Ok(())
    }
}

/// Registers a test container for the bound service.
pub struct ServiceConnectionCustomizer {
    binding: ServiceBinding,
    name: String,
}

impl ServiceConnectionCustomizer {
    pub fn new(binding: ServiceBinding) -> Self {
        Self {
            name: format!("{}ServiceConnectionsCustomizer", binding.name),
            binding,
        }
    }
}

impl Customizer<ServiceConnections> for ServiceConnectionCustomizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn activation(&self) -> Condition {
        Condition::requested(TESTCONTAINERS).and(Condition::facet(self.binding.facet))
    }

    fn customize(
        &self,
        connections: &mut ServiceConnections,
        ctx: &GenerationContext<'_>,
    ) -> KilnResult<()> {
        let binding = self.binding;
        let found = ctx.services().do_with(binding.service_id, |service| {
            let image = service.image_tag();
            connections.add(match binding.container_class {
                Some(class) => ServiceConnection::of_container(binding.name, image, class),
                None => ServiceConnection::of_generic_container(binding.name, image),
            });
        });
        if !found {
            debug!(service = binding.service_id, "service not registered, skipped");
        }
        Ok(())
    }
}

/// One compose rule per binding.
pub fn compose_pipeline() -> Pipeline<ComposeFile> {
    SERVICE_BINDINGS
        .iter()
        .fold(Pipeline::new("compose"), |pipeline, binding| {
            pipeline.register(ComposeServiceCustomizer::new(*binding))
        })
}

/// One connection rule per binding.
pub fn connections_pipeline() -> Pipeline<ServiceConnections> {
    SERVICE_BINDINGS
        .iter()
        .fold(Pipeline::new("service-connections"), |pipeline, binding| {
            pipeline.register(ServiceConnectionCustomizer::new(*binding))
        })
}
