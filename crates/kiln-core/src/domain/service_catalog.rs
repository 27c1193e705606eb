//! Container service registry.
//!
//! Every auxiliary service the generator knows how to run (databases,
//! brokers, tracing backends, ...) is described exactly once in
//! [`SERVICE_REGISTRY`]. The registry is compiled into the binary and turned
//! into an immutable [`ServiceCatalog`] on first use; after that it is only
//! ever read.
//!
//! # Adding a service
//!
//! 1. Add one [`ServiceDef`] entry to [`SERVICE_REGISTRY`]
//! 2. Map a facet to it in the compose binding table

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use crate::domain::entities::compose::ComposeService;
use crate::domain::error::DomainError;

// ── Static definitions ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ServiceDef {
    pub id: &'static str,
    pub image: &'static str,
    pub tag: &'static str,
    pub website: &'static str,
    pub environment: &'static [(&'static str, &'static str)],
    pub ports: &'static [u16],
}

pub static SERVICE_REGISTRY: &[ServiceDef] = &[
    ServiceDef {
        id: "cassandra",
        image: "cassandra",
        tag: "latest",
        website: "https://hub.docker.com/_/cassandra",
        environment: &[
            ("CASSANDRA_DC", "dc1"),
            ("CASSANDRA_ENDPOINT_SNITCH", "GossipingPropertyFileSnitch"),
        ],
        ports: &[9042],
    },
    ServiceDef {
        id: "elasticsearch",
        image: "docker.elastic.co/elasticsearch/elasticsearch",
        tag: "7.17.10",
        website: "https://www.docker.elastic.co/r/elasticsearch",
        environment: &[
            ("ELASTIC_PASSWORD", "secret"),
            ("discovery.type", "single-node"),
            ("xpack.security.enabled", "false"),
        ],
        ports: &[9200, 9300],
    },
    ServiceDef {
        id: "kafka",
        image: "apache/kafka",
        tag: "latest",
        website: "https://hub.docker.com/r/apache/kafka",
        environment: &[],
        ports: &[9092],
    },
    ServiceDef {
        id: "mariaDb",
        image: "mariadb",
        tag: "latest",
        website: "https://hub.docker.com/_/mariadb",
        environment: &[
            ("MARIADB_DATABASE", "mydatabase"),
            ("MARIADB_PASSWORD", "secret"),
            ("MARIADB_ROOT_PASSWORD", "verysecret"),
            ("MARIADB_USER", "myuser"),
        ],
        ports: &[3306],
    },
    ServiceDef {
        id: "mongoDb",
        image: "mongo",
        tag: "latest",
        website: "https://hub.docker.com/_/mongo",
        environment: &[
            ("MONGO_INITDB_DATABASE", "mydatabase"),
            ("MONGO_INITDB_ROOT_PASSWORD", "secret"),
            ("MONGO_INITDB_ROOT_USERNAME", "root"),
        ],
        ports: &[27017],
    },
    ServiceDef {
        id: "mysql",
        image: "mysql",
        tag: "latest",
        website: "https://hub.docker.com/_/mysql",
        environment: &[
            ("MYSQL_DATABASE", "mydatabase"),
            ("MYSQL_PASSWORD", "secret"),
            ("MYSQL_ROOT_PASSWORD", "verysecret"),
            ("MYSQL_USER", "myuser"),
        ],
        ports: &[3306],
    },
    ServiceDef {
        id: "neo4j",
        image: "neo4j",
        tag: "latest",
        website: "https://hub.docker.com/_/neo4j",
        environment: &[("NEO4J_AUTH", "neo4j/notverysecret")],
        ports: &[7687],
    },
    ServiceDef {
        id: "ollama",
        image: "ollama/ollama",
        tag: "latest",
        website: "https://hub.docker.com/r/ollama/ollama",
        environment: &[],
        ports: &[11434],
    },
    ServiceDef {
        id: "postgres",
        image: "postgres",
        tag: "latest",
        website: "https://hub.docker.com/_/postgres",
        environment: &[
            ("POSTGRES_DB", "mydatabase"),
            ("POSTGRES_PASSWORD", "secret"),
            ("POSTGRES_USER", "myuser"),
        ],
        ports: &[5432],
    },
    ServiceDef {
        id: "rabbit",
        image: "rabbitmq",
        tag: "latest",
        website: "https://hub.docker.com/_/rabbitmq",
        environment: &[
            ("RABBITMQ_DEFAULT_PASS", "secret"),
            ("RABBITMQ_DEFAULT_USER", "myuser"),
        ],
        ports: &[5672],
    },
    ServiceDef {
        id: "redis",
        image: "redis",
        tag: "latest",
        website: "https://hub.docker.com/_/redis",
        environment: &[],
        ports: &[6379],
    },
    ServiceDef {
        id: "zipkin",
        image: "openzipkin/zipkin",
        tag: "latest",
        website: "https://hub.docker.com/r/openzipkin/zipkin/",
        environment: &[],
        ports: &[9411],
    },
];

// ── Descriptors ──────────────────────────────────────────────────────────────

/// An immutable registered service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub id: String,
    pub image: String,
    pub tag: String,
    pub website: String,
    pub environment: BTreeMap<String, String>,
    pub ports: BTreeSet<u16>,
}

impl ServiceDescriptor {
    pub fn image_tag(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }

    /// A fresh, independently owned compose service seeded from this
    /// descriptor.
    pub fn to_compose_service(&self) -> ComposeService {
        ComposeService {
            image: self.image.clone(),
            tag: self.tag.clone(),
            website: Some(self.website.clone()),
            environment: self.environment.clone(),
            ports: self.ports.clone(),
            labels: BTreeMap::new(),
            command: None,
        }
    }
}

impl From<&ServiceDef> for ServiceDescriptor {
    fn from(def: &ServiceDef) -> Self {
        Self {
            id: def.id.to_string(),
            image: def.image.to_string(),
            tag: def.tag.to_string(),
            website: def.website.to_string(),
            environment: def
                .environment
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ports: def.ports.iter().copied().collect(),
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// Read-only service lookup shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    services: BTreeMap<String, ServiceDescriptor>,
}

impl ServiceCatalog {
    /// # Errors
    ///
    /// [`DomainError::CatalogInconsistency`] on a duplicate id.
    pub fn new(descriptors: Vec<ServiceDescriptor>) -> Result<Self, DomainError> {
        let mut services = BTreeMap::new();
        for descriptor in descriptors {
            let id = descriptor.id.clone();
            if services.insert(id.clone(), descriptor).is_some() {
                return Err(DomainError::inconsistency(id, "service registered twice"));
            }
        }
        Ok(Self { services })
    }

    /// The process-wide catalog built from [`SERVICE_REGISTRY`].
    pub fn builtin() -> Arc<ServiceCatalog> {
        static BUILTIN: OnceLock<Arc<ServiceCatalog>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                Arc::new(ServiceCatalog {
                    services: SERVICE_REGISTRY
                        .iter()
                        .map(|def| (def.id.to_string(), ServiceDescriptor::from(def)))
                        .collect(),
                })
            })
            .clone()
    }

    pub fn resolve(&self, id: &str) -> Result<&ServiceDescriptor, DomainError> {
        self.services
            .get(id)
            .ok_or_else(|| DomainError::ServiceNotFound { id: id.to_string() })
    }

    /// Hand `consumer` an owned compose service for `id`.
    ///
    /// Unknown ids are skipped: the consumer is not called and no error is
    /// raised. Returns whether the consumer ran.
    pub fn do_with(&self, id: &str, consumer: impl FnOnce(ComposeService)) -> bool {
        match self.services.get(id) {
            Some(descriptor) => {
                consumer(descriptor.to_compose_service());
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
