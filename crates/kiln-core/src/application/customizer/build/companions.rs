//! Rules that add test-scope companions for what the build already has.

use crate::application::customizer::build::require;
use crate::application::customizer::{Customizer, GenerationContext};
use crate::domain::{Build, Condition, Dependency, DependencyScope};
use crate::error::KilnResult;

struct Companion {
    trigger: &'static str,
    id: &'static str,
    group_id: &'static str,
    artifact_id: &'static str,
}

const COMPANIONS: &[Companion] = &[
    Companion {
        trigger: "amqp",
        id: "amqp-test",
        group_id: "org.springframework.amqp",
        artifact_id: "spring-rabbit-test",
    },
    Companion {
        trigger: "batch",
        id: "batch-test",
        group_id: "org.springframework.batch",
        artifact_id: "spring-batch-test",
    },
    Companion {
        trigger: "graphql",
        id: "graphql-test",
        group_id: "org.springframework.graphql",
        artifact_id: "spring-graphql-test",
    },
    Companion {
        trigger: "kafka",
        id: "kafka-test",
        group_id: "org.springframework.kafka",
        artifact_id: "spring-kafka-test",
    },
    Companion {
        trigger: "security",
        id: "security-test",
        group_id: "org.springframework.security",
        artifact_id: "spring-security-test",
    },
];

fn test_dependency(group_id: &str, artifact_id: &str) -> Dependency {
    Dependency::builder(group_id, artifact_id)
        .scope(DependencyScope::TestCompile)
        .build()
}

/// Requested capability → its test support library.
pub struct TestCompanionCustomizer;

impl Customizer<Build> for TestCompanionCustomizer {
    fn name(&self) -> &str {
        "TestCompanionCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::Any(
            COMPANIONS
                .iter()
                .map(|c| Condition::requested(c.trigger))
                .collect(),
        )
    }

    fn order(&self) -> i32 {
        20
    }

    fn customize(&self, build: &mut Build, ctx: &GenerationContext<'_>) -> KilnResult<()> {
        for companion in COMPANIONS {
            if !ctx.description().is_requested(companion.trigger) {
                continue;
            }
            require(build, companion.trigger, self.name())?;
            build.add_dependency(
                companion.id,
                test_dependency(companion.group_id, companion.artifact_id),
            );
        }
        Ok(())
    }
}

/// Anything reactive in the final build gets `reactor-test`.
///
/// Checked against the build rather than the request so reactive
/// dependencies swapped in by earlier rules count too.
pub struct ReactorTestCustomizer;

impl Customizer<Build> for ReactorTestCustomizer {
    fn name(&self) -> &str {
        "ReactorTestCustomizer"
    }

    fn order(&self) -> i32 {
        30
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        if build.has_facet("reactive") {
            build.add_dependency("reactor-test", test_dependency("io.projectreactor", "reactor-test"));
        }
        Ok(())
    }
}

struct ContainerModule {
    facet: &'static str,
    artifact_id: &'static str,
}

const CONTAINER_MODULES: &[ContainerModule] = &[
    ContainerModule { facet: "cassandra", artifact_id: "cassandra" },
    ContainerModule { facet: "elasticsearch", artifact_id: "elasticsearch" },
    ContainerModule { facet: "kafka", artifact_id: "kafka" },
    ContainerModule { facet: "mariadb", artifact_id: "mariadb" },
    ContainerModule { facet: "mongodb", artifact_id: "mongodb" },
    ContainerModule { facet: "mysql", artifact_id: "mysql" },
    ContainerModule { facet: "neo4j", artifact_id: "neo4j" },
    ContainerModule { facet: "ollama", artifact_id: "ollama" },
    ContainerModule { facet: "postgres", artifact_id: "postgresql" },
    ContainerModule { facet: "rabbitmq", artifact_id: "rabbitmq" },
];

const TESTCONTAINERS_GROUP: &str = "org.testcontainers";

/// Testcontainers support plus one module per containerizable service.
pub struct TestcontainersCustomizer;

impl Customizer<Build> for TestcontainersCustomizer {
    fn name(&self) -> &str {
        "TestcontainersCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::requested("testcontainers")
    }

    fn order(&self) -> i32 {
        40
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        add_once(
            build,
            "spring-boot-testcontainers",
            test_dependency("org.springframework.boot", "spring-boot-testcontainers"),
        );
        add_once(
            build,
            "testcontainers-junit-jupiter",
            test_dependency(TESTCONTAINERS_GROUP, "junit-jupiter"),
        );
        for module in CONTAINER_MODULES {
            if build.has_facet(module.facet) {
                add_once(
                    build,
                    format!("testcontainers-{}", module.artifact_id),
                    test_dependency(TESTCONTAINERS_GROUP, module.artifact_id),
                );
            }
        }
        Ok(())
    }
}

/// Adds `dependency` unless some record already carries its coordinate.
fn add_once(build: &mut Build, key: impl Into<String>, dependency: Dependency) {
    let present = build.dependencies().any(|(_, existing)| {
        existing.group_id() == dependency.group_id()
            && existing.artifact_id() == dependency.artifact_id()
    });
    if !present {
        build.add_dependency(key, dependency);
    }
}
