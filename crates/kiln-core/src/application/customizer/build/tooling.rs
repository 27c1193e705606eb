//! Build-tool specific rules: plugins, profiles, repositories.

use crate::application::customizer::build::require;
use crate::application::customizer::{Customizer, GenerationContext};
use crate::domain::{
    Build, BuildSystem, Condition, ConditionContext, DependencyScope, PluginScope, Repository,
};
use crate::error::KilnResult;

const MAVEN_PLUGINS_GROUP: &str = "org.apache.maven.plugins";

/// Wires Lombok in as an annotation processor.
///
/// Maven declares it in the compiler plugin's `annotationProcessorPaths`;
/// Gradle uses an `annotationProcessor` scoped dependency.
pub struct LombokAnnotationProcessorCustomizer;

impl Customizer<Build> for LombokAnnotationProcessorCustomizer {
    fn name(&self) -> &str {
        "LombokAnnotationProcessorCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::requested("lombok")
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        let lombok = require(build, "lombok", self.name())?.clone();
        match build.build_system() {
            BuildSystem::Maven => {
                build.add_plugin(&PluginScope::Root, MAVEN_PLUGINS_GROUP, "maven-compiler-plugin", |p| {
                    p.only_for(BuildSystem::Maven).configuration(|c| {
                        c.configure("annotationProcessorPaths", |paths| {
                            paths.add_nested("path", |path| {
                                path.set("groupId", lombok.group_id())
                                    .set("artifactId", lombok.artifact_id());
                            });
                        });
                    });
                })?;
            }
            BuildSystem::Gradle => {
                build.add_dependency(
                    "lombok-annotation-processor",
                    lombok.with_scope(DependencyScope::AnnotationProcessor),
                );
            }
        }
        Ok(())
    }
}

/// Maven `production` profile that builds the Vaadin frontend bundle.
pub struct VaadinProductionProfileCustomizer;

impl Customizer<Build> for VaadinProductionProfileCustomizer {
    fn name(&self) -> &str {
        "VaadinProductionProfileCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::requested("vaadin").and(Condition::BuildSystemIs(BuildSystem::Maven))
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        build.add_plugin(
            &PluginScope::Profile("production".into()),
            "com.vaadin",
            "vaadin-maven-plugin",
            |p| {
                p.version("${vaadin.version}").execution("frontend", |e| {
                    e.goal("prepare-frontend").goal("build-frontend").phase("compile");
                });
            },
        )?;
        Ok(())
    }
}

/// GraalVM native image build support.
///
/// `native` is a marker; the real contribution is the build plugin.
pub struct NativeBuildToolsCustomizer;

impl Customizer<Build> for NativeBuildToolsCustomizer {
    fn name(&self) -> &str {
        "NativeBuildToolsCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::requested("native")
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        let (group_id, artifact_id) = match build.build_system() {
            BuildSystem::Maven => ("org.graalvm.buildtools", "native-maven-plugin"),
            BuildSystem::Gradle => (
                "org.graalvm.buildtools.native",
                "org.graalvm.buildtools.native.gradle.plugin",
            ),
        };
        let build_system = build.build_system();
        build.add_plugin(&PluginScope::Root, group_id, artifact_id, |p| {
            p.only_for(build_system);
        })?;
        build.remove_dependency("native");
        Ok(())
    }
}

/// Pre-release platforms resolve from the milestone (and snapshot)
/// repositories.
pub struct MilestoneRepositoryCustomizer;

impl Customizer<Build> for MilestoneRepositoryCustomizer {
    fn name(&self) -> &str {
        "MilestoneRepositoryCustomizer"
    }

    fn customize(&self, build: &mut Build, ctx: &GenerationContext<'_>) -> KilnResult<()> {
        let platform = ctx.platform_version();
        if !platform.is_prerelease() {
            return Ok(());
        }
        build.add_repository(
            "spring-milestones",
            Repository::new("Spring Milestones", "https://repo.spring.io/milestone"),
        );
        if platform.is_snapshot() {
            build.add_repository(
                "spring-snapshots",
                Repository::new("Spring Snapshots", "https://repo.spring.io/snapshot").with_snapshots(),
            );
        }
        Ok(())
    }
}
