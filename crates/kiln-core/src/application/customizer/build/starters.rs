use crate::application::customizer::{Customizer, GenerationContext, LOWEST_PRECEDENCE};
use crate::domain::{Build, Dependency, DependencyScope};
use crate::error::KilnResult;

use crate::application::customizer::context::PLATFORM_GROUP;

/// Adds the root starter when nothing else pulls one in.
pub struct DefaultStarterCustomizer;

impl Customizer<Build> for DefaultStarterCustomizer {
    fn name(&self) -> &str {
        "DefaultStarterCustomizer"
    }

    fn order(&self) -> i32 {
        LOWEST_PRECEDENCE
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        let has_starter = build.dependencies().any(|(_, d)| {
            !d.scope().is_test() && d.artifact_id().starts_with("spring-boot-starter")
        });
        if !has_starter {
            build.add_dependency("root_starter", Dependency::of(PLATFORM_GROUP, "spring-boot-starter"));
        }
        Ok(())
    }
}

/// Every project gets the platform test starter.
pub struct TestStarterCustomizer;

impl Customizer<Build> for TestStarterCustomizer {
    fn name(&self) -> &str {
        "TestStarterCustomizer"
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        build.add_dependency(
            "test",
            Dependency::builder(PLATFORM_GROUP, "spring-boot-starter-test")
                .scope(DependencyScope::TestCompile)
                .build(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::customizer::testing::Fixture;

    #[test]
    fn root_starter_added_when_no_starter() {
        let fixture = Fixture::new(&["lombok"]);
        let mut build = fixture.seed();
        DefaultStarterCustomizer.customize(&mut build, &fixture.ctx()).unwrap();
        assert!(build.has_dependency("root_starter"));
    }

    #[test]
    fn root_starter_skipped_when_starter_present() {
        let fixture = Fixture::new(&["web"]);
        let mut build = fixture.seed();
        DefaultStarterCustomizer.customize(&mut build, &fixture.ctx()).unwrap();
        assert!(!build.has_dependency("root_starter"));
    }

    #[test]
    fn test_starter_does_not_count_as_starter() {
        let fixture = Fixture::new(&[]);
        let mut build = fixture.seed();
        let ctx = fixture.ctx();
        TestStarterCustomizer.customize(&mut build, &ctx).unwrap();
        DefaultStarterCustomizer.customize(&mut build, &ctx).unwrap();
        assert!(build.has_dependency("test"));
        assert!(build.has_dependency("root_starter"));
    }
}
