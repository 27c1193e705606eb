//! Rules that replace one artifact with a sibling.

use std::sync::LazyLock;

use crate::application::customizer::build::require;
use crate::application::customizer::{Customizer, GenerationContext};
use crate::domain::{Build, Condition, ConditionContext, Qualifier, Version, VersionRange};
use crate::error::KilnResult;

/// First platform release whose gateway supports the servlet stack.
const GATEWAY_MVC_SINCE: Version = Version::new(3, 2, 0).with_qualifier(Qualifier::Milestone(1));

static GATEWAY_MVC_RANGE: LazyLock<VersionRange> =
    LazyLock::new(|| VersionRange::at_least(GATEWAY_MVC_SINCE));

/// Gateway on the servlet stack.
///
/// Below the threshold the gateway only runs on WebFlux, so `web` is
/// swapped for `webflux`. From the threshold on, `web` stays and the
/// gateway switches to its MVC artifact.
pub struct CloudGatewayCustomizer;

impl Customizer<Build> for CloudGatewayCustomizer {
    fn name(&self) -> &str {
        "CloudGatewayCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::requested("cloud-gateway")
    }

    fn customize(&self, build: &mut Build, ctx: &GenerationContext<'_>) -> KilnResult<()> {
        let gateway = require(build, "cloud-gateway", self.name())?.clone();
        let mvc_supported = GATEWAY_MVC_RANGE.matches(ctx.platform_version());
        let has_web = build.has_dependency("web");

        match (mvc_supported, has_web) {
            (true, true) => {
                build.remove_dependency("cloud-gateway");
                build.add_dependency(
                    "cloud-gateway",
                    gateway.with_artifact_id("spring-cloud-starter-gateway-mvc"),
                );
            }
            (false, true) => {
                build.remove_dependency("web");
                build.add_dependency("webflux", ctx.dependency("webflux")?);
            }
            (_, false) => {
                if !build.has_dependency("webflux") {
                    build.add_dependency("webflux", ctx.dependency("webflux")?);
                }
            }
        }
        Ok(())
    }
}

/// Blocking data starter → reactive sibling id.
const REACTIVE_SIBLINGS: &[(&str, &str)] = &[
    ("data-cassandra", "data-cassandra-reactive"),
    ("data-mongodb", "data-mongodb-reactive"),
    ("data-redis", "data-redis-reactive"),
];

/// On a reactive web stack, blocking data starters become reactive ones.
pub struct ReactiveSwapCustomizer;

impl Customizer<Build> for ReactiveSwapCustomizer {
    fn name(&self) -> &str {
        "ReactiveSwapCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::requested("webflux")
    }

    fn customize(&self, build: &mut Build, ctx: &GenerationContext<'_>) -> KilnResult<()> {
        for (blocking, reactive) in REACTIVE_SIBLINGS {
            if !build.has_dependency(blocking) {
                continue;
            }
            let replacement = ctx.dependency(reactive)?;
            build.remove_dependency(blocking);
            build.add_dependency(*reactive, replacement);
        }
        Ok(())
    }
}
