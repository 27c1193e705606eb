use tracing::{debug, warn};

use crate::application::customizer::{Customizer, GenerationContext};
use crate::domain::{Build, Condition, Dependency, Language, VersionReference};
use crate::error::{ErrorCategory, KilnResult};

const COROUTINES_GROUP: &str = "org.jetbrains.kotlinx";
const COROUTINES_ARTIFACT: &str = "kotlinx-coroutines-reactor";
pub const COROUTINES_VERSION_PROPERTY: &str = "kotlin-coroutines.version";
/// Pinned when the platform does not manage coroutines itself.
pub const DEFAULT_COROUTINES_VERSION: &str = "1.8.1";

/// JSON on Kotlin needs the Kotlin Jackson module.
pub struct KotlinJacksonCustomizer;

impl Customizer<Build> for KotlinJacksonCustomizer {
    fn name(&self) -> &str {
        "KotlinJacksonCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::LanguageIs(Language::Kotlin).and(Condition::facet("json"))
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        build.add_dependency(
            "jackson-module-kotlin",
            Dependency::of("com.fasterxml.jackson.module", "jackson-module-kotlin"),
        );
        Ok(())
    }
}

/// Reactive Kotlin gets coroutine bridges, versioned by the platform when
/// it can be.
pub struct KotlinCoroutinesCustomizer;

impl Customizer<Build> for KotlinCoroutinesCustomizer {
    fn name(&self) -> &str {
        "KotlinCoroutinesCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::LanguageIs(Language::Kotlin).and(Condition::facet("reactive"))
    }

    fn customize(&self, build: &mut Build, ctx: &GenerationContext<'_>) -> KilnResult<()> {
        let coordinate = format!("{COROUTINES_GROUP}:{COROUTINES_ARTIFACT}");
        let managed = match ctx.managed_versions() {
            Ok(versions) => versions.contains_key(&coordinate),
            // An unknown platform has no table; anything else is a real fault.
            Err(e) if e.category() == ErrorCategory::NotFound => {
                warn!(error = %e, "managed versions unavailable, pinning coroutines");
                false
            }
            Err(e) => return Err(e),
        };

        let mut dependency = Dependency::of(COROUTINES_GROUP, COROUTINES_ARTIFACT);
        if !managed {
            debug!(version = DEFAULT_COROUTINES_VERSION, "coroutines not managed by platform");
            build.set_property(COROUTINES_VERSION_PROPERTY, DEFAULT_COROUTINES_VERSION);
            dependency = dependency.with_version(VersionReference::property(COROUTINES_VERSION_PROPERTY));
        }
        build.add_dependency(COROUTINES_ARTIFACT, dependency);
        Ok(())
    }
}
