//! Build model rules.
//!
//! Each rule is its own type. [`default_pipeline`] registers them in the
//! order that breaks ties between equal `order()` values.

mod boms;
mod companions;
mod kotlin;
mod session;
mod starters;
mod swaps;
mod tooling;

pub use boms::CatalogBomCustomizer;
pub use companions::{ReactorTestCustomizer, TestCompanionCustomizer, TestcontainersCustomizer};
pub use kotlin::{KotlinCoroutinesCustomizer, KotlinJacksonCustomizer};
pub use session::{SessionMarkerCleanupCustomizer, SessionStoreCustomizer};
pub use starters::{DefaultStarterCustomizer, TestStarterCustomizer};
pub use swaps::{CloudGatewayCustomizer, ReactiveSwapCustomizer};
pub use tooling::{
    LombokAnnotationProcessorCustomizer, MilestoneRepositoryCustomizer,
    NativeBuildToolsCustomizer, VaadinProductionProfileCustomizer,
};

use crate::application::customizer::Pipeline;
use crate::domain::{Build, Dependency, DomainError};
use crate::error::KilnResult;

/// Every built-in build rule.
pub fn default_pipeline() -> Pipeline<Build> {
    Pipeline::new("build")
        .register(CloudGatewayCustomizer)
        .register(ReactiveSwapCustomizer)
        .register(SessionStoreCustomizer)
        .register(TestCompanionCustomizer)
        .register(ReactorTestCustomizer)
        .register(TestcontainersCustomizer)
        .register(CatalogBomCustomizer)
        .register(KotlinJacksonCustomizer)
        .register(KotlinCoroutinesCustomizer)
        .register(LombokAnnotationProcessorCustomizer)
        .register(VaadinProductionProfileCustomizer)
        .register(NativeBuildToolsCustomizer)
        .register(MilestoneRepositoryCustomizer)
        .register(TestStarterCustomizer)
        .register(SessionMarkerCleanupCustomizer)
        .register(DefaultStarterCustomizer)
}

/// The record a triggered rule expects to already be in the build.
fn require<'b>(build: &'b Build, id: &str, rule: &str) -> KilnResult<&'b Dependency> {
    build.get_dependency(id).ok_or_else(|| {
        DomainError::inconsistency(
            id,
            format!("{rule} was triggered but the build has no '{id}' record"),
        )
        .into()
    })
}
