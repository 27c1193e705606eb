use std::collections::BTreeSet;

use tracing::debug;

use crate::application::customizer::{Customizer, GenerationContext};
use crate::domain::{Build, ConditionContext, DomainError};
use crate::error::KilnResult;

/// Imports the BOMs the catalog associates with dependencies in the build,
/// pinning each one to the release matching the platform version.
pub struct CatalogBomCustomizer;

impl Customizer<Build> for CatalogBomCustomizer {
    fn name(&self) -> &str {
        "CatalogBomCustomizer"
    }

    fn order(&self) -> i32 {
        50
    }

    fn customize(&self, build: &mut Build, ctx: &GenerationContext<'_>) -> KilnResult<()> {
        let bom_ids: BTreeSet<String> = build
            .dependencies()
            .filter_map(|(id, _)| ctx.capability(id))
            .filter_map(|c| c.bom.clone())
            .collect();

        let platform = ctx.platform_version();
        for bom_id in bom_ids {
            let definition = ctx.catalog().bom(&bom_id).ok_or_else(|| {
                DomainError::inconsistency(&bom_id, "referenced by a capability but not defined")
            })?;
            let version = definition.resolve_version(platform).ok_or_else(|| {
                DomainError::inconsistency(
                    &bom_id,
                    format!("no release is mapped for platform {platform}"),
                )
            })?;
            debug!(bom = %bom_id, %version, "importing bom");
            build.set_property(definition.version_property.clone(), version);
            build.add_bom(bom_id.clone(), definition.to_bom());
        }
        Ok(())
    }
}
