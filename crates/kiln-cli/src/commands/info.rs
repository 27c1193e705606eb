//! `kiln info` - details for a single capability.

use kiln_core::{application::CatalogService, domain::ServiceCatalog};

use crate::{
    cli::InfoArgs,
    commands::load_catalog,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InfoArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = CatalogService::new(load_catalog(&config)?, ServiceCatalog::builtin());
    let info = service
        .get(&args.id)
        .ok_or_else(|| CliError::CapabilityNotFound { id: args.id.clone() })?;

    if output.is_json() {
        let json = serde_json::to_string_pretty(&info)
            .with_cli_context(|| "failed to serialise capability")?;
        output.emit(&json)?;
        return Ok(());
    }

    output.header(&format!("{} ({})", info.name, info.id))?;
    if !info.description.is_empty() {
        output.print(&format!("  {}", info.description))?;
    }
    output.print(&format!("  Category:      {}", info.category))?;
    output.print(&format!("  Coordinate:    {}", info.coordinate))?;
    if !info.facets.is_empty() {
        output.print(&format!("  Facets:        {}", info.facets.join(", ")))?;
    }
    output.print(&format!(
        "  Compatibility: {}",
        info.compatibility.as_deref().unwrap_or("all platforms")
    ))?;
    Ok(())
}
