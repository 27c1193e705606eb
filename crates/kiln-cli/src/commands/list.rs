//! Implementation of the `kiln list` command.

use kiln_core::{
    application::{CapabilityFilter, CapabilityInfo, CatalogService},
    domain::{ServiceCatalog, Version},
};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::load_catalog,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let platform = args
        .platform
        .as_deref()
        .map(Version::parse)
        .transpose()
        .map_err(|e| CliError::InvalidInput {
            message: "invalid --platform version".into(),
            source: Some(Box::new(e)),
        })?;

    let service = CatalogService::new(load_catalog(&config)?, ServiceCatalog::builtin());
    let capabilities = service.list(&CapabilityFilter {
        facet: args.facet,
        category: args.category,
        platform,
    });

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(&format!("Available capabilities ({}):", capabilities.len()))?;
            for line in table(&capabilities) {
                output.print(&line)?;
            }
        }
        // JSON goes through `emit` so it stays parseable in quiet mode.
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&capabilities)
                .with_cli_context(|| "failed to serialise capabilities")?;
            output.emit(&json)?;
        }
        ListFormat::List => {
            for capability in &capabilities {
                output.emit(&capability.id)?;
            }
        }
    }

    Ok(())
}

fn table(capabilities: &[CapabilityInfo]) -> Vec<String> {
    let id_width = capabilities.iter().map(|c| c.id.len()).max().unwrap_or(2).max(2);
    let category_width = capabilities
        .iter()
        .map(|c| c.category.len())
        .max()
        .unwrap_or(8)
        .max(8);

    capabilities
        .iter()
        .map(|c| {
            let range = c
                .compatibility
                .as_deref()
                .map(|r| format!("  {r}"))
                .unwrap_or_default();
            format!(
                "  {:<id_width$}  {:<category_width$}  {}{}",
                c.id, c.category, c.name, range
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, category: &str, compatibility: Option<&str>) -> CapabilityInfo {
        CapabilityInfo {
            id: id.into(),
            name: format!("{id} name"),
            category: category.into(),
            description: String::new(),
            coordinate: "g:a".into(),
            facets: Vec::new(),
            compatibility: compatibility.map(Into::into),
        }
    }

    #[test]
    fn table_aligns_columns() {
        let rows = table(&[
            info("web", "Web", None),
            info("cloud-gateway", "Spring Cloud", Some("[3.1.0,3.5.0-M1)")),
        ]);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("  web            Web"));
        assert!(rows[1].ends_with("[3.1.0,3.5.0-M1)"));
    }

    #[test]
    fn empty_table_has_no_rows() {
        assert!(table(&[]).is_empty());
    }
}
