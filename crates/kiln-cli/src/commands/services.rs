//! `kiln services` - the container service registry.

use serde::Serialize;

use kiln_core::domain::{ServiceCatalog, ServiceDescriptor};

use crate::{
    cli::{ListFormat, ServicesArgs},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ServiceRow<'a> {
    id: &'a str,
    image: String,
    ports: Vec<u16>,
    website: &'a str,
}

impl<'a> From<&'a ServiceDescriptor> for ServiceRow<'a> {
    fn from(s: &'a ServiceDescriptor) -> Self {
        Self {
            id: &s.id,
            image: s.image_tag(),
            ports: s.ports.iter().copied().collect(),
            website: &s.website,
        }
    }
}

pub fn execute(args: ServicesArgs, output: OutputManager) -> CliResult<()> {
    let catalog = ServiceCatalog::builtin();
    let rows: Vec<ServiceRow<'_>> = catalog.iter().map(ServiceRow::from).collect();

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(&format!("Container services ({}):", rows.len()))?;
            let width = rows.iter().map(|r| r.id.len()).max().unwrap_or(0);
            for row in &rows {
                let ports: Vec<String> = row.ports.iter().map(u16::to_string).collect();
                output.print(&format!(
                    "  {:<width$}  {}  [{}]",
                    row.id,
                    row.image,
                    ports.join(", ")
                ))?;
            }
        }
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)
                .with_cli_context(|| "failed to serialise services")?;
            output.emit(&json)?;
        }
        ListFormat::List => {
            for row in &rows {
                output.emit(row.id)?;
            }
        }
    }

    Ok(())
}
