//! Renders a generation result as machine-readable files.
//!
//! - `build.json` / `build.yaml`: the request and the resolved build model
//! - `compose.yaml`: the orchestration descriptor, when any service is set
//! - `service-connections.json`: test containers, when any are set

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::instrument;

use kiln_core::{
    application::{ApplicationError, GenerationResult, ports::ResultRenderer},
    domain::{Build, ComposeFile, DomainValidator as validator, ProjectDescription, ProjectFiles},
    error::KilnResult,
};

/// Serialization for the build model file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelFormat {
    #[default]
    Json,
    Yaml,
}

impl ModelFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Json => "build.json",
            Self::Yaml => "build.yaml",
        }
    }
}

#[derive(Serialize)]
struct ModelDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    request: &'a ProjectDescription,
    build: &'a Build,
    applied: &'a [String],
}

#[derive(Serialize)]
struct ComposeDocument {
    services: BTreeMap<String, ComposeEntry>,
}

#[derive(Serialize)]
struct ComposeEntry {
    image: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ports: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
}

impl From<&ComposeFile> for ComposeDocument {
    fn from(compose: &ComposeFile) -> Self {
        let services = compose
            .services()
            .map(|(name, service)| {
                (
                    name.to_string(),
                    ComposeEntry {
                        image: service.image_tag(),
                        environment: service.environment.clone(),
                        ports: service.ports.iter().map(u16::to_string).collect(),
                        labels: service.labels.clone(),
                        command: service.command.clone(),
                    },
                )
            })
            .collect();
        Self { services }
    }
}

/// Writes the model plus orchestration files.
///
/// With `reproducible` set, the timestamp and request id are left out so
/// identical requests render byte-identical files.
#[derive(Debug, Clone, Default)]
pub struct StandardRenderer {
    format: ModelFormat,
    reproducible: bool,
}

impl StandardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: ModelFormat) -> Self {
        self.format = format;
        self
    }

    pub fn reproducible(mut self, reproducible: bool) -> Self {
        self.reproducible = reproducible;
        self
    }

    fn model(&self, result: &GenerationResult) -> KilnResult<String> {
        let document = ModelDocument {
            generated_at: (!self.reproducible)
                .then(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            request_id: (!self.reproducible).then(|| result.request_id.to_string()),
            request: &result.description,
            build: &result.build,
            applied: &result.applied,
        };
        match self.format {
            ModelFormat::Json => serde_json::to_string_pretty(&document).map_err(rendering),
            ModelFormat::Yaml => serde_yaml::to_string(&document).map_err(rendering),
        }
    }
}

fn rendering(e: impl std::fmt::Display) -> kiln_core::error::KilnError {
    ApplicationError::RenderingFailed {
        reason: e.to_string(),
    }
    .into()
}

impl ResultRenderer for StandardRenderer {
    #[instrument(skip_all, fields(output = %output_root.display()))]
    fn render(&self, result: &GenerationResult, output_root: &Path) -> KilnResult<ProjectFiles> {
        let mut files = ProjectFiles::new(output_root);
        files.add_file(self.format.file_name(), self.model(result)?);

        if !result.compose.is_empty() {
            let compose = serde_yaml::to_string(&ComposeDocument::from(&result.compose))
                .map_err(rendering)?;
            files.add_file("compose.yaml", compose);
        }

        if !result.connections.is_empty() {
            let connections =
                serde_json::to_string_pretty(&result.connections).map_err(rendering)?;
            files.add_file("service-connections.json", connections);
        }

        validator::validate_project_files(&files)?;
        Ok(files)
    }
}
