//! Implementation of the `kiln generate` command.
//!
//! Responsibility: translate CLI arguments and config defaults into a
//! `ProjectDescription`, run the generation service, write the result and
//! report it. No customization logic lives here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use kiln_adapters::{LocalFilesystem, ModelFormat, StandardRenderer};
use kiln_core::{
    application::{GenerationResult, GenerationService, OutputService},
    domain::{BuildSystem, Language, ProjectDescription, ProjectFiles, ServiceCatalog},
};

use crate::{
    cli::{BuildTool, GenerateArgs, Lang, ModelFormatArg, global::GlobalArgs},
    commands::{load_catalog, load_resolver},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// What `generate` reports, in every output format.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    name: &'a str,
    output: String,
    written: bool,
    files: Vec<String>,
    dependencies: Vec<String>,
    compose_services: Vec<&'a str>,
    connections: Vec<&'a str>,
    applied: &'a [String],
}

impl<'a> Summary<'a> {
    fn new(result: &'a GenerationResult, files: &ProjectFiles, written: bool) -> Self {
        Self {
            name: result.description.name(),
            output: files.root().display().to_string(),
            written,
            files: files.files().map(|f| f.path.display().to_string()).collect(),
            dependencies: result.build.dependency_ids(),
            compose_services: result.compose.services().map(|(name, _)| name).collect(),
            connections: result.connections.iter().map(|c| c.id.as_str()).collect(),
            applied: &result.applied,
        }
    }
}

/// Execute the `kiln generate` command.
///
/// Dispatch sequence:
/// 1. Validate the project name and build the description
/// 2. Wire catalog, version resolver and services
/// 3. Run the customizer pipelines
/// 4. Render; stop here on `--dry-run`
/// 5. Confirm an overwrite, then write
/// 6. Report
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    validate_project_name(&args.name)?;
    let description = build_description(&args, &config)?;
    debug!(request = %description, "description resolved");

    let service = GenerationService::new(
        load_catalog(&config)?,
        ServiceCatalog::builtin(),
        load_resolver(&config)?,
    );

    let spinner = output.spinner("Running customizers...");
    let generated = service.generate(&description);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let result = generated?;

    let out_dir = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&args.name));
    let renderer = StandardRenderer::new()
        .format(model_format(args.format, &config)?)
        .reproducible(args.reproducible || config.output.reproducible);
    let writer = OutputService::new(Box::new(renderer), Box::new(LocalFilesystem::new()));

    if args.dry_run {
        let files = writer.render(&result, &out_dir)?;
        return report(&result, &files, false, global.verbose > 0, &output);
    }

    if args.force && !args.yes && out_dir.exists() && !confirm_overwrite(&out_dir, &output)? {
        return Err(CliError::Cancelled);
    }

    info!(path = %out_dir.display(), "writing output");
    let files = writer.write(&result, &out_dir, args.force)?;
    report(&result, &files, true, global.verbose > 0, &output)
}

// ── Description ───────────────────────────────────────────────────────────────

fn build_description(args: &GenerateArgs, config: &AppConfig) -> CliResult<ProjectDescription> {
    let platform = args
        .platform
        .as_deref()
        .unwrap_or(&config.defaults.platform_version);

    let build_system = match args.build {
        Some(tool) => convert_build(tool),
        None => config
            .defaults
            .build_system
            .parse::<BuildSystem>()
            .map_err(|e| CliError::config(format!("defaults.build_system: {e}")))?,
    };
    let language = match args.language {
        Some(lang) => convert_language(lang),
        None => config
            .defaults
            .language
            .parse::<Language>()
            .map_err(|e| CliError::config(format!("defaults.language: {e}")))?,
    };

    let mut builder = ProjectDescription::builder()
        .platform_str(platform)
        .map_err(|e| CliError::InvalidInput {
            message: format!("invalid platform version '{platform}'"),
            source: Some(Box::new(e)),
        })?
        .build_system(build_system)
        .language(language)
        .name(args.name.clone())
        .dependencies(args.dependencies.iter().map(|d| d.trim()).filter(|d| !d.is_empty()));

    if let Some(group) = args.group.as_ref().or(config.defaults.group.as_ref()) {
        builder = builder.group(group.clone());
    }
    if let Some(package) = args.package.as_ref().or(config.defaults.package_name.as_ref()) {
        builder = builder.package_name(package.clone());
    }

    Ok(builder.build().map_err(kiln_core::error::KilnError::from)?)
}

fn validate_project_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| CliError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    };
    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name cannot contain path separators; use --out"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(invalid("only letters, digits, '-' and '_' are allowed"));
    }
    Ok(())
}

// ── Type conversions CLI → core ───────────────────────────────────────────────

fn convert_build(tool: BuildTool) -> BuildSystem {
    match tool {
        BuildTool::Maven => BuildSystem::Maven,
        BuildTool::Gradle => BuildSystem::Gradle,
    }
}

fn convert_language(lang: Lang) -> Language {
    match lang {
        Lang::Java => Language::Java,
        Lang::Kotlin => Language::Kotlin,
        Lang::Groovy => Language::Groovy,
    }
}

fn model_format(arg: Option<ModelFormatArg>, config: &AppConfig) -> CliResult<ModelFormat> {
    match arg {
        Some(ModelFormatArg::Json) => Ok(ModelFormat::Json),
        Some(ModelFormatArg::Yaml) => Ok(ModelFormat::Yaml),
        None => match config.output.format.to_ascii_lowercase().as_str() {
            "json" => Ok(ModelFormat::Json),
            "yaml" | "yml" => Ok(ModelFormat::Yaml),
            other => Err(CliError::config(format!(
                "output.format must be 'json' or 'yaml', got '{other}'"
            ))),
        },
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn report(
    result: &GenerationResult,
    files: &ProjectFiles,
    written: bool,
    verbose: bool,
    out: &OutputManager,
) -> CliResult<()> {
    let summary = Summary::new(result, files, written);

    if out.is_json() {
        let json = serde_json::to_string_pretty(&summary)
            .with_cli_context(|| "failed to serialise generation summary")?;
        out.emit(&json)?;
        return Ok(());
    }

    if written {
        out.success(&format!(
            "Generated '{}' in {}",
            summary.name, summary.output
        ))?;
    } else {
        out.info(&format!(
            "Dry run: would write {} file(s) to {}",
            summary.files.len(),
            summary.output
        ))?;
    }

    out.header("Files")?;
    for file in &summary.files {
        out.print(&format!("  {file}"))?;
    }

    out.header("Dependencies")?;
    for (id, dependency) in result.build.dependencies() {
        out.print(&format!(
            "  {id:<28} {}:{} ({})",
            dependency.group_id(),
            dependency.artifact_id(),
            dependency.scope()
        ))?;
    }

    if !summary.compose_services.is_empty() {
        out.header("Compose services")?;
        for (name, service) in result.compose.services() {
            out.print(&format!("  {name:<28} {}", service.image_tag()))?;
        }
    }

    if !summary.connections.is_empty() {
        out.header("Service connections")?;
        for connection in result.connections.iter() {
            out.print(&format!(
                "  {:<28} {} ({})",
                connection.id, connection.image, connection.container_class
            ))?;
        }
    }

    if verbose {
        out.header("Applied customizers")?;
        for name in summary.applied {
            out.detail(&format!("  {name}"))?;
        }
    }

    Ok(())
}

fn confirm_overwrite(path: &Path, out: &OutputManager) -> CliResult<bool> {
    out.warning(&format!(
        "{} exists and will be replaced",
        path.display()
    ))?;
    prompt(&format!("Overwrite {}?", path.display()))
}

#[cfg(feature = "interactive")]
fn prompt(question: &str) -> CliResult<bool> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn prompt(_question: &str) -> CliResult<bool> {
    Ok(true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::domain::Version;

    fn args(name: &str) -> GenerateArgs {
        GenerateArgs {
            name: name.into(),
            dependencies: vec!["web".into(), " postgresql ".into(), String::new()],
            platform: None,
            build: None,
            language: None,
            group: None,
            package: None,
            out: None,
            format: None,
            reproducible: false,
            yes: false,
            force: false,
            dry_run: false,
        }
    }

    #[test]
    fn config_defaults_fill_missing_flags() {
        let mut config = AppConfig::default();
        config.defaults.platform_version = "3.2.0".into();
        config.defaults.build_system = "gradle".into();
        config.defaults.group = Some("org.acme".into());

        let description = build_description(&args("shop"), &config).unwrap();
        assert_eq!(description.platform_version(), &Version::new(3, 2, 0));
        assert_eq!(description.build_system(), BuildSystem::Gradle);
        assert_eq!(description.language(), Language::Java);
        assert_eq!(description.group(), "org.acme");
        assert_eq!(description.dependencies(), ["web", "postgresql"]);
    }

    #[test]
    fn flags_win_over_config() {
        let mut a = args("shop");
        a.platform = Some("3.1.5".into());
        a.build = Some(BuildTool::Maven);
        a.language = Some(Lang::Kotlin);
        a.package = Some("org.acme.shop".into());

        let mut config = AppConfig::default();
        config.defaults.build_system = "gradle".into();

        let description = build_description(&a, &config).unwrap();
        assert_eq!(description.platform_version(), &Version::new(3, 1, 5));
        assert_eq!(description.build_system(), BuildSystem::Maven);
        assert_eq!(description.language(), Language::Kotlin);
        assert_eq!(description.package_name(), "org.acme.shop");
    }

    #[test]
    fn bad_platform_is_user_error() {
        let mut a = args("shop");
        a.platform = Some("three".into());
        let err = build_description(&a, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_config_build_system_is_configuration_error() {
        let mut config = AppConfig::default();
        config.defaults.build_system = "ant".into();
        let err = build_description(&args("shop"), &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn model_format_from_config() {
        let mut config = AppConfig::default();
        config.output.format = "YAML".into();
        assert_eq!(model_format(None, &config).unwrap(), ModelFormat::Yaml);
        assert_eq!(
            model_format(Some(ModelFormatArg::Json), &config).unwrap(),
            ModelFormat::Json
        );
        config.output.format = "xml".into();
        assert!(model_format(None, &config).is_err());
    }

    #[test]
    fn project_names() {
        for name in ["shop", "order-service", "demo_app", "App2"] {
            assert!(validate_project_name(name).is_ok(), "failed for: {name}");
        }
        for name in ["", ".hidden", "a/b", "a\\b", "my app"] {
            assert!(
                matches!(
                    validate_project_name(name),
                    Err(CliError::InvalidProjectName { .. })
                ),
                "accepted: {name}"
            );
        }
    }
}
