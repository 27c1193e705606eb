//! `kiln config` - read and write configuration values.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use kiln_core::domain::{BuildSystem, Language, Version};

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Keys `get` and `set` understand.
pub const KEYS: &[&str] = &[
    "defaults.platform_version",
    "defaults.build_system",
    "defaults.language",
    "defaults.group",
    "defaults.package_name",
    "catalog.path",
    "catalog.versions_path",
    "output.no_color",
    "output.format",
    "output.reproducible",
];

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.emit(&value)?;
        }

        ConfigCommands::Set { key, value } => {
            let path = AppConfig::active_path(config_file.as_ref());
            set_config_value(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised = toml::to_string_pretty(&config)
                .with_cli_context(|| "failed to serialise config")?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.emit(
                &AppConfig::active_path(config_file.as_ref())
                    .display()
                    .to_string(),
            )?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
    match key {
        "defaults.platform_version" => Ok(config.defaults.platform_version.clone()),
        "defaults.build_system" => Ok(config.defaults.build_system.clone()),
        "defaults.language" => Ok(config.defaults.language.clone()),
        "defaults.group" => Ok(config.defaults.group.clone().unwrap_or_default()),
        "defaults.package_name" => Ok(config.defaults.package_name.clone().unwrap_or_default()),
        "catalog.path" => Ok(path(&config.catalog.path)),
        "catalog.versions_path" => Ok(path(&config.catalog.versions_path)),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "output.reproducible" => Ok(config.output.reproducible.to_string()),
        _ => Err(unknown_key(key)),
    }
}

fn unknown_key(key: &str) -> CliError {
    CliError::config(format!(
        "unknown config key '{key}'; known keys: {}",
        KEYS.join(", ")
    ))
}

/// Check `raw` for `key` and turn it into the TOML value to store.
fn parse_value(key: &str, raw: &str) -> CliResult<toml::Value> {
    let invalid = |reason: String| CliError::InvalidInput {
        message: format!("invalid value for {key}: {reason}"),
        source: None,
    };
    match key {
        "output.no_color" | "output.reproducible" => raw
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .map_err(|_| invalid(format!("expected true or false, got '{raw}'"))),
        "defaults.platform_version" => Version::parse(raw)
            .map(|_| toml::Value::String(raw.into()))
            .map_err(|e| invalid(e.to_string())),
        "defaults.build_system" => raw
            .parse::<BuildSystem>()
            .map(|b| toml::Value::String(b.to_string()))
            .map_err(|e| invalid(e.to_string())),
        "defaults.language" => raw
            .parse::<Language>()
            .map(|l| toml::Value::String(l.to_string()))
            .map_err(|e| invalid(e.to_string())),
        "output.format" => match raw.to_ascii_lowercase().as_str() {
            "json" | "yaml" => Ok(toml::Value::String(raw.to_ascii_lowercase())),
            _ => Err(invalid("expected json or yaml".into())),
        },
        k if KEYS.contains(&k) => Ok(toml::Value::String(raw.into())),
        _ => Err(unknown_key(key)),
    }
}

/// Write `key = value` into the file at `path`, keeping its other entries.
fn set_config_value(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let value = parse_value(key, raw)?;
    let (section, field) = key.split_once('.').ok_or_else(|| unknown_key(key))?;

    let mut document: toml::Table = if path.exists() {
        let text = fs::read_to_string(path)
            .with_cli_context(|| format!("failed to read {}", path.display()))?;
        text.parse().map_err(|e: toml::de::Error| CliError::ConfigError {
            message: format!("{} is not valid TOML", path.display()),
            source: Some(Box::new(e)),
        })?
    } else {
        debug!(path = %path.display(), "config file absent, starting empty");
        toml::Table::new()
    };

    let table = document
        .entry(section)
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| CliError::config(format!("'{section}' is not a table in {}", path.display())))?;
    table.insert(field.to_string(), value);

    let rendered = toml::to_string_pretty(&document)
        .with_cli_context(|| "failed to serialise config")?;
    toml::from_str::<AppConfig>(&rendered).map_err(|e| CliError::ConfigError {
        message: "resulting configuration is invalid".into(),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, rendered).with_cli_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), key, "configuration updated");
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn every_key_is_readable() {
        let cfg = AppConfig::default();
        for key in KEYS {
            assert!(get_config_value(&cfg, key).is_ok(), "unreadable: {key}");
        }
        assert_eq!(get_config_value(&cfg, "defaults.language").unwrap(), "java");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn set_creates_and_preserves_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        set_config_value(&path, "defaults.build_system", "Gradle").unwrap();
        set_config_value(&path, "output.reproducible", "true").unwrap();

        let cfg: AppConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cfg.defaults.build_system, "gradle");
        assert!(cfg.output.reproducible);
        assert_eq!(cfg.defaults.language, "java");
    }

    #[test]
    fn set_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(
            set_config_value(&path, "defaults.language", "cobol"),
            Err(CliError::InvalidInput { .. })
        ));
        assert!(set_config_value(&path, "output.no_color", "maybe").is_err());
        assert!(set_config_value(&path, "nope", "1").is_err());
        assert!(!path.exists());
    }
}
