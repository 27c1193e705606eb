//! The generation request: `ProjectDescription` and its typestate builder.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoPlatform` / `HasPlatform`)
//! so the platform version must be set before anything else. Cross-field
//! checks run in `build()`.
//!
//! This module must not import `tracing`.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    value_objects::{BuildSystem, Language},
    version::Version,
};

pub const DEFAULT_GROUP: &str = "com.example";
pub const DEFAULT_NAME: &str = "demo";
pub const DEFAULT_PROJECT_VERSION: &str = "0.0.1-SNAPSHOT";

/// A validated generation request.
///
/// Requested capability ids are an ordered set: first occurrence wins and
/// duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescription {
    platform_version: Version,
    build_system: BuildSystem,
    language: Language,
    group: String,
    artifact: String,
    name: String,
    version: String,
    package_name: String,
    dependencies: Vec<String>,
}

impl ProjectDescription {
    pub fn builder() -> DescriptionBuilder<NoPlatform> {
        DescriptionBuilder::new()
    }

    pub fn platform_version(&self) -> &Version {
        &self.platform_version
    }
    pub const fn build_system(&self) -> BuildSystem {
        self.build_system
    }
    pub const fn language(&self) -> Language {
        self.language
    }
    pub fn group(&self) -> &str {
        &self.group
    }
    pub fn artifact(&self) -> &str {
        &self.artifact
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn package_name(&self) -> &str {
        &self.package_name
    }
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn is_requested(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }

    /// Re-check invariants. Called by the builder.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        if self.artifact.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "artifact" });
        }
        if !is_valid_package(&self.group) {
            return Err(DomainError::InvalidDescription(format!(
                "group '{}' is not a dotted identifier",
                self.group
            )));
        }
        if !is_valid_package(&self.package_name) {
            return Err(DomainError::InvalidDescription(format!(
                "package name '{}' is not a valid package",
                self.package_name
            )));
        }
        if let Some(blank) = self.dependencies.iter().find(|d| d.trim().is_empty()) {
            return Err(DomainError::InvalidDescription(format!(
                "dependency id '{blank}' is blank"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ProjectDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} ({} {}, platform {})",
            self.group, self.artifact, self.language, self.build_system, self.platform_version
        )
    }
}

fn is_valid_package(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// `com.example` + `My-App` → `com.example.myapp`.
fn derive_package_name(group: &str, artifact: &str) -> String {
    let tail: String = artifact
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    if tail.is_empty() || tail.starts_with(|c: char| c.is_ascii_digit()) {
        return group.to_string();
    }
    format!("{group}.{tail}")
}

// ── Typestate markers ─────────────────────────────────────────────────────────

pub struct NoPlatform;
pub struct HasPlatform;

// ── Builder ───────────────────────────────────────────────────────────────────

pub struct DescriptionBuilder<P> {
    platform_version: Option<Version>,
    build_system: BuildSystem,
    language: Language,
    group: Option<String>,
    artifact: Option<String>,
    name: Option<String>,
    version: Option<String>,
    package_name: Option<String>,
    dependencies: Vec<String>,
    _marker: PhantomData<P>,
}

impl DescriptionBuilder<NoPlatform> {
    fn new() -> Self {
        Self {
            platform_version: None,
            build_system: BuildSystem::Maven,
            language: Language::Java,
            group: None,
            artifact: None,
            name: None,
            version: None,
            package_name: None,
            dependencies: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn platform(self, version: Version) -> DescriptionBuilder<HasPlatform> {
        DescriptionBuilder {
            platform_version: Some(version),
            build_system: self.build_system,
            language: self.language,
            group: self.group,
            artifact: self.artifact,
            name: self.name,
            version: self.version,
            package_name: self.package_name,
            dependencies: self.dependencies,
            _marker: PhantomData,
        }
    }

    /// Parse and set the platform version.
    pub fn platform_str(self, version: &str) -> Result<DescriptionBuilder<HasPlatform>, DomainError> {
        Ok(self.platform(Version::parse(version)?))
    }
}

impl DescriptionBuilder<HasPlatform> {
    pub fn build_system(mut self, build_system: BuildSystem) -> Self {
        self.build_system = build_system;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Request a capability. Duplicates are ignored.
    pub fn dependency(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !self.dependencies.contains(&id) {
            self.dependencies.push(id);
        }
        self
    }

    pub fn dependencies<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter().fold(self, |b, id| b.dependency(id))
    }

    pub fn build(self) -> Result<ProjectDescription, DomainError> {
        let platform_version = self
            .platform_version
            .ok_or(DomainError::MissingRequiredField {
                field: "platform_version",
            })?;
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        let artifact = self.artifact.unwrap_or_else(|| name.clone());
        let group = self.group.unwrap_or_else(|| DEFAULT_GROUP.to_string());
        let package_name = self
            .package_name
            .unwrap_or_else(|| derive_package_name(&group, &artifact));

        let description = ProjectDescription {
            platform_version,
            build_system: self.build_system,
            language: self.language,
            group,
            artifact,
            name,
            version: self
                .version
                .unwrap_or_else(|| DEFAULT_PROJECT_VERSION.to_string()),
            package_name,
            dependencies: self.dependencies,
        };
        description.validate()?;
        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DescriptionBuilder<HasPlatform> {
        ProjectDescription::builder().platform(Version::new(3, 2, 0))
    }

    #[test]
    fn defaults_are_applied() {
        let d = base().build().unwrap();
        assert_eq!(d.name(), "demo");
        assert_eq!(d.artifact(), "demo");
        assert_eq!(d.group(), "com.example");
        assert_eq!(d.package_name(), "com.example.demo");
        assert_eq!(d.build_system(), BuildSystem::Maven);
        assert_eq!(d.language(), Language::Java);
        assert_eq!(d.version(), "0.0.1-SNAPSHOT");
    }

    #[test]
    fn dependencies_are_an_ordered_set() {
        let d = base()
            .dependencies(["web", "data-jpa", "web", "actuator"])
            .build()
            .unwrap();
        assert_eq!(d.dependencies(), ["web", "data-jpa", "actuator"]);
        assert!(d.is_requested("data-jpa"));
        assert!(!d.is_requested("webflux"));
    }

    #[test]
    fn package_name_is_derived_from_artifact() {
        let d = base().name("My-App").build().unwrap();
        assert_eq!(d.package_name(), "com.example.myapp");
    }

    #[test]
    fn invalid_package_is_rejected() {
        let err = base().package_name("com.1bad").build().unwrap_err();
        assert!(matches!(err, DomainError::InvalidDescription(_)));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = base().name("  ").artifact("x").build().unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "name" });
    }

    #[test]
    fn platform_str_propagates_parse_errors() {
        assert!(ProjectDescription::builder().platform_str("three").is_err());
    }
}
