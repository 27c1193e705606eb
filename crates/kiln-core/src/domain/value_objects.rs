//! Domain value objects: BuildSystem, Language, DependencyScope.
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! Each has a canonical string form and a `FromStr` parser accepting the
//! common aliases users type on the command line.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── BuildSystem ──────────────────────────────────────────────────────────────

/// The build tool the generated project uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    Maven,
    Gradle,
}

impl BuildSystem {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Gradle => "gradle",
        }
    }
}

impl fmt::Display for BuildSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maven" | "mvn" | "maven-project" => Ok(Self::Maven),
            "gradle" | "gradle-project" | "gradle-kotlin" | "gradle-groovy" => Ok(Self::Gradle),
            other => Err(DomainError::InvalidDescription(format!(
                "unknown build system: {other}"
            ))),
        }
    }
}

// ── Language ─────────────────────────────────────────────────────────────────

/// The JVM language of the generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Kotlin,
    Groovy,
}

impl Language {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::Groovy => "groovy",
        }
    }

    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kt",
            Self::Groovy => "groovy",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "kotlin" | "kt" => Ok(Self::Kotlin),
            "groovy" => Ok(Self::Groovy),
            other => Err(DomainError::InvalidDescription(format!(
                "unknown language: {other}"
            ))),
        }
    }
}

// ── DependencyScope ──────────────────────────────────────────────────────────

/// Where a dependency is visible in the generated build.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    #[default]
    Compile,
    Runtime,
    TestCompile,
    TestRuntime,
    AnnotationProcessor,
    Provided,
}

impl DependencyScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::TestCompile => "test-compile",
            Self::TestRuntime => "test-runtime",
            Self::AnnotationProcessor => "annotation-processor",
            Self::Provided => "provided",
        }
    }

    pub const fn is_test(self) -> bool {
        matches!(self, Self::TestCompile | Self::TestRuntime)
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compile" => Ok(Self::Compile),
            "runtime" => Ok(Self::Runtime),
            "test" | "test-compile" => Ok(Self::TestCompile),
            "test-runtime" => Ok(Self::TestRuntime),
            "annotation-processor" | "annotationprocessor" => Ok(Self::AnnotationProcessor),
            "provided" | "compile-only" => Ok(Self::Provided),
            other => Err(DomainError::InvalidDescription(format!(
                "unknown dependency scope: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_system_from_str_accepts_aliases() {
        assert_eq!("mvn".parse::<BuildSystem>().unwrap(), BuildSystem::Maven);
        assert_eq!(
            "gradle-kotlin".parse::<BuildSystem>().unwrap(),
            BuildSystem::Gradle
        );
        assert!("ant".parse::<BuildSystem>().is_err());
    }

    #[test]
    fn language_display_is_lowercase() {
        assert_eq!(Language::Kotlin.to_string(), "kotlin");
        assert_eq!(Language::Java.to_string(), "java");
    }

    #[test]
    fn language_from_str_unknown_errors() {
        assert!("scala".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn scope_parses_build_tool_spellings() {
        assert_eq!(
            "test".parse::<DependencyScope>().unwrap(),
            DependencyScope::TestCompile
        );
        assert_eq!(
            "compile-only".parse::<DependencyScope>().unwrap(),
            DependencyScope::Provided
        );
    }

    #[test]
    fn test_scopes_are_flagged() {
        assert!(DependencyScope::TestCompile.is_test());
        assert!(DependencyScope::TestRuntime.is_test());
        assert!(!DependencyScope::Runtime.is_test());
    }
}
