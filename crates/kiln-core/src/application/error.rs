//! Application layer errors.
//!
//! These errors represent failures in orchestration and collaborators, not
//! business rules. Business rule violations are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, KilnError};

/// Errors that occur while running a generation request.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A customizer failed; the rest of the pipeline was skipped.
    #[error("Customizer '{customizer}' failed: {source}")]
    CustomizationFailed {
        customizer: String,
        source: Box<KilnError>,
    },

    /// The version catalog could not resolve a coordinate.
    #[error("Version resolution failed for {coordinate}: {reason}")]
    VersionResolution { coordinate: String, reason: String },

    /// A catalog file could not be read or parsed.
    #[error("Failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A shared lock was poisoned by a panicking holder.
    #[error("{resource} lock poisoned")]
    LockPoisoned { resource: &'static str },

    /// Serializing the generation result failed.
    #[error("Rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Output directory already exists.
    #[error("Output already exists at {path}")]
    OutputExists { path: PathBuf },
}

impl ApplicationError {
    pub fn customization_failed(customizer: impl Into<String>, source: KilnError) -> Self {
        Self::CustomizationFailed {
            customizer: customizer.into(),
            source: Box::new(source),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CustomizationFailed { customizer, source } => {
                let mut hints = vec![format!("Generation stopped in '{}'", customizer)];
                hints.extend(source.suggestions());
                hints
            }
            Self::VersionResolution { coordinate, .. } => vec![
                format!("No managed versions found for {}", coordinate),
                "Check catalog.versions_path or pick a platform version it lists".into(),
            ],
            Self::CatalogLoad { path, .. } => vec![
                format!("Could not read catalog file: {}", path.display()),
                "Fix the file or point catalog.path elsewhere".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::LockPoisoned { resource } => {
                vec![format!("A previous {resource} operation panicked; restart kiln")]
            }
            Self::OutputExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different output directory".into(),
            ],
            Self::RenderingFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CustomizationFailed { source, .. } => source.category(),
            Self::VersionResolution { .. } => ErrorCategory::NotFound,
            Self::CatalogLoad { .. } => ErrorCategory::Configuration,
            Self::OutputExists { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. }
            | Self::LockPoisoned { .. }
            | Self::RenderingFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
