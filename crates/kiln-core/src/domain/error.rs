// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are cached and fanned out to waiting callers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Parse Errors
    // ========================================================================
    #[error("Malformed version '{input}': {reason}")]
    MalformedVersion { input: String, reason: String },

    #[error("Malformed version range '{input}': {reason}")]
    MalformedRange { input: String, reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project description: {0}")]
    InvalidDescription(String),

    #[error("Unknown capability '{id}'")]
    UnknownCapability { id: String },

    #[error("Capability '{id}' is not compatible with platform {platform} (requires {range})")]
    IncompatibleCapability {
        id: String,
        platform: String,
        range: String,
    },

    #[error("Plugin '{coordinate}' is only supported by {required}, not {actual}")]
    IncompatiblePlugin {
        coordinate: String,
        required: String,
        actual: String,
    },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Output Errors
    // ========================================================================
    #[error("Duplicate output path: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute path not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Catalog Errors
    // ========================================================================
    #[error("Catalog inconsistency for '{key}': {reason}")]
    CatalogInconsistency { key: String, reason: String },

    #[error("No service registered with id '{id}'")]
    ServiceNotFound { id: String },
}

impl DomainError {
    /// Shorthand used by customizers that hit a missing collaborator record.
    pub fn inconsistency(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CatalogInconsistency {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedVersion { input, .. } => vec![
                format!("'{}' is not a platform version", input),
                "Use MAJOR.MINOR.PATCH with an optional qualifier, e.g. 3.2.0 or 3.3.0-M1".into(),
            ],
            Self::MalformedRange { input, .. } => vec![
                format!("'{}' is not a version range", input),
                "Use [low,high) / (low,high] intervals or a single version meaning 'or later'"
                    .into(),
            ],
            Self::UnknownCapability { id } => vec![
                format!("No capability named '{}' exists in the catalog", id),
                "Try: kiln list".into(),
            ],
            Self::IncompatibleCapability { id, range, .. } => vec![
                format!("'{}' requires a platform version in {}", id, range),
                "Pick a different --platform or drop the dependency".into(),
            ],
            Self::CatalogInconsistency { key, .. } => vec![
                format!("The catalog entry for '{}' is incomplete", key),
                "This is a catalog defect, not a problem with your request".into(),
                "Check the catalog files passed via catalog.path".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedVersion { .. }
            | Self::InvalidDescription(_)
            | Self::MissingRequiredField { .. }
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::IncompatibleCapability { .. } | Self::IncompatiblePlugin { .. } => {
                ErrorCategory::Compatibility
            }
            Self::UnknownCapability { .. } | Self::ServiceNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::MalformedRange { .. } | Self::CatalogInconsistency { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
