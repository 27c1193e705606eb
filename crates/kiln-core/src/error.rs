//! The error type every public `kiln-core` operation returns.
//!
//! Domain and application errors keep their own enums; [`KilnError`] wraps
//! both and adds setup and internal failures.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone)]
pub enum KilnError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Catalog or resolver setup that cannot work.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl KilnError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => {
                vec!["Check the catalog and versions paths in your configuration".into()]
            }
            Self::Internal { .. } => {
                vec!["Report it at https://github.com/cosecruz/kiln/issues".into()]
            }
        }
    }

    /// Category used for exit codes. A customizer failure takes the
    /// category of what went wrong inside it.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The innermost domain error, looking through customizer failures.
    pub fn domain_cause(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Application(ApplicationError::CustomizationFailed { source, .. }) => {
                source.domain_cause()
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    Internal,
}

pub type KilnResult<T> = Result<T, KilnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customization_failure_reports_inner_category() {
        let err: KilnError = ApplicationError::customization_failed(
            "TestCompanionCustomizer",
            DomainError::inconsistency("kafka", "base record missing").into(),
        )
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(matches!(
            err.domain_cause(),
            Some(DomainError::CatalogInconsistency { .. })
        ));
        assert!(err.to_string().contains("TestCompanionCustomizer"));
    }
}
