//! CLI errors, their exit codes and how they are shown to the user.

use std::error::Error as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use kiln_core::error::KilnError;

pub use kiln_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Project name validation failed.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// No capability with this id.
    #[error("Capability not found: {id}")]
    CapabilityNotFound { id: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `kiln-core` or an adapter.
    #[error(transparent)]
    Core(#[from] KilnError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    /// Hints printed under the error. Core errors bring their own.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Run the command with --help to see accepted values".into()],
            Self::InvalidProjectName { .. } => vec![
                "Names may contain letters, digits, '-' and '_' (e.g. order-service)".into(),
                "Pick a different location with --out".into(),
            ],
            Self::CapabilityNotFound { .. } => vec!["See every capability id with 'kiln list'".into()],
            Self::ConfigError { .. } => vec![
                "Locate the active file with 'kiln config path'".into(),
                "Recreate it with 'kiln init --force'".into(),
            ],
            Self::Core(core) => {
                let mut hints = core.suggestions();
                if core.category() == CoreCategory::NotFound {
                    hints.push("See every capability id with 'kiln list'".into());
                }
                hints
            }
            Self::IoError { .. } => vec!["Check that the target directory is writable".into()],
            Self::Cancelled => vec!["Nothing was written".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidProjectName { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::CapabilityNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    /// Process exit code: 2 user error, 3 not found, 4 configuration,
    /// 1 anything else.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Report with ANSI styling.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, &Palette::Colored)
    }

    /// Report without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, &Palette::Plain)
    }

    fn render(&self, verbose: bool, palette: &Palette) -> String {
        let mut report = format!("\n{}\n", palette.headline(&self.to_string()));

        if verbose {
            let causes = std::iter::successors(self.source(), |e| (*e).source());
            for cause in causes {
                report.push_str(&format!("  {}\n", palette.cause(&cause.to_string())));
            }
        }

        let hints = self.suggestions();
        if !hints.is_empty() {
            report.push_str(&format!("\n{}\n", palette.section("Suggestions:")));
            for hint in hints {
                report.push_str(&format!("  {hint}\n"));
            }
        }

        if !verbose {
            report.push_str(&format!(
                "\n{}\n",
                palette.note("Use -v / --verbose for more details.")
            ));
        }
        report
    }

    /// Emit a tracing event at a level matching the category.
    pub fn log(&self) {
        let cause = self.source().map(ToString::to_string);
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category = ?self.category(), cause = cause.as_deref(), "{self}");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), cause = cause.as_deref(), "{self}");
            }
        }
    }
}

/// Styling used by [`CliError::render`].
enum Palette {
    Colored,
    Plain,
}

impl Palette {
    fn headline(&self, msg: &str) -> String {
        match self {
            Self::Colored => format!("{} {}", "\u{2717} Error:".red().bold(), msg.red()),
            Self::Plain => format!("Error: {msg}"),
        }
    }

    fn cause(&self, msg: &str) -> String {
        match self {
            Self::Colored => format!("{} {}", "\u{2192}".dimmed(), msg.dimmed()),
            Self::Plain => format!("Caused by: {msg}"),
        }
    }

    fn section(&self, title: &str) -> String {
        match self {
            Self::Colored => title.yellow().bold().to_string(),
            Self::Plain => title.to_owned(),
        }
    }

    fn note(&self, msg: &str) -> String {
        match self {
            Self::Colored => format!("{} {}", "\u{2139}".blue(), msg.dimmed()),
            Self::Plain => msg.to_owned(),
        }
    }
}

/// How a failure is classified for exit codes and log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Attach a context message while converting a foreign error.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

/// Which [`CliError`] variant a foreign error becomes.
trait CliKind: std::error::Error + Send + Sync + Sized + 'static {
    fn wrap(self, message: String) -> CliError;
}

impl CliKind for std::io::Error {
    fn wrap(self, message: String) -> CliError {
        CliError::IoError {
            message,
            source: self,
        }
    }
}

impl CliKind for toml::ser::Error {
    fn wrap(self, message: String) -> CliError {
        CliError::ConfigError {
            message,
            source: Some(Box::new(self)),
        }
    }
}

impl CliKind for serde_json::Error {
    fn wrap(self, message: String) -> CliError {
        CliError::InvalidInput {
            message,
            source: Some(Box::new(self)),
        }
    }
}

impl<T, E: CliKind> IntoCli<T> for Result<T, E> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.wrap(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use kiln_core::application::ApplicationError;
    use kiln_core::domain::DomainError;

    #[test]
    fn unknown_capability_exits_not_found() {
        let err = CliError::Core(DomainError::UnknownCapability { id: "nope".into() }.into());
        assert_eq!(err.exit_code(), 3);
        assert!(err.suggestions().iter().any(|s| s.contains("kiln list")));
    }

    #[test]
    fn existing_output_is_a_user_error() {
        let err = CliError::Core(
            ApplicationError::OutputExists {
                path: PathBuf::from("/tmp/shop"),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn catalog_load_failure_is_configuration() {
        let err = CliError::Core(
            ApplicationError::CatalogLoad {
                path: PathBuf::from("extra.toml"),
                reason: "bad".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::CapabilityNotFound { id: "x".into() };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config"));
    }
}
