//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kiln",
    bin_name = "kiln",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2692} Build models for generated JVM projects",
    long_about = "Kiln turns a project request (platform version, build tool, \
                  language, capabilities) into a customized build model and \
                  the container services that go with it.",
    after_help = "EXAMPLES:\n\
        \x20 kiln generate shop -d web,data-jpa,postgresql,docker-compose\n\
        \x20 kiln generate gw   -d cloud-gateway --platform 3.2.0 --build gradle\n\
        \x20 kiln list --facet reactive\n\
        \x20 kiln completions bash > /usr/share/bash-completion/completions/kiln",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a build model for a project.
    #[command(
        visible_alias = "gen",
        about = "Generate a build model",
        after_help = "EXAMPLES:\n\
            \x20 kiln generate shop -d web,data-jpa,postgresql,docker-compose\n\
            \x20 kiln generate api  -d webflux,data-mongodb --lang kotlin --build gradle\n\
            \x20 kiln generate demo -d kafka,testcontainers --dry-run"
    )]
    Generate(GenerateArgs),

    /// List catalog capabilities.
    #[command(
        visible_alias = "ls",
        about = "List available capabilities",
        after_help = "EXAMPLES:\n\
            \x20 kiln list\n\
            \x20 kiln list --facet reactive\n\
            \x20 kiln list --category SQL --platform 3.1.5"
    )]
    List(ListArgs),

    /// Show one capability.
    #[command(about = "Show details for a capability")]
    Info(InfoArgs),

    /// List registered container services.
    #[command(about = "List container services")]
    Services(ServicesArgs),

    /// Initialise a Kiln configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kiln init           # default location\n\
            \x20 kiln init --local   # .kiln.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kiln completions bash > ~/.local/share/bash-completion/completions/kiln\n\
            \x20 kiln completions zsh  > ~/.zfunc/_kiln\n\
            \x20 kiln completions fish > ~/.config/fish/completions/kiln.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Kiln configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kiln config get defaults.platform_version\n\
            \x20 kiln config set defaults.build_system gradle\n\
            \x20 kiln config list"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `kiln generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project name. Also the default output directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Capabilities to include.
    #[arg(
        short = 'd',
        long = "dependencies",
        value_name = "ID",
        value_delimiter = ',',
        help = "Capability ids, comma separated"
    )]
    pub dependencies: Vec<String>,

    /// Platform version, e.g. `3.2.0` or `3.3.0-M1`.
    #[arg(
        short = 'p',
        long = "platform",
        value_name = "VERSION",
        help = "Platform version (default from config)"
    )]
    pub platform: Option<String>,

    /// Build tool.
    #[arg(short = 'b', long = "build", value_enum, help = "Build tool")]
    pub build: Option<BuildTool>,

    /// Source language.
    #[arg(short = 'l', long = "lang", value_enum, help = "Source language")]
    pub language: Option<Lang>,

    /// Group id of the generated project.
    #[arg(short = 'g', long = "group", value_name = "GROUP")]
    pub group: Option<String>,

    /// Base package. Derived from group and name when omitted.
    #[arg(long = "package", value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Output directory.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory (default: ./NAME)"
    )]
    pub out: Option<PathBuf>,

    /// Format of the build model file.
    #[arg(long = "format", value_enum, help = "Build model format")]
    pub format: Option<ModelFormatArg>,

    /// Leave out timestamps and request ids.
    #[arg(long = "reproducible", help = "Produce byte-identical output")]
    pub reproducible: bool,

    /// Skip the overwrite confirmation.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation prompts")]
    pub yes: bool,

    /// Overwrite an existing directory (destructive).
    #[arg(long = "force", help = "Overwrite existing output directory")]
    pub force: bool,

    /// Run the pipelines and show the result without writing.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

/// Build tools accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuildTool {
    #[value(alias = "mvn")]
    Maven,
    Gradle,
}

/// Languages accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    Java,
    #[value(alias = "kt")]
    Kotlin,
    Groovy,
}

/// Build model file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelFormatArg {
    Json,
    #[value(alias = "yml")]
    Yaml,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `kiln list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only capabilities carrying this facet.
    #[arg(short = 'f', long = "facet", value_name = "FACET")]
    pub facet: Option<String>,

    /// Only capabilities in this category.
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Only capabilities compatible with this platform version.
    #[arg(short = 'p', long = "platform", value_name = "VERSION")]
    pub platform: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── info ──────────────────────────────────────────────────────────────────────

/// Arguments for `kiln info`.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Capability id.
    #[arg(value_name = "ID")]
    pub id: String,
}

// ── services ──────────────────────────────────────────────────────────────────

/// Arguments for `kiln services`.
#[derive(Debug, Args)]
pub struct ServicesArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ListFormat,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kiln init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.kiln.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kiln completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kiln config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.platform_version`.
        key: String,
    },
    /// Set a configuration key in the active config file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
