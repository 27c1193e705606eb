//! Flags accepted before or after any subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level steps: warn, info, debug, trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level (pipeline progress)
    -vv     - Debug level (customizer decisions)
    -vvv    - Trace level (catalog and resolver internals)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors and requested data"
    )]
    pub quiet: bool,

    /// Also set by any non-empty `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Never use ANSI colours"
    )]
    pub no_color: bool,

    /// Replaces the per-user config file. Must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "KILN_CONFIG",
        value_name = "FILE",
        help = "Read configuration from FILE"
    )]
    pub config: Option<PathBuf>,

    /// Also write JSON logs to this file.
    #[arg(
        long = "log-file",
        global = true,
        env = "KILN_LOG_FILE",
        value_name = "FILE",
        help = "Write structured JSON logs to FILE"
    )]
    pub log_file: Option<PathBuf>,

    /// `json` switches every command to a machine-readable report.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Report style: auto, human, plain or json"
    )]
    pub output_format: OutputFormat,
}

/// Report style for stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `Human` on a terminal, `Plain` otherwise.
    #[default]
    Auto,
    /// Colours, symbols and spinners.
    Human,
    /// Same text, no styling.
    Plain,
    Json,
}
