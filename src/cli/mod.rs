//! Command-line front end: one-shot or piped appends to a log file.

mod run;

pub use run::{build_logger, run};

use clap::Parser;
use std::path::PathBuf;

/// Level argument; mirrors [`crate::level::Level`] so clap can list the choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LevelArg {
    Info,
    Warning,
    Error,
    Fatal,
}

impl From<LevelArg> for crate::level::Level {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Info => Self::Info,
            LevelArg::Warning => Self::Warning,
            LevelArg::Error => Self::Error,
            LevelArg::Fatal => Self::Fatal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyArg {
    Append,
    Overwrite,
    Rename,
}

impl From<PolicyArg> for crate::conflict::ConflictPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Append => Self::Append,
            PolicyArg::Overwrite => Self::Overwrite,
            PolicyArg::Rename => Self::Rename,
        }
    }
}

/// linelog - append templated, timestamped lines to a log file.
///
/// With no MESSAGE, each line read from a piped stdin is logged.
#[derive(Debug, Parser)]
#[command(name = "linelog", version, about)]
pub struct Cli {
    /// Config file (default: <config dir>/linelog/linelog.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the log file
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<String>,

    /// Log file name
    #[arg(short, long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Level for the message (default: the configured default level)
    #[arg(short, long, value_enum)]
    pub level: Option<LevelArg>,

    /// Default level stored in the logger configuration
    #[arg(long, value_enum)]
    pub default_level: Option<LevelArg>,

    /// What to do when the log file already exists and nobody answers the prompt
    #[arg(short, long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Line template, e.g. "[{timestamp}] {logtype}: {message}"
    #[arg(short, long)]
    pub template: Option<String>,

    /// strftime-style timestamp pattern
    #[arg(long, value_name = "PATTERN")]
    pub timestamp: Option<String>,

    /// Value for the {prefix} placeholder
    #[arg(long)]
    pub prefix: Option<String>,

    /// Value for the {postfix} placeholder
    #[arg(long)]
    pub postfix: Option<String>,

    /// Never ask about an existing log file; apply the policy directly
    #[arg(long)]
    pub no_prompt: bool,

    /// Suppress linelog's own diagnostics on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Message to log
    pub message: Vec<String>,
}
