//! Unified error type for all linelog operations.

use crate::config::ConfigError;
use crate::fmt::TemplateError;
use std::path::PathBuf;

/// Error type for linelog operations.
#[derive(Debug)]
pub enum Error {
    /// Rejected configuration value or unreadable config file.
    Config(ConfigError),
    /// Line template that does not parse.
    Template(TemplateError),
    /// The log directory or file could not be prepared; the logger stays paused.
    Provisioning {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Appending a line failed.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Any other I/O error.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Template(e) => write!(f, "template error: {e}"),
            Self::Provisioning { path, source } => {
                write!(f, "cannot provision {}: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot write to {}: {source}", path.display())
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Template(e) => Some(e),
            Self::Provisioning { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TemplateError> for Error {
    fn from(e: TemplateError) -> Self {
        Self::Template(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
