//! Configuration error types.

use crate::conflict::ParsePolicyError;
use crate::level::ParseLevelError;

/// A configuration value was rejected, or a config file could not be read.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a config file.
    Io(std::io::Error),
    /// TOML parsing error.
    Parse(toml::de::Error),
    /// The platform has no config directory.
    ConfigDirNotFound,
    /// Option name not recognized by `set_option`.
    UnknownOption(String),
    /// Level name outside `info`/`warning`/`error`/`fatal`.
    InvalidLevel(ParseLevelError),
    /// Policy name outside `append`/`overwrite`/`rename`.
    InvalidPolicy(ParsePolicyError),
    /// A required string option was empty.
    Empty(&'static str),
    /// Filename that is not a bare file name (contains a separator, or is `.`/`..`).
    InvalidFilename(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::UnknownOption(name) => write!(f, "unknown option: '{name}'"),
            Self::InvalidLevel(e) => write!(f, "{e}"),
            Self::InvalidPolicy(e) => write!(f, "{e}"),
            Self::Empty(option) => write!(f, "option '{option}' must not be empty"),
            Self::InvalidFilename(name) => write!(f, "invalid log filename: '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::InvalidLevel(e) => Some(e),
            Self::InvalidPolicy(e) => Some(e),
            Self::ConfigDirNotFound
            | Self::UnknownOption(_)
            | Self::Empty(_)
            | Self::InvalidFilename(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<ParseLevelError> for ConfigError {
    fn from(e: ParseLevelError) -> Self {
        Self::InvalidLevel(e)
    }
}

impl From<ParsePolicyError> for ConfigError {
    fn from(e: ParsePolicyError) -> Self {
        Self::InvalidPolicy(e)
    }
}
