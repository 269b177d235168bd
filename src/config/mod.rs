//! Logger configuration: the typed [`LoggerConfig`] the logger owns, the string-keyed
//! [`ConfigOption`] surface used by `set_option` and the CLI, and TOML file loading.

mod error;
mod structs;

pub use error::ConfigError;
pub use structs::ConfigFile;

use crate::conflict::ConflictPolicy;
use crate::fmt::FormatTemplate;
use crate::internal;
use crate::level::Level;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_FILENAME: &str = "main.log";
pub const DEFAULT_DIRECTORY: &str = ".";
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%d | %H:%M:%S.%f";
pub const DEFAULT_LINE_TEMPLATE: &str = "[{timestamp}] {logtype}: {message}";

/// Validated logger settings.
///
/// Fields are public for reading and for building a whole config to hand to
/// `Logger::reconfigure`, which re-validates before committing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub directory: PathBuf,
    pub filename: String,
    /// Level used by `Logger::log_default`.
    pub default_level: Level,
    pub timestamp_pattern: String,
    pub line_template: FormatTemplate,
    pub prefix: String,
    pub postfix: String,
    /// Applied when the log file already exists and nobody answers the prompt.
    pub existing_file_policy: ConflictPolicy,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            filename: DEFAULT_FILENAME.to_string(),
            default_level: Level::Info,
            timestamp_pattern: DEFAULT_TIMESTAMP_PATTERN.to_string(),
            line_template: FormatTemplate::default(),
            prefix: String::new(),
            postfix: String::new(),
            existing_file_policy: ConflictPolicy::Append,
        }
    }
}

impl LoggerConfig {
    /// Loads `linelog.toml` from the platform config directory, falling back to defaults
    /// when the file does not exist.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be read or
    /// parsed, or a value in it is invalid.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::get_config_path()?;
        if !path.exists() {
            internal::info("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config = Self::load_from(&path)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Loads configuration from an explicit path. Unlike [`load`](Self::load), a missing
    /// file is an error.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed, or holds an invalid value.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        let content = fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates TOML config text.
    ///
    /// # Errors
    /// Returns error on TOML syntax errors, unknown keys, or invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self, crate::Error> {
        let file: ConfigFile = toml::from_str(content).map_err(ConfigError::from)?;
        Self::try_from(file)
    }

    /// `<config dir>/linelog/linelog.toml`.
    ///
    /// # Errors
    /// Fails when the platform has no notion of a config directory.
    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("linelog").join("linelog.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Full path of the log file: `directory/filename`.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    /// Checks the invariants the field types can't express.
    ///
    /// # Errors
    /// [`ConfigError::InvalidFilename`] or [`ConfigError::Empty`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_filename(&self.filename)?;
        if self.timestamp_pattern.is_empty() {
            return Err(ConfigError::Empty(ConfigOption::TimestampPattern.as_str()));
        }
        Ok(())
    }

    /// Parses `value` for `option` and stores it. Nothing is changed on error.
    ///
    /// # Errors
    /// [`crate::Error::Config`] for bad names/values, [`crate::Error::Template`] for a
    /// template that doesn't parse.
    pub fn set(&mut self, option: ConfigOption, value: &str) -> Result<(), crate::Error> {
        match option {
            ConfigOption::Filename => {
                validate_filename(value)?;
                self.filename = value.to_string();
            }
            ConfigOption::Directory => self.directory = expand_directory(Path::new(value)),
            ConfigOption::DefaultLevel => {
                self.default_level = value.parse().map_err(ConfigError::from)?;
            }
            ConfigOption::TimestampPattern => {
                if value.is_empty() {
                    return Err(ConfigError::Empty(option.as_str()).into());
                }
                self.timestamp_pattern = value.to_string();
            }
            ConfigOption::LineTemplate => self.line_template = FormatTemplate::parse(value)?,
            ConfigOption::Prefix => self.prefix = value.to_string(),
            ConfigOption::Postfix => self.postfix = value.to_string(),
            ConfigOption::ExistingFilePolicy => {
                self.existing_file_policy = value.parse().map_err(ConfigError::from)?;
            }
        }
        Ok(())
    }
}

impl TryFrom<ConfigFile> for LoggerConfig {
    type Error = crate::Error;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let mut config = Self::default();
        config.set(ConfigOption::Filename, &file.filename)?;
        config.set(ConfigOption::Directory, &file.directory)?;
        config.set(ConfigOption::DefaultLevel, &file.default_level)?;
        config.set(ConfigOption::TimestampPattern, &file.timestamp_pattern)?;
        config.set(ConfigOption::LineTemplate, &file.line_template)?;
        config.set(ConfigOption::Prefix, &file.prefix)?;
        config.set(ConfigOption::Postfix, &file.postfix)?;
        config.set(ConfigOption::ExistingFilePolicy, &file.existing_file_policy)?;
        Ok(config)
    }
}

/// Names accepted by `Logger::set_option` and `LoggerConfig::set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    Filename,
    Directory,
    DefaultLevel,
    TimestampPattern,
    LineTemplate,
    Prefix,
    Postfix,
    ExistingFilePolicy,
}

impl ConfigOption {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::Directory => "directory",
            Self::DefaultLevel => "default_level",
            Self::TimestampPattern => "timestamp_pattern",
            Self::LineTemplate => "line_template",
            Self::Prefix => "prefix",
            Self::Postfix => "postfix",
            Self::ExistingFilePolicy => "existing_file_policy",
        }
    }

    pub const ALL: &'static [Self] = &[
        Self::Filename,
        Self::Directory,
        Self::DefaultLevel,
        Self::TimestampPattern,
        Self::LineTemplate,
        Self::Prefix,
        Self::Postfix,
        Self::ExistingFilePolicy,
    ];
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigOption {
    type Err = ConfigError;

    /// Accepts the canonical names, `-` in place of `_`, and short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "filename" | "file" => Ok(Self::Filename),
            "directory" | "dir" => Ok(Self::Directory),
            "default_level" | "level" => Ok(Self::DefaultLevel),
            "timestamp_pattern" | "timestamp" => Ok(Self::TimestampPattern),
            "line_template" | "template" | "format" => Ok(Self::LineTemplate),
            "prefix" => Ok(Self::Prefix),
            "postfix" => Ok(Self::Postfix),
            "existing_file_policy" | "policy" => Ok(Self::ExistingFilePolicy),
            _ => Err(ConfigError::UnknownOption(s.to_string())),
        }
    }
}

fn validate_filename(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Empty(ConfigOption::Filename.as_str()));
    }
    if name == "." || name == ".." || name.contains('/') || name.contains(std::path::MAIN_SEPARATOR)
    {
        return Err(ConfigError::InvalidFilename(name.to_string()));
    }
    Ok(())
}

/// Empty means the current directory; `~` expands to the home directory.
///
/// Every way of setting the directory goes through here so they all agree.
pub(crate) fn expand_directory(value: &Path) -> PathBuf {
    if value.as_os_str().is_empty() {
        return PathBuf::from(DEFAULT_DIRECTORY);
    }
    match value.to_str() {
        Some(text) => PathBuf::from(shellexpand::tilde(text).as_ref()),
        None => value.to_path_buf(),
    }
}
