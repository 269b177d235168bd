//! On-disk config file schema.

use super::{
    DEFAULT_DIRECTORY, DEFAULT_FILENAME, DEFAULT_LINE_TEMPLATE, DEFAULT_TIMESTAMP_PATTERN,
};
use serde::Deserialize;

/// Everything is a string here; validation into typed values happens in
/// `LoggerConfig::try_from`, so a bad level name produces a `ConfigError` naming the
/// option rather than a serde message about enum variants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub filename: String,
    /// `~` is expanded.
    pub directory: String,
    pub default_level: String,
    pub timestamp_pattern: String,
    pub line_template: String,
    pub prefix: String,
    pub postfix: String,
    pub existing_file_policy: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            directory: DEFAULT_DIRECTORY.to_string(),
            default_level: "info".to_string(),
            timestamp_pattern: DEFAULT_TIMESTAMP_PATTERN.to_string(),
            line_template: DEFAULT_LINE_TEMPLATE.to_string(),
            prefix: String::new(),
            postfix: String::new(),
            existing_file_policy: "append".to_string(),
        }
    }
}
