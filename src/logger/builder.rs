//! Stepwise construction so tests and embedders can swap the clock, the prompt, and
//! the error sink without a constructor that takes all of them.

use super::{ErrorCallback, Logger};
use crate::config::{ConfigOption, LoggerConfig, expand_directory};
use crate::conflict::{ConflictPolicy, ConflictResolver, Prompt};
use crate::error::Error;
use crate::fmt::{Clock, FormatTemplate, SystemClock};
use crate::level::Level;
use std::path::PathBuf;

/// Values that can't be checked until `build` are kept as given and validated there.
#[derive(Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    line_template: Option<String>,
    options: Vec<(String, String)>,
    clock: Option<Box<dyn Clock>>,
    resolver: Option<ConflictResolver>,
    on_error: Option<ErrorCallback>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a whole config, e.g. one loaded from a file.
    #[must_use]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Same expansion as the `directory` config option: `~` is the home directory and
    /// an empty path is the current one.
    #[must_use]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = expand_directory(&directory.into());
        self
    }

    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.config.filename = filename.into();
        self
    }

    #[must_use]
    pub const fn default_level(mut self, level: Level) -> Self {
        self.config.default_level = level;
        self
    }

    #[must_use]
    pub fn timestamp_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.timestamp_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn line_template(mut self, template: impl Into<String>) -> Self {
        self.line_template = Some(template.into());
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.config.postfix = postfix.into();
        self
    }

    #[must_use]
    pub const fn existing_file_policy(mut self, policy: ConflictPolicy) -> Self {
        self.config.existing_file_policy = policy;
        self
    }

    /// String-keyed option, applied in order after the typed setters.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    #[must_use]
    pub fn resolver(mut self, resolver: ConflictResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Shorthand for a resolver around `prompt` with the default timeout and attempts.
    #[must_use]
    pub fn prompt(self, prompt: impl Prompt + 'static) -> Self {
        self.resolver(ConflictResolver::new(prompt))
    }

    /// Called with every append failure `log` swallows.
    #[must_use]
    pub fn on_error(mut self, callback: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Validates the configuration and returns a logger that has not touched the disk yet.
    ///
    /// # Errors
    /// [`Error::Config`] or [`Error::Template`] for invalid settings.
    pub fn build_paused(self) -> Result<Logger, Error> {
        let mut config = self.config;
        if let Some(template) = &self.line_template {
            config.line_template = FormatTemplate::parse(template)?;
        }
        for (name, value) in &self.options {
            let option: ConfigOption = name.parse()?;
            config.set(option, value)?;
        }
        config.validate()?;

        Ok(Logger::from_parts(
            config,
            self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            self.resolver.unwrap_or_else(ConflictResolver::interactive),
            self.on_error,
        ))
    }

    /// Validates, then provisions the log file.
    ///
    /// # Errors
    /// Invalid settings, or [`Error::Provisioning`].
    pub fn build(self) -> Result<Logger, Error> {
        let mut logger = self.build_paused()?;
        logger.resume()?;
        Ok(logger)
    }
}
