//! The logger: configuration, the paused/enabled state machine, and level dispatch.
//!
//! ```text
//! Unprovisioned ──resume──▶ Provisioning ──ok──▶ Enabled ──pause / any setter──▶ Paused
//!                                 ▲                                               │
//!                                 └──────────────────── resume ◀──────────────────┘
//! ```
//!
//! Configuration changes always pause; nothing resumes implicitly, so a new path is
//! only provisioned (and conflict-checked) when the caller asks for it.

mod builder;

pub use builder::LoggerBuilder;

use crate::config::{ConfigOption, LoggerConfig, expand_directory};
use crate::conflict::{ConflictPolicy, ConflictResolver, Resolution};
use crate::error::Error;
use crate::fmt::{Clock, FormatTemplate, FormatValues, Placeholder, format_timestamp};
use crate::internal;
use crate::level::Level;
use crate::output::{self, FileHandle};
use std::path::{Path, PathBuf};

/// Receives append failures that `log` swallows.
pub type ErrorCallback = Box<dyn Fn(&Error) + Send + Sync>;

/// What a `log` call did. Logging never fails the caller; this is the side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    /// The line was appended.
    Written,
    /// The logger is paused; nothing happened.
    Disabled,
    /// The append failed and was reported.
    Failed,
}

/// Single-file line logger.
pub struct Logger {
    config: LoggerConfig,
    clock: Box<dyn Clock>,
    resolver: ConflictResolver,
    on_error: Option<ErrorCallback>,
    /// `Some` exactly while enabled.
    handle: Option<FileHandle>,
    last_resolution: Option<Resolution>,
    renamed_to: Option<PathBuf>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("resolver", &self.resolver)
            .field("enabled", &self.is_enabled())
            .field("last_resolution", &self.last_resolution)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Entry point for anything beyond a plain config: custom clock, prompt or error sink.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Builds a logger with the system clock and an interactive resolver, and provisions it.
    ///
    /// # Errors
    /// Invalid configuration, or provisioning failure.
    pub fn new(config: LoggerConfig) -> Result<Self, Error> {
        Self::builder().config(config).build()
    }

    fn from_parts(
        config: LoggerConfig,
        clock: Box<dyn Clock>,
        resolver: ConflictResolver,
        on_error: Option<ErrorCallback>,
    ) -> Self {
        Self {
            config,
            clock,
            resolver,
            on_error,
            handle: None,
            last_resolution: None,
            renamed_to: None,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub const fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Full path of the log file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.config.path()
    }

    /// How the last `resume` treated a pre-existing file, if there was one.
    #[must_use]
    pub const fn last_resolution(&self) -> Option<Resolution> {
        self.last_resolution
    }

    /// Where the last `resume` moved the previous file under the rename policy.
    #[must_use]
    pub fn renamed_to(&self) -> Option<&Path> {
        self.renamed_to.as_deref()
    }

    /// Closes the file and stops writing. No-op when already paused.
    pub fn pause(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.release();
            internal::info("LOGGER", "Paused");
        }
    }

    /// Provisions the file (directory, conflict resolution, open) and starts writing.
    /// No-op when already enabled.
    ///
    /// # Errors
    /// [`Error::Provisioning`]; the logger stays paused.
    pub fn resume(&mut self) -> Result<(), Error> {
        if self.is_enabled() {
            return Ok(());
        }

        let path = self.config.path();
        let provisioned = output::provision(
            &path,
            self.config.existing_file_policy,
            &self.resolver,
            self.clock.as_ref(),
        )
        .inspect_err(|e| internal::error("LOGGER", &e.to_string()))?;

        self.last_resolution = provisioned.resolution;
        self.renamed_to = provisioned.renamed_to;
        self.handle = Some(provisioned.handle);
        internal::info("LOGGER", &format!("Logging to {}", path.display()));
        Ok(())
    }

    /// Replaces the whole configuration. Validates first, then pauses; call
    /// [`resume`](Self::resume) to start writing under the new settings.
    ///
    /// # Errors
    /// [`Error::Config`] when `config` is invalid; nothing changes in that case.
    pub fn reconfigure(&mut self, config: LoggerConfig) -> Result<(), Error> {
        config.validate()?;
        self.pause();
        self.config = config;
        Ok(())
    }

    /// String-keyed setter, e.g. `set_option("default_level", "error")`.
    ///
    /// # Errors
    /// Unknown option, or a value the option rejects; nothing changes in that case.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let option: ConfigOption = name.parse()?;
        self.update(|config| config.set(option, value))
    }

    /// # Errors
    /// Empty names, `.`/`..`, and names containing a path separator are rejected.
    pub fn set_filename(&mut self, filename: &str) -> Result<(), Error> {
        self.update(|config| config.set(ConfigOption::Filename, filename))
    }

    /// Moves the log to another directory; `~` and empty paths are expanded the same
    /// way as the `directory` option.
    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        let directory = expand_directory(&directory.into());
        self.commit(|config| config.directory = directory);
    }

    /// # Errors
    /// An empty pattern is rejected.
    pub fn set_timestamp_pattern(&mut self, pattern: &str) -> Result<(), Error> {
        self.update(|config| config.set(ConfigOption::TimestampPattern, pattern))
    }

    /// # Errors
    /// [`Error::Template`] when the template does not parse.
    pub fn set_line_template(&mut self, template: &str) -> Result<(), Error> {
        let template = FormatTemplate::parse(template)?;
        self.commit(|config| config.line_template = template);
        Ok(())
    }

    /// Text substituted for `{prefix}` in the line template.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        self.commit(|config| config.prefix = prefix);
    }

    /// Text substituted for `{postfix}` in the line template.
    pub fn set_postfix(&mut self, postfix: impl Into<String>) {
        let postfix = postfix.into();
        self.commit(|config| config.postfix = postfix);
    }

    /// Level used by [`log_default`](Self::log_default).
    pub fn set_default_level(&mut self, level: Level) {
        self.commit(|config| config.default_level = level);
    }

    /// Policy applied when nobody answers the existing-file prompt.
    pub fn set_existing_file_policy(&mut self, policy: ConflictPolicy) {
        self.commit(|config| config.existing_file_policy = policy);
    }

    /// Applies a fallible edit to a copy; pauses and commits only if it succeeds.
    fn update(
        &mut self,
        edit: impl FnOnce(&mut LoggerConfig) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let mut next = self.config.clone();
        edit(&mut next)?;
        self.pause();
        self.config = next;
        Ok(())
    }

    fn commit(&mut self, edit: impl FnOnce(&mut LoggerConfig)) {
        self.pause();
        edit(&mut self.config);
    }

    /// The line `log` would write for this call, without writing it.
    #[must_use]
    pub fn render(&self, level: Level, message: &str) -> String {
        let template = &self.config.line_template;
        let timestamp = if template.uses(Placeholder::Timestamp) {
            format_timestamp(&self.config.timestamp_pattern, &self.clock.now())
        } else {
            String::new()
        };

        let values = FormatValues::new()
            .timestamp(timestamp)
            .logtype(level.as_str())
            .message(message)
            .prefix(self.config.prefix.as_str())
            .postfix(self.config.postfix.as_str());

        template.render(&values)
    }

    /// Writes one line at `level`. Never panics or returns an error: while paused this
    /// does nothing, and append failures go to the error callback and diagnostics.
    pub fn log(&self, level: Level, message: &str) -> LogStatus {
        let Some(handle) = &self.handle else {
            return LogStatus::Disabled;
        };

        match handle.append(&self.render(level, message)) {
            Ok(()) => LogStatus::Written,
            Err(e) => {
                internal::error("LOGGER", &e.to_string());
                if let Some(callback) = &self.on_error {
                    callback(&e);
                }
                LogStatus::Failed
            }
        }
    }

    /// Logs at the configured default level.
    pub fn log_default(&self, message: &str) -> LogStatus {
        self.log(self.config.default_level, message)
    }

    /// Routine events.
    pub fn info(&self, message: &str) -> LogStatus {
        self.log(Level::Info, message)
    }

    /// Something unexpected that the program recovered from.
    pub fn warning(&self, message: &str) -> LogStatus {
        self.log(Level::Warning, message)
    }

    /// An operation failed.
    pub fn error(&self, message: &str) -> LogStatus {
        self.log(Level::Error, message)
    }

    /// The program can't go on; logging still returns normally.
    pub fn fatal(&self, message: &str) -> LogStatus {
        self.log(Level::Fatal, message)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.pause();
    }
}
