//! Turns parsed arguments into a logger and feeds it messages.

use super::Cli;
use crate::config::{ConfigOption, LoggerConfig};
use crate::conflict::{ConflictPolicy, ConflictResolver};
use crate::error::Error;
use crate::internal;
use crate::level::Level;
use crate::logger::{LogStatus, Logger};
use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

/// Loads the config file, layers the command-line overrides on top, and provisions.
///
/// # Errors
/// Config loading/validation or provisioning failures.
pub fn build_logger(cli: &Cli) -> Result<Logger, Error> {
    let mut config = match &cli.config {
        Some(path) => LoggerConfig::load_from(path)?,
        None => LoggerConfig::load()?,
    };

    let overrides = [
        (ConfigOption::Directory, cli.directory.as_deref()),
        (ConfigOption::Filename, cli.filename.as_deref()),
        (ConfigOption::LineTemplate, cli.template.as_deref()),
        (ConfigOption::TimestampPattern, cli.timestamp.as_deref()),
        (ConfigOption::Prefix, cli.prefix.as_deref()),
        (ConfigOption::Postfix, cli.postfix.as_deref()),
    ];
    for (option, value) in overrides {
        if let Some(value) = value {
            config.set(option, value)?;
        }
    }
    if let Some(level) = cli.default_level {
        config.default_level = level.into();
    }
    if let Some(policy) = cli.policy {
        config.existing_file_policy = ConflictPolicy::from(policy);
    }

    let resolver = if cli.no_prompt {
        ConflictResolver::non_interactive()
    } else {
        ConflictResolver::interactive()
    };

    Logger::builder().config(config).resolver(resolver).build()
}

/// Entry point used by the binary.
#[must_use]
pub fn run(cli: &Cli) -> ExitCode {
    if cli.quiet {
        internal::set_level(None);
    }

    let logger = match build_logger(cli) {
        Ok(logger) => logger,
        Err(e) => {
            internal::error("CLI", &e.to_string());
            return ExitCode::FAILURE;
        }
    };
    let level = cli
        .level
        .map_or(logger.config().default_level, Level::from);

    if !cli.message.is_empty() {
        return exit_code(logger.log(level, &cli.message.join(" ")));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        internal::error("CLI", "Nothing to log: pass a message or pipe lines on stdin");
        return ExitCode::FAILURE;
    }

    let mut code = ExitCode::SUCCESS;
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                if logger.log(level, &line) != LogStatus::Written {
                    code = ExitCode::FAILURE;
                }
            }
            Err(e) => {
                internal::error("CLI", &format!("Failed to read stdin: {e}"));
                return ExitCode::FAILURE;
            }
        }
    }
    code
}

fn exit_code(status: LogStatus) -> ExitCode {
    match status {
        LogStatus::Written => ExitCode::SUCCESS,
        LogStatus::Disabled | LogStatus::Failed => ExitCode::FAILURE,
    }
}
