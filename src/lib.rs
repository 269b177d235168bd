//! `linelog` - templated, timestamped line logging to a single file.
//!
//! - Lines are rendered from a template (`[{timestamp}] {logtype}: {message}` by default)
//!   with a strftime-style timestamp
//! - Four levels: info, warning, error, fatal, plus a configurable default level
//! - A file that already exists is appended to, overwritten, or renamed aside, decided
//!   by a time-boxed prompt that falls back to a configured policy
//! - Any configuration change pauses the logger until `resume` provisions the file again
//! - Logging calls never fail the caller
//!
//! # Example
//!
//! ```no_run
//! use linelog::{ConflictPolicy, Level, Logger};
//!
//! # fn main() -> Result<(), linelog::Error> {
//! let mut logger = Logger::builder()
//!     .directory("logs")
//!     .filename("app.log")
//!     .existing_file_policy(ConflictPolicy::Rename)
//!     .build()?;
//!
//! logger.info("Application started");
//! logger.warning("Cache directory missing, rebuilding");
//!
//! logger.set_prefix("worker-1");
//! logger.set_line_template("[{timestamp}] {prefix} {logtype}: {message}")?;
//! logger.resume()?;
//! logger.log(Level::Error, "Job 42 failed");
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `linelog` command-line binary

pub mod config;
pub mod conflict;
mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod logger;
pub mod output;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

pub use config::{ConfigError, ConfigOption, LoggerConfig};
pub use conflict::{
    ConflictPolicy, ConflictResolver, FdPrompt, NoPrompt, Outcome, Prompt, Resolution,
    ScriptedPrompt, StdinPrompt,
};
pub use error::Error;
pub use fmt::{Clock, FixedClock, FormatTemplate, FormatValues, SystemClock, TemplateError};
pub use level::Level;
pub use logger::{LogStatus, Logger, LoggerBuilder};
pub use output::FileHandle;
