//! What to do when the log file is already there at provisioning time.
//!
//! The user gets a short, time-boxed prompt. Silence, an empty answer, or three
//! unusable answers in a row all land on the configured default, so an unattended
//! process never hangs on a question nobody will answer.

mod prompt;

pub use prompt::{FdPrompt, NoPrompt, Prompt, ScriptedPrompt, StdinPrompt};

use crate::internal;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// How long a single prompt waits for an answer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Invalid answers tolerated before falling back to the default.
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Treatment of a log file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConflictPolicy {
    /// Keep the old lines and add new ones after them.
    #[default]
    Append,
    /// Empty the file first.
    Overwrite,
    /// Move the old file aside and start a fresh one under the original name.
    Rename,
}

impl ConflictPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Overwrite => "overwrite",
            Self::Rename => "rename",
        }
    }

    /// Key the user types at the prompt.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Append => 'a',
            Self::Overwrite => 'o',
            Self::Rename => 'r',
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Append, Self::Overwrite, Self::Rename]
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError(String);

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown file policy: '{}' (expected append, overwrite or rename)",
            self.0
        )
    }
}

impl std::error::Error for ParsePolicyError {}

impl FromStr for ConflictPolicy {
    type Err = ParsePolicyError;

    /// Full names and single letters, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "append" => Ok(Self::Append),
            "o" | "overwrite" => Ok(Self::Overwrite),
            "r" | "rename" => Ok(Self::Rename),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Why a policy was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user typed a valid choice.
    Answered,
    /// Nothing arrived before the timeout.
    TimedOut,
    /// The user just pressed enter.
    EmptyAnswer,
    /// Every attempt got an answer that matched no policy.
    AttemptsExhausted,
}

impl Outcome {
    /// True when the default policy was applied without an explicit choice.
    #[must_use]
    pub const fn is_default(self) -> bool {
        !matches!(self, Self::Answered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub policy: ConflictPolicy,
    pub outcome: Outcome,
}

/// Runs the prompt protocol against a [`Prompt`].
pub struct ConflictResolver {
    prompt: Box<dyn Prompt>,
    timeout: Duration,
    max_attempts: u32,
}

impl fmt::Debug for ConflictResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConflictResolver")
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

impl Default for ConflictResolver {
    fn default() -> Self {
        Self::interactive()
    }
}

impl ConflictResolver {
    #[must_use]
    pub fn new(prompt: impl Prompt + 'static) -> Self {
        Self {
            prompt: Box::new(prompt),
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }

    /// Prompts on the terminal when there is one; otherwise takes the default at once.
    #[must_use]
    pub fn interactive() -> Self {
        if StdinPrompt::is_available() {
            Self::new(StdinPrompt)
        } else {
            Self::non_interactive()
        }
    }

    /// Never asks.
    #[must_use]
    pub fn non_interactive() -> Self {
        Self::new(NoPrompt)
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Clamped to at least one attempt.
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Prompt text with the default choice capitalized, e.g.
    /// `Log file ./main.log already exists. [A]ppend, (o)verwrite or (r)ename? [A/o/r]: `.
    #[must_use]
    pub fn question(path: &Path, default: ConflictPolicy) -> String {
        let mut words = Vec::with_capacity(3);
        let mut keys = Vec::with_capacity(3);
        for policy in ConflictPolicy::all() {
            let name = policy.as_str();
            if policy == default {
                words.push(format!("[{}]{}", policy.letter().to_ascii_uppercase(), &name[1..]));
                keys.push(policy.letter().to_ascii_uppercase().to_string());
            } else {
                words.push(format!("({}){}", policy.letter(), &name[1..]));
                keys.push(policy.letter().to_string());
            }
        }
        format!(
            "Log file {} already exists. {}, {} or {}? [{}]: ",
            path.display(),
            words[0],
            words[1],
            words[2],
            keys.join("/")
        )
    }

    /// Asks what to do with the existing file at `path`.
    #[must_use]
    pub fn resolve(&self, path: &Path, default: ConflictPolicy) -> Resolution {
        let question = Self::question(path, default);

        for attempt in 1..=self.max_attempts {
            let Some(answer) = self.prompt.ask(&question, self.timeout) else {
                internal::warn(
                    "CONFLICT",
                    &format!(
                        "No answer received, using default policy '{default}' for {}",
                        path.display()
                    ),
                );
                return Resolution {
                    policy: default,
                    outcome: Outcome::TimedOut,
                };
            };

            let answer = answer.trim();
            if answer.is_empty() {
                internal::warn(
                    "CONFLICT",
                    &format!("Using default policy '{default}' for {}", path.display()),
                );
                return Resolution {
                    policy: default,
                    outcome: Outcome::EmptyAnswer,
                };
            }

            match answer.parse::<ConflictPolicy>() {
                Ok(policy) => {
                    internal::info(
                        "CONFLICT",
                        &format!("Using policy '{policy}' for {}", path.display()),
                    );
                    return Resolution {
                        policy,
                        outcome: Outcome::Answered,
                    };
                }
                Err(_) => internal::warn(
                    "CONFLICT",
                    &format!(
                        "Invalid choice '{answer}' (attempt {attempt}/{})",
                        self.max_attempts
                    ),
                ),
            }
        }

        internal::warn(
            "CONFLICT",
            &format!(
                "No valid choice after {} attempts, using default policy '{default}' for {}",
                self.max_attempts,
                path.display()
            ),
        );
        Resolution {
            policy: default,
            outcome: Outcome::AttemptsExhausted,
        }
    }
}
