//! Where conflict answers come from.

use crate::internal;
use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, poll};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::os::fd::AsFd;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Asks a question and waits a bounded time for a one-line answer.
///
/// `None` means no answer arrived in time (or no one can answer at all).
pub trait Prompt: Send + Sync {
    fn ask(&self, question: &str, timeout: Duration) -> Option<String>;
}

/// Reads answers from the process's stdin, printing the question to stderr.
///
/// Nothing runs between prompts. Each `ask` polls stdin until the deadline and
/// reads the answer a byte at a time, stopping at the newline, so whatever the user
/// types afterwards is still there for the host program.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    /// Whether stdin is attached to a terminal someone could type into.
    #[must_use]
    pub fn is_available() -> bool {
        io::stdin().is_terminal()
    }
}

impl Prompt for StdinPrompt {
    fn ask(&self, question: &str, timeout: Duration) -> Option<String> {
        let stdin = io::stdin().lock();
        // Reads go through a duplicate descriptor so std's stdin buffer never gets
        // more than the answer.
        let mut input = match stdin.as_fd().try_clone_to_owned() {
            Ok(fd) => File::from(fd),
            Err(e) => {
                internal::error("PROMPT", &format!("Could not read stdin: {e}"));
                return None;
            }
        };

        show(question);
        let answer = read_answer(&mut input, timeout);
        if answer.is_none() {
            eprintln!();
        }
        answer
    }
}

/// Prompts on stderr and reads answers from any pollable descriptor, such as a pipe
/// or a tty opened by the embedding program.
#[derive(Debug)]
pub struct FdPrompt<R> {
    input: Mutex<R>,
}

impl<R: Read + AsFd + Send> FdPrompt<R> {
    #[must_use]
    pub const fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }

    /// Hands the descriptor back; unread input is still in it.
    pub fn into_inner(self) -> R {
        self.input.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Read + AsFd + Send> Prompt for FdPrompt<R> {
    fn ask(&self, question: &str, timeout: Duration) -> Option<String> {
        let mut input = self.input.lock().unwrap_or_else(PoisonError::into_inner);
        show(question);
        read_answer(&mut *input, timeout)
    }
}

fn show(question: &str) {
    let mut stderr = io::stderr().lock();
    let _ = write!(stderr, "{question}");
    let _ = stderr.flush();
}

/// One line from `input`, without its line ending, or `None` if the deadline passes
/// first or the input ends before anything was typed.
fn read_answer<R: Read + AsFd>(input: &mut R, timeout: Duration) -> Option<String> {
    let deadline = Instant::now() + timeout;
    let mut line = Vec::new();

    loop {
        match wait_readable(input, deadline) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                internal::error("PROMPT", &format!("Could not wait for an answer: {e}"));
                return None;
            }
        }

        let mut byte = [0_u8; 1];
        match input.read(&mut byte) {
            Ok(0) if line.is_empty() => return None,
            Ok(0) => break,
            Ok(_) if byte[0] == b'\n' => break,
            Ok(_) => line.push(byte[0]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                internal::error("PROMPT", &format!("Could not read the answer: {e}"));
                return None;
            }
        }
    }

    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Some(String::from_utf8_lossy(&line).into_owned())
}

fn wait_readable(input: &impl AsFd, deadline: Instant) -> io::Result<bool> {
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let millis = i32::try_from(remaining.as_millis()).unwrap_or(i32::MAX);
        let mut fds = [PollFd::new(input, PollFlags::POLLIN)];
        match poll(&mut fds, millis) {
            Ok(0) => return Ok(false),
            Ok(_) => return Ok(true),
            Err(Errno::EINTR) => {}
            Err(e) => return Err(e.into()),
        }
    }
}

/// Never answers, so every conflict resolves to the configured default straight away.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn ask(&self, _question: &str, _timeout: Duration) -> Option<String> {
        None
    }
}

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
}

/// Replays a fixed list of answers, then behaves like a timeout.
///
/// Clones share state, so a test can keep one handle and inspect what was asked
/// after moving the other into a logger.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    script: Arc<Mutex<Script>>,
}

impl ScriptedPrompt {
    /// `None` entries simulate a prompt that timed out.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let answers = answers.into_iter().map(|a| a.map(Into::into)).collect();
        Self {
            script: Arc::new(Mutex::new(Script {
                answers,
                asked: Vec::new(),
            })),
        }
    }

    /// Shorthand for a script where every answer arrives.
    #[must_use]
    pub fn answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(answers.into_iter().map(Some))
    }

    /// Queues another answer.
    pub fn push(&self, answer: Option<&str>) {
        self.lock().answers.push_back(answer.map(ToString::to_string));
    }

    /// Every question asked so far, in order.
    #[must_use]
    pub fn asked(&self) -> Vec<String> {
        self.lock().asked.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str, _timeout: Duration) -> Option<String> {
        let mut script = self.lock();
        script.asked.push(question.to_string());
        script.answers.pop_front().flatten()
    }
}
