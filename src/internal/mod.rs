//! linelog's own diagnostics about directories, conflict decisions and write failures.
//!
//! These go to stderr, never into the log file being managed. The threshold is
//! process-wide: `warning` unless `LINELOG_DIAGNOSTICS` names another level (or `off`)
//! at first use, or [`set_level`] is called.

use crate::level::Level;
use std::cell::RefCell;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};

const UNSET: u8 = u8::MAX;
const OFF: u8 = u8::MAX - 1;

static THRESHOLD: AtomicU8 = AtomicU8::new(UNSET);

thread_local! {
    /// Set while a [`capture`] is running on this thread.
    static CAPTURED: RefCell<Option<Vec<Diagnostic>>> = const { RefCell::new(None) };
}

/// One diagnostic as recorded by [`capture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub scope: String,
    pub message: String,
}

/// Runs `f` and returns what it reported on this thread instead of printing it.
///
/// Everything is recorded whatever the threshold, so callers can check that a notice
/// was produced without depending on `LINELOG_DIAGNOSTICS`. Other threads keep
/// printing as usual.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Diagnostic>) {
    struct Restore(Option<Vec<Diagnostic>>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let outer = self.0.take();
            CAPTURED.with_borrow_mut(|slot| *slot = outer);
        }
    }

    let outer = CAPTURED.with_borrow_mut(|slot| slot.replace(Vec::new()));
    let restore = Restore(outer);
    let result = f();
    let captured = CAPTURED
        .with_borrow_mut(Option::take)
        .unwrap_or_default();
    drop(restore);
    (result, captured)
}

/// Changes the diagnostics threshold; `None` silences them entirely.
pub fn set_level(level: Option<Level>) {
    THRESHOLD.store(level.map_or(OFF, |l| l as u8), Ordering::Relaxed);
}

/// Current threshold, `None` when silenced.
#[must_use]
pub fn level() -> Option<Level> {
    let mut raw = THRESHOLD.load(Ordering::Relaxed);
    if raw == UNSET {
        raw = threshold_from_env();
        // Lose the race gracefully if set_level ran in between.
        let _ = THRESHOLD.compare_exchange(UNSET, raw, Ordering::Relaxed, Ordering::Relaxed);
        raw = THRESHOLD.load(Ordering::Relaxed);
    }
    Level::all().into_iter().find(|l| *l as u8 == raw)
}

fn threshold_from_env() -> u8 {
    match std::env::var("LINELOG_DIAGNOSTICS") {
        Ok(value) if matches!(value.trim().to_lowercase().as_str(), "off" | "none" | "0") => OFF,
        Ok(value) => value.parse::<Level>().map_or(Level::Warning as u8, |l| l as u8),
        Err(_) => Level::Warning as u8,
    }
}

fn log(level: Level, scope: &str, msg: &str) {
    let captured = CAPTURED.with_borrow_mut(|slot| {
        slot.as_mut().map(|diagnostics| {
            diagnostics.push(Diagnostic {
                level,
                scope: scope.to_string(),
                message: msg.to_string(),
            });
        })
    });
    if captured.is_some() {
        return;
    }

    if self::level().is_some_and(|threshold| level >= threshold) {
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:<7}] {scope:<8} {msg}",
            level.as_str()
        );
    }
}

/// Operational detail: config loaded, policy chosen by the user.
pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Something the user likely wants to know, like a directory created, a default applied.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warning, scope, msg);
}

/// A failure that was swallowed to keep the caller running.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
