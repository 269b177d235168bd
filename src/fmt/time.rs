//! Timestamp rendering for the `{timestamp}` placeholder.
//!
//! Patterns are strftime-style. `%f` means *microseconds* here (six digits), which is
//! what people writing `%H:%M:%S.%f` expect; chrono would otherwise print nanoseconds.
//! A token chrono does not understand is copied into the output verbatim rather than
//! failing the log call.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Source of "now". Swapped for [`FixedClock`] in tests so rendered lines are predictable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Renders `instant` with `pattern`.
#[must_use]
pub fn format_timestamp(pattern: &str, instant: &DateTime<Local>) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut rest = pattern;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let token_len = token_len(&rest[pos..]);
        let token = &rest[pos..pos + token_len];
        push_token(&mut out, token, instant);
        rest = &rest[pos + token_len..];
    }
    out.push_str(rest);

    out
}

/// Length in bytes of the `%...` token at the start of `s`: the percent sign, any
/// padding/width/precision modifiers, and the specifier character.
fn token_len(s: &str) -> usize {
    let mut len = 1;
    for c in s[1..].chars() {
        len += c.len_utf8();
        if !matches!(c, '-' | '_' | '0'..='9' | '.' | ':' | '#') {
            break;
        }
    }
    len
}

fn push_token(out: &mut String, token: &str, instant: &DateTime<Local>) {
    let token = if token == "%f" { "%6f" } else { token };

    let items: Vec<Item<'_>> = StrftimeItems::new(token).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        out.push_str(token);
        return;
    }

    let mark = out.len();
    if write!(out, "{}", instant.format_with_items(items.into_iter())).is_err() {
        // The instant cannot supply this field (e.g. an unsupported timezone token).
        out.truncate(mark);
        out.push_str(token);
    }
}
