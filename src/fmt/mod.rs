//! Line rendering: the template engine and the timestamp formatter it draws on.

mod format;
mod time;

pub use format::{
    FormatSegment, FormatTemplate, FormatValues, Placeholder, TemplateError, render_line,
};
pub use time::{Clock, FixedClock, SystemClock, format_timestamp};
