//! Line templates such as `"[{timestamp}] {logtype}: {message}"`.
//!
//! A template is parsed once when it is configured, so a typo in a placeholder name is
//! reported to whoever set the template instead of corrupting every line written later.

use std::fmt;

/// The five fields every rendered line can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Timestamp,
    Logtype,
    Message,
    Prefix,
    Postfix,
}

impl Placeholder {
    /// Name as written between braces in a template.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Logtype => "logtype",
            Self::Message => "message",
            Self::Prefix => "prefix",
            Self::Postfix => "postfix",
        }
    }

    pub const ALL: &'static [Self] = &[
        Self::Timestamp,
        Self::Logtype,
        Self::Message,
        Self::Prefix,
        Self::Postfix,
    ];

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ph| ph.as_str() == name)
    }
}

/// Why a template string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `{name}` where `name` is not one of the known placeholders.
    UnknownPlaceholder(String),
    /// A `{` with no matching `}` (the byte offset of the brace).
    Unclosed(usize),
    /// A lone `}` that is not part of a `}}` escape.
    StrayBrace(usize),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlaceholder(name) => {
                write!(f, "unknown placeholder '{{{name}}}' (expected one of ")?;
                for (i, ph) in Placeholder::ALL.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{{{}}}", ph.as_str())?;
                }
                f.write_str(")")
            }
            Self::Unclosed(at) => write!(f, "unclosed '{{' at offset {at}"),
            Self::StrayBrace(at) => write!(f, "unmatched '}}' at offset {at}"),
        }
    }
}

impl std::error::Error for TemplateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment {
    /// Text copied into the line as-is, with `{{`/`}}` escapes already collapsed.
    Literal(String),
    Placeholder(Placeholder),
}

/// Pre-parsed line template: parse once, render many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    source: String,
    segments: Vec<FormatSegment>,
}

impl FormatTemplate {
    /// Splits a template into literal text and placeholders.
    ///
    /// # Errors
    /// Returns [`TemplateError`] for unknown placeholder names and unbalanced braces.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                    chars.next();
                    current.push('{');
                }
                '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                    chars.next();
                    current.push('}');
                }
                '{' => {
                    let rest = &template[i + 1..];
                    let end = rest.find('}').ok_or(TemplateError::Unclosed(i))?;
                    let name = &rest[..end];
                    if name.contains('{') {
                        return Err(TemplateError::Unclosed(i));
                    }
                    let ph = Placeholder::from_name(name.trim())
                        .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;

                    if !current.is_empty() {
                        segments.push(FormatSegment::Literal(std::mem::take(&mut current)));
                    }
                    segments.push(FormatSegment::Placeholder(ph));

                    // Skip the name and the closing brace.
                    for _ in 0..=name.chars().count() {
                        chars.next();
                    }
                }
                '}' => return Err(TemplateError::StrayBrace(i)),
                _ => current.push(c),
            }
        }

        if !current.is_empty() {
            segments.push(FormatSegment::Literal(current));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    /// The template text this was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[FormatSegment] {
        &self.segments
    }

    /// Whether the template uses a given placeholder at all.
    #[must_use]
    pub fn uses(&self, placeholder: Placeholder) -> bool {
        self.segments
            .iter()
            .any(|seg| *seg == FormatSegment::Placeholder(placeholder))
    }

    /// Substitutes values into the pre-parsed segments. Cannot fail once parsed.
    #[must_use]
    pub fn render(&self, values: &FormatValues) -> String {
        let mut result = String::with_capacity(self.source.len() + values.message.len());

        for segment in &self.segments {
            match segment {
                FormatSegment::Literal(s) => result.push_str(s),
                FormatSegment::Placeholder(ph) => result.push_str(match ph {
                    Placeholder::Timestamp => &values.timestamp,
                    Placeholder::Logtype => &values.logtype,
                    Placeholder::Message => &values.message,
                    Placeholder::Prefix => &values.prefix,
                    Placeholder::Postfix => &values.postfix,
                }),
            }
        }

        result
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self {
            source: crate::config::DEFAULT_LINE_TEMPLATE.to_string(),
            segments: vec![
                FormatSegment::Literal("[".to_string()),
                FormatSegment::Placeholder(Placeholder::Timestamp),
                FormatSegment::Literal("] ".to_string()),
                FormatSegment::Placeholder(Placeholder::Logtype),
                FormatSegment::Literal(": ".to_string()),
                FormatSegment::Placeholder(Placeholder::Message),
            ],
        }
    }
}

impl fmt::Display for FormatTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for FormatTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Typed value bag with one field per [`Placeholder`], so a key typo cannot slip through.
#[derive(Debug, Clone, Default)]
pub struct FormatValues {
    pub timestamp: String,
    pub logtype: String,
    pub message: String,
    pub prefix: String,
    pub postfix: String,
}

impl FormatValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Canonical lowercase level name.
    #[must_use]
    pub fn logtype(mut self, logtype: impl Into<String>) -> Self {
        self.logtype = logtype.into();
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }
}

/// One-shot parse and render, for callers that do not keep the template around.
///
/// # Errors
/// Returns [`TemplateError`] if `template` does not parse.
pub fn render_line(template: &str, values: &FormatValues) -> Result<String, TemplateError> {
    FormatTemplate::parse(template).map(|t| t.render(values))
}
