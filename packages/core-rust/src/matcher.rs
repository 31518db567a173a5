//! Name matchers used by routes and interceptors.
//!
//! A matcher is a pure function from an operation name to `Some(name)` (the
//! name handed to the executor, possibly transformed) or `None`. An empty
//! `Some(String::new())` is a match, e.g. an alias that consumes the whole name.

use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex};

/// Caller-supplied matching function for [`Matcher::Predicate`].
pub type Predicate = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// How a route or interceptor decides whether it handles a name.
#[derive(Clone)]
pub enum Matcher {
    /// Arbitrary caller predicate.
    Predicate(Predicate),
    /// Regex match; the template is expanded with the captured groups.
    Rewrite { pattern: Regex, template: String },
    /// Regex found anywhere in the name; the name passes through unchanged.
    Contains(Regex),
    /// Literal prefix; the prefix is stripped.
    Prefix(String),
}

impl Matcher {
    /// Applies the matcher to `name`.
    #[must_use]
    pub fn apply(&self, name: &str) -> Option<String> {
        match self {
            Self::Predicate(f) => f(name),
            Self::Rewrite { pattern, template } => pattern
                .captures(name)
                .map(|caps| expand_template(template, &caps)),
            Self::Contains(pattern) => pattern.is_match(name).then(|| name.to_string()),
            Self::Prefix(prefix) => name.strip_prefix(prefix.as_str()).map(str::to_string),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Rewrite { pattern, template } => f
                .debug_struct("Rewrite")
                .field("pattern", &pattern.as_str())
                .field("template", template)
                .finish(),
            Self::Contains(pattern) => f.debug_tuple("Contains").field(&pattern.as_str()).finish(),
            Self::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
        }
    }
}

/// Expands `{i}` placeholders in `template` with capture group `i`.
///
/// Group 0 is the whole match. A group that exists in the pattern but did
/// not participate in the match expands to the empty string. A key that is
/// not an integer, or is out of range, is emitted as the bare key. An
/// unterminated `{` is copied through as-is.
#[must_use]
pub fn expand_template(template: &str, caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after[..close];
        match key.parse::<usize>() {
            Ok(i) if i < caps.len() => {
                out.push_str(caps.get(i).map_or("", |m| m.as_str()));
            }
            _ => out.push_str(key),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
