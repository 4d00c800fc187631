//! Widget marker records.
//!
//! A marker is the single-line `widget:<type> key:value ...` record written at
//! the top of every generated widget block. Rendering and parsing live side by
//! side so the two directions share one value encoding.

use std::borrow::Cow;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::lexer::{lex, TokenKind};

/// Key that opens every marker body.
pub const MARKER_KEY: &str = "widget";

/// A parsed or to-be-rendered widget marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRecord {
    widget_type: SmolStr,
    fields: IndexMap<SmolStr, String>,
}

impl MarkerRecord {
    /// Creates an empty marker for the given widget type.
    #[must_use]
    pub fn new(widget_type: impl Into<SmolStr>) -> Self {
        Self {
            widget_type: widget_type.into(),
            fields: IndexMap::new(),
        }
    }

    /// The widget type tag after `widget:`.
    #[must_use]
    pub fn widget_type(&self) -> &str {
        &self.widget_type
    }

    /// Appends a field. A repeated key replaces the earlier value in place.
    pub fn push(&mut self, key: impl Into<SmolStr>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder form of [`MarkerRecord::push`].
    #[must_use]
    pub fn with(mut self, key: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Looks up a field value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns `true` if the field is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields, not counting the `widget:` lead.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the marker carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders the marker body (without the comment lead).
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("{MARKER_KEY}:{}", self.widget_type);
        for (key, value) in &self.fields {
            out.push(' ');
            out.push_str(key);
            out.push(':');
            out.push_str(&encode_value(value));
        }
        out
    }

    /// Parses a marker body. Returns `None` when the body does not start
    /// with a `widget:<type>` pair.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let mut pairs = parse_pairs(body).into_iter();
        let (lead, widget_type) = pairs.next()?;
        if lead != MARKER_KEY || !is_word(&widget_type) {
            return None;
        }
        let mut record = Self::new(widget_type);
        for (key, value) in pairs {
            record.fields.entry(key).or_insert(value);
        }
        Some(record)
    }
}

/// Encodes a value for a marker or page comment.
///
/// Simple values stay bare; anything with whitespace, quotes, colons or
/// backslashes (and the empty string) is quoted and escaped. Line breaks
/// are escaped so a marker always stays on one line.
#[must_use]
pub fn encode_value(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|ch| ch.is_whitespace() || matches!(ch, '"' | ':' | '\\'));
    if !needs_quotes {
        return Cow::Borrowed(value);
    }
    Cow::Owned(quote(value))
}

/// Quotes a value unconditionally.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Removes the surrounding quotes of a quoted token and resolves escapes.
#[must_use]
pub fn unquote(token: &str) -> String {
    let inner = token
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(token);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn is_word(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Splits a body into `(key, value)` pairs.
///
/// Text before the first key is ignored. A quoted value directly after its key
/// is taken verbatim; otherwise the value runs up to the next key and is
/// trimmed.
fn parse_pairs(body: &str) -> Vec<(SmolStr, String)> {
    let tokens = lex(body);
    let mut pairs = Vec::new();
    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx];
        if token.kind != TokenKind::Key {
            idx += 1;
            continue;
        }
        let key_text = token.text(body);
        let key = SmolStr::new(&key_text[..key_text.len() - 1]);
        idx += 1;

        if let Some(next) = tokens.get(idx) {
            let followed_by_boundary = tokens
                .get(idx + 1)
                .is_none_or(|after| after.kind.is_trivia());
            if next.kind == TokenKind::Quoted && followed_by_boundary {
                pairs.push((key, unquote(next.text(body))));
                idx += 1;
                continue;
            }
        }

        let start = idx;
        while idx < tokens.len() && tokens[idx].kind.is_bare_part() {
            idx += 1;
        }
        let value = match (tokens.get(start), idx.checked_sub(1).and_then(|i| tokens.get(i))) {
            (Some(first), Some(last)) if idx > start => {
                let from = usize::from(first.range.start());
                let to = usize::from(last.range.end());
                body[from..to].trim().to_string()
            }
            _ => String::new(),
        };
        pairs.push((key, value));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_values_stay_unquoted() {
        assert_eq!(encode_value("F0081"), "F0081");
        assert_eq!(encode_value("#ff0000"), "#ff0000");
        assert_eq!(encode_value("-12.5"), "-12.5");
    }

    #[test]
    fn awkward_values_are_quoted() {
        assert_eq!(encode_value(""), "\"\"");
        assert_eq!(encode_value("a b"), "\"a b\"");
        assert_eq!(encode_value("12:30"), "\"12:30\"");
        assert_eq!(encode_value("C:\\x"), "\"C:\\\\x\"");
    }

    #[test]
    fn unquote_keeps_unknown_escapes() {
        assert_eq!(unquote(r#""a\tb""#), "a\\tb");
        assert_eq!(unquote(r#""line\nnext""#), "line\nnext");
    }

    #[test]
    fn bare_value_runs_to_next_key() {
        let pairs = parse_pairs("title:Living room id:w1");
        assert_eq!(pairs[0], (SmolStr::new("title"), "Living room".to_string()));
        assert_eq!(pairs[1], (SmolStr::new("id"), "w1".to_string()));
    }

    #[test]
    fn empty_bare_value() {
        let pairs = parse_pairs("unit: id:w1");
        assert_eq!(pairs[0].1, "");
        assert_eq!(pairs[1].1, "w1");
    }
}
