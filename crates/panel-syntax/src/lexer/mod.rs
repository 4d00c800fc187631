//! Tokens of a marker body.
//!
//! The body is everything after the comment lead, starting at `widget:`.
//! Token ranges are byte offsets into that body.

mod tokens;

pub use tokens::TokenKind;

use logos::{Logos, SpannedIter};
use text_size::{TextRange, TextSize};

/// One token and the part of the body it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// Byte range in the body.
    pub range: TextRange,
}

impl Token {
    /// Slice of `body` covered by this token.
    #[must_use]
    pub fn text<'b>(&self, body: &'b str) -> &'b str {
        &body[self.range]
    }
}

/// Streaming tokenizer. Input no rule matches comes out as
/// `TokenKind::Error`, so the whole body is always covered.
pub struct Lexer<'b> {
    spans: SpannedIter<'b, TokenKind>,
}

impl<'b> Lexer<'b> {
    /// Starts lexing `body`.
    #[must_use]
    pub fn new(body: &'b str) -> Self {
        Self {
            spans: TokenKind::lexer(body).spanned(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (kind, span) = self.spans.next()?;
        Some(Token {
            kind: kind.unwrap_or(TokenKind::Error),
            range: TextRange::new(offset(span.start), offset(span.end)),
        })
    }
}

fn offset(at: usize) -> TextSize {
    u32::try_from(at).map_or(TextSize::from(u32::MAX), TextSize::from)
}

/// All tokens of `body`.
#[must_use]
pub fn lex(body: &str) -> Vec<Token> {
    Lexer::new(body).collect()
}

/// Tokens of `body` next to their text.
#[must_use]
pub fn lex_with_text(body: &str) -> Vec<(Token, &str)> {
    Lexer::new(body).map(|token| (token, token.text(body))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_byte_offsets() {
        let ranges: Vec<(u32, u32)> = lex("id:w1 x:10")
            .iter()
            .map(|token| (token.range.start().into(), token.range.end().into()))
            .collect();
        assert_eq!(ranges, vec![(0, 3), (3, 5), (5, 6), (6, 8), (8, 10)]);
    }

    #[test]
    fn quoted_text_is_one_token() {
        let texts: Vec<&str> = lex_with_text(r#"title:"A B""#)
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        assert_eq!(texts, vec!["title:", "\"A B\""]);
    }
}
