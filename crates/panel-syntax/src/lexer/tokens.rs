//! Token definitions for marker comment bodies.
//!
//! A marker body is a flat run of `key:value` pairs. Values are either a
//! double-quoted string or a bare run of words that ends at the next key.

use logos::Logos;

/// All token kinds that can appear in a marker body.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    /// Spaces and tabs between pairs or inside bare values.
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Field key including its trailing colon: `font_size:`
    #[regex(r"[A-Za-z0-9_]+:")]
    Key,

    /// Double-quoted value with backslash escapes: `"Living room"`
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    Quoted,

    /// A run of characters that is neither whitespace, quote nor colon.
    #[regex(r#"[^ \t\r\n":]+"#)]
    Word,

    /// A colon that does not terminate a key.
    #[token(":")]
    Colon,

    /// Anything else, including an unterminated quote.
    #[default]
    Error,
}

impl TokenKind {
    /// Returns `true` for whitespace.
    #[inline]
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Returns `true` if the token can be part of a bare value.
    #[inline]
    #[must_use]
    pub fn is_bare_part(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::Word | Self::Colon | Self::Quoted | Self::Error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        TokenKind::lexer(source)
            .map(|kind| kind.unwrap_or(TokenKind::Error))
            .collect()
    }

    #[test]
    fn key_wins_over_word() {
        assert_eq!(
            kinds("id:w1"),
            vec![TokenKind::Key, TokenKind::Word]
        );
    }

    #[test]
    fn quoted_value_keeps_spaces() {
        assert_eq!(
            kinds(r#"text:"Hello world""#),
            vec![TokenKind::Key, TokenKind::Quoted]
        );
    }

    #[test]
    fn escaped_quote_stays_inside_string() {
        assert_eq!(
            kinds(r#"text:"say \"hi\"" id:a"#),
            vec![
                TokenKind::Key,
                TokenKind::Quoted,
                TokenKind::Whitespace,
                TokenKind::Key,
                TokenKind::Word
            ]
        );
    }

    #[test]
    fn unterminated_quote_is_error() {
        let tokens = kinds(r#"t:"open"#);
        assert_eq!(tokens[0], TokenKind::Key);
        assert_eq!(tokens[1], TokenKind::Error);
    }
}
