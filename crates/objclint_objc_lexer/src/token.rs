use std::fmt;

use objclint_source_file::OneIndexed;
use objclint_text_size::{Ranged, TextRange};

/// The lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `foo`, `if`, `NSString`
    Identifier,
    /// `@interface`, `@property`, `@end`
    AtKeyword,
    /// `#import`, `#include`, `#pragma`
    Directive,
    /// A single punctuation character, or one of the literal openers `@[`, `@{`, `@(`.
    Punctuation,
    /// `"..."` or `@"..."`
    StringLiteral,
    /// `'a'`
    CharLiteral,
    NumericLiteral,
    /// `// ...` (without the line terminator) or `/* ... */`
    Comment,
    /// A run of spaces, tabs, vertical tabs or form feeds.
    Whitespace,
    /// `\n`, `\r\n` or `\r`
    Newline,
}

impl TokenKind {
    /// Whitespace, line breaks and comments.
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::StringLiteral | Self::CharLiteral | Self::NumericLiteral
        )
    }
}

/// Malformations the lexer recovers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexicalErrorKind {
    UnterminatedString,
    UnterminatedChar,
    UnterminatedComment,
}

impl fmt::Display for LexicalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => f.write_str("unterminated string literal"),
            Self::UnterminatedChar => f.write_str("unterminated character literal"),
            Self::UnterminatedComment => f.write_str("unterminated block comment"),
        }
    }
}

/// A malformed literal or comment, located by the range of its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub kind: LexicalErrorKind,
    pub range: TextRange,
}

impl Ranged for LexicalError {
    fn range(&self) -> TextRange {
        self.range
    }
}

/// A token borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub(crate) kind: TokenKind,
    pub(crate) text: &'src str,
    pub(crate) range: TextRange,
    pub(crate) line: OneIndexed,
    pub(crate) column: OneIndexed,
    pub(crate) error: Option<LexicalErrorKind>,
}

impl<'src> Token<'src> {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &'src str {
        self.text
    }

    /// The line the token starts on.
    pub fn line(&self) -> OneIndexed {
        self.line
    }

    /// The character column the token starts at.
    pub fn column(&self) -> OneIndexed {
        self.column
    }

    /// The line the token ends on; differs from [`Token::line`] for line
    /// breaks, block comments and unterminated literals.
    pub fn end_line(&self) -> OneIndexed {
        if self.kind == TokenKind::Newline {
            return self.line;
        }
        self.line.saturating_add(count_line_breaks(self.text))
    }

    /// The error recovered from while lexing this token.
    pub fn error(&self) -> Option<LexicalErrorKind> {
        self.error
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    pub fn is_newline(&self) -> bool {
        self.kind == TokenKind::Newline
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    /// Whether this is the punctuation `punct`.
    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == punct
    }

    /// Whether this is the identifier or keyword `name`.
    pub fn is_identifier(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == name
    }

    pub fn is_at_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::AtKeyword && self.text == keyword
    }

    /// Whether the token text spans a line break.
    pub fn contains_line_break(&self) -> bool {
        self.kind == TokenKind::Newline || self.text.contains(['\n', '\r'])
    }
}

impl Ranged for Token<'_> {
    fn range(&self) -> TextRange {
        self.range
    }
}

fn count_line_breaks(text: &str) -> usize {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count()
}
