use memchr::memmem;
use objclint_source_file::OneIndexed;
use objclint_text_size::{TextRange, TextSize};

use crate::token::{LexicalErrorKind, Token, TokenKind};

/// A lazy, restartable token stream over source text.
///
/// Cloning a lexer snapshots its position, so a caller can look ahead on a
/// clone and keep the original untouched.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    line: OneIndexed,
    /// Zero-based character column of `offset`.
    column: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: OneIndexed::MIN,
            column: 0,
        }
    }

    /// Byte offset of the next token.
    pub fn offset(&self) -> TextSize {
        TextSize::try_from(self.offset).unwrap_or(TextSize::new(u32::MAX))
    }

    fn advance_position(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    chars.next_if_eq(&'\n');
                    self.line = self.line.saturating_add(1);
                    self.column = 0;
                }
                '\n' => {
                    self.line = self.line.saturating_add(1);
                    self.column = 0;
                }
                _ => self.column += 1,
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.source.get(self.offset..).filter(|rest| !rest.is_empty())?;
        let (kind, len, error) = scan(rest);
        let text = &rest[..len];

        let start = self.offset();
        let token = Token {
            kind,
            text,
            range: TextRange::at(start, TextSize::of(text)),
            line: self.line,
            column: OneIndexed::from_zero_indexed(self.column),
            error,
        };

        self.offset += len;
        self.advance_position(text);
        Some(token)
    }
}

/// Scans one token at the start of `rest`, which must not be empty.
fn scan(rest: &str) -> (TokenKind, usize, Option<LexicalErrorKind>) {
    let bytes = rest.as_bytes();
    let second = bytes.get(1).copied();

    match bytes[0] {
        b'\n' => (TokenKind::Newline, 1, None),
        b'\r' if second == Some(b'\n') => (TokenKind::Newline, 2, None),
        b'\r' => (TokenKind::Newline, 1, None),
        b' ' | b'\t' | 0x0b | 0x0c => {
            let len = bytes
                .iter()
                .take_while(|&&b| matches!(b, b' ' | b'\t' | 0x0b | 0x0c))
                .count();
            (TokenKind::Whitespace, len, None)
        }
        b'/' if second == Some(b'/') => {
            let len = memchr::memchr2(b'\n', b'\r', bytes).unwrap_or(bytes.len());
            (TokenKind::Comment, len, None)
        }
        b'/' if second == Some(b'*') => match memmem::find(&bytes[2..], b"*/") {
            Some(end) => (TokenKind::Comment, end + 4, None),
            None => (
                TokenKind::Comment,
                bytes.len(),
                Some(LexicalErrorKind::UnterminatedComment),
            ),
        },
        b'"' => {
            let (len, error) = quoted(bytes, 0, b'"', LexicalErrorKind::UnterminatedString);
            (TokenKind::StringLiteral, len, error)
        }
        b'\'' => {
            let (len, error) = quoted(bytes, 0, b'\'', LexicalErrorKind::UnterminatedChar);
            (TokenKind::CharLiteral, len, error)
        }
        b'@' => match second {
            Some(b'"') => {
                let (len, error) = quoted(bytes, 1, b'"', LexicalErrorKind::UnterminatedString);
                (TokenKind::StringLiteral, len, error)
            }
            Some(b'[' | b'{' | b'(') => (TokenKind::Punctuation, 2, None),
            Some(b) if is_identifier_start(b) => {
                (TokenKind::AtKeyword, 1 + identifier_len(&bytes[1..]), None)
            }
            _ => (TokenKind::Punctuation, 1, None),
        },
        b'#' => match second {
            Some(b) if is_identifier_start(b) => {
                (TokenKind::Directive, 1 + identifier_len(&bytes[1..]), None)
            }
            _ => (TokenKind::Punctuation, 1, None),
        },
        b if is_identifier_start(b) => (TokenKind::Identifier, identifier_len(bytes), None),
        b if b.is_ascii_digit() => (TokenKind::NumericLiteral, number_len(bytes), None),
        b'.' if second.is_some_and(|b| b.is_ascii_digit()) => {
            (TokenKind::NumericLiteral, number_len(bytes), None)
        }
        _ => {
            let len = rest.chars().next().map_or(1, char::len_utf8);
            (TokenKind::Punctuation, len, None)
        }
    }
}

/// Scans a quoted literal whose opening quote is at `open`. An unterminated
/// literal runs to the end of the input.
fn quoted(
    bytes: &[u8],
    open: usize,
    quote: u8,
    unterminated: LexicalErrorKind,
) -> (usize, Option<LexicalErrorKind>) {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return (i + 1, None),
            _ => i += 1,
        }
    }
    (bytes.len(), Some(unterminated))
}

fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn identifier_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
        .count()
}

fn number_len(bytes: &[u8]) -> usize {
    let hex = bytes.len() > 1 && bytes[0] == b'0' && matches!(bytes[1], b'x' | b'X');
    let mut i = 1;
    while i < bytes.len() {
        let b = bytes[i];
        let exponent_sign = matches!(b, b'+' | b'-')
            && (matches!(bytes[i - 1], b'p' | b'P')
                || (!hex && matches!(bytes[i - 1], b'e' | b'E')));
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || exponent_sign {
            i += 1;
        } else {
            break;
        }
    }
    i
}
