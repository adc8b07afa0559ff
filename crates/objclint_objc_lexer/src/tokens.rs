use std::ops::Index;

use objclint_text_size::Ranged;

use crate::{Lexer, LexicalError, Token, TokenKind};

/// The complete token sequence of one source file, with navigation helpers.
///
/// Tokens are addressed by their index in the sequence.
#[derive(Debug, Clone)]
pub struct Tokens<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
}

impl<'src> Tokens<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Lexer::new(source).collect(),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token<'src>> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    /// Literals and comments the lexer had to recover from.
    pub fn errors(&self) -> impl Iterator<Item = LexicalError> + '_ {
        self.tokens.iter().filter_map(|token| {
            token.error().map(|kind| LexicalError {
                kind,
                range: token.range(),
            })
        })
    }

    /// The first non-trivia token after `index`.
    pub fn next_significant(&self, index: usize) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| !self.tokens[i].is_trivia())
    }

    /// The last non-trivia token before `index`.
    pub fn prev_significant(&self, index: usize) -> Option<usize> {
        (0..index).rev().find(|&i| !self.tokens[i].is_trivia())
    }

    /// The tokens strictly between `start` and `end`.
    pub fn between(&self, start: usize, end: usize) -> &[Token<'src>] {
        if start + 1 >= end {
            return &[];
        }
        &self.tokens[start + 1..end.min(self.tokens.len())]
    }

    /// Whether a line break separates `start` and `end`.
    pub fn has_line_break_between(&self, start: usize, end: usize) -> bool {
        self.between(start, end)
            .iter()
            .any(Token::contains_line_break)
    }

    /// Whether the tokens strictly between `start` and `end` are all
    /// whitespace (no comments, no line breaks).
    pub fn only_whitespace_between(&self, start: usize, end: usize) -> bool {
        self.between(start, end).iter().all(Token::is_whitespace)
    }

    /// The index of the first token on the line containing `index`.
    pub fn line_start(&self, index: usize) -> usize {
        (0..index)
            .rev()
            .find(|&i| self.tokens[i].contains_line_break())
            .map_or(0, |i| i + 1)
    }

    /// Whether `index` is the first non-trivia token on its line.
    pub fn is_first_on_line(&self, index: usize) -> bool {
        (0..index)
            .rev()
            .map(|i| &self.tokens[i])
            .take_while(|token| !token.contains_line_break())
            .all(|token| token.kind() == TokenKind::Whitespace || token.is_comment())
    }

    /// The leading whitespace of the line containing `index`.
    pub fn line_indent(&self, index: usize) -> &'src str {
        let start = self.line_start(index);
        match self.tokens.get(start) {
            Some(token) if token.is_whitespace() => token.text(),
            _ => "",
        }
    }
}

impl<'src> Index<usize> for Tokens<'src> {
    type Output = Token<'src>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a, 'src> IntoIterator for &'a Tokens<'src> {
    type Item = &'a Token<'src>;
    type IntoIter = std::slice::Iter<'a, Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
