//! Shared helpers for rules that inspect the trivia between two tokens.

use objclint_diagnostics::{Edit, Fix};
use objclint_objc_lexer::Token;
use objclint_text_size::{Ranged, TextRange};

use crate::CheckContext;

/// What separates two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    /// The tokens touch.
    Empty,
    /// Exactly one ASCII space.
    SingleSpace,
    /// Spaces or tabs other than a single space, on one line.
    Whitespace,
    /// At least one line break, no comments.
    LineBreak,
    /// A comment sits in between.
    Comment,
}

impl Gap {
    /// Whether the gap holds only spaces, tabs and line breaks.
    pub const fn is_plain(self) -> bool {
        !matches!(self, Gap::Comment)
    }
}

/// Classify the trivia strictly between tokens `before` and `after`.
pub fn classify_gap(ctx: &CheckContext, before: usize, after: usize) -> Gap {
    let between = ctx.tokens().between(before, after);
    if between.is_empty() {
        Gap::Empty
    } else if between.iter().any(Token::is_comment) {
        Gap::Comment
    } else if between.iter().any(Token::contains_line_break) {
        Gap::LineBreak
    } else if between.len() == 1 && between[0].text() == " " {
        Gap::SingleSpace
    } else {
        Gap::Whitespace
    }
}

/// A safe fix replacing the trivia between two tokens with `content`.
pub fn replace_gap(ctx: &CheckContext, before: usize, after: usize, content: &str) -> Fix {
    let range = ctx.gap(before, after);
    if range.is_empty() {
        Fix::safe_edit(Edit::insertion(content.to_string(), range.start()))
    } else {
        Fix::safe_edit(Edit::range_replacement(content.to_string(), range))
    }
}

/// A safe fix deleting the trivia between two tokens.
pub fn delete_gap(ctx: &CheckContext, before: usize, after: usize) -> Fix {
    Fix::safe_edit(Edit::range_deletion(ctx.gap(before, after)))
}

/// A safe fix that re-indents the line of token `index` to `column` spaces.
/// `None` when anything other than whitespace precedes the token.
pub fn reindent(ctx: &CheckContext, index: usize, column: usize) -> Option<Fix> {
    let tokens = ctx.tokens();
    let line_start = tokens.line_start(index);
    let starts_line = line_start == 0 || tokens[line_start - 1].is_newline();
    if !starts_line
        || !tokens.as_slice()[line_start..index]
            .iter()
            .all(Token::is_whitespace)
    {
        return None;
    }
    let range = TextRange::new(ctx.line_start_offset(index), ctx.token(index).start());
    let indent = " ".repeat(column);
    Some(if range.is_empty() {
        Fix::safe_edit(Edit::insertion(indent, range.start()))
    } else {
        Fix::safe_edit(Edit::range_replacement(indent, range))
    })
}

/// A line break in the file's line ending followed by `column` spaces.
pub fn newline_indent(ctx: &CheckContext, column: usize) -> String {
    format!("{}{}", ctx.line_ending(), " ".repeat(column))
}
