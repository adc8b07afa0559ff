use objclint_objc_lexer::{TokenKind, Tokens};

use crate::DelimiterTable;
use crate::recognizer::unit_range;
use crate::unit::{ParenGroup, PropertyDeclaration};

/// Recognize `@property (attributes) Type name;` at `keyword`.
pub(crate) fn recognize(
    tokens: &Tokens,
    delimiters: &DelimiterTable,
    keyword: usize,
) -> PropertyDeclaration {
    let mut cursor = tokens.next_significant(keyword);
    let mut attributes = None;
    let mut last = Some(keyword);

    if let Some(open) = cursor
        && tokens[open].is_punct("(")
    {
        let close = delimiters.partner(open);
        attributes = Some(ParenGroup { open, close });
        last = close;
        cursor = close.and_then(|close| tokens.next_significant(close));
    }

    let type_start = cursor;
    let mut name = None;
    let mut semicolon = None;

    while let Some(index) = cursor {
        let token = &tokens[index];
        if token.is_punct(";") {
            semicolon = Some(index);
            last = Some(index);
            break;
        }
        if token.kind() == TokenKind::AtKeyword {
            break;
        }

        let followed_by_paren = tokens
            .next_significant(index)
            .is_some_and(|next| tokens[next].is_punct("("));
        if token.kind() == TokenKind::Identifier
            && !followed_by_paren
            && (name.is_none() || !is_macro_like(token.text()))
        {
            name = Some(index);
        }

        let skip_to = if delimiters.is_matched_opener(index) {
            delimiters.partner(index).unwrap_or(index)
        } else {
            index
        };
        last = Some(skip_to);
        cursor = tokens.next_significant(skip_to);
    }

    if semicolon.is_none() && cursor.is_none() {
        last = None;
    }

    PropertyDeclaration {
        range: unit_range(tokens, keyword, last),
        keyword,
        attributes,
        type_start,
        name,
        semicolon,
    }
}

/// `NS_AVAILABLE`, `API_UNAVAILABLE` and similar annotations.
fn is_macro_like(text: &str) -> bool {
    text.len() > 1
        && text
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
