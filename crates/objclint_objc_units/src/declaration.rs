use objclint_objc_lexer::{TokenKind, Tokens};
use objclint_text_size::{Ranged, TextRange};

use crate::DelimiterTable;
use crate::unit::{TokenSpan, VariableDeclaration};

/// Type qualifiers that may appear between `*` and the declared name.
pub const POINTER_QUALIFIERS: &[&str] = &[
    "const",
    "volatile",
    "restrict",
    "__restrict",
    "_Nonnull",
    "_Nullable",
    "_Null_unspecified",
    "__nonnull",
    "__nullable",
    "nonnull",
    "nullable",
    "null_unspecified",
    "__strong",
    "__weak",
    "__autoreleasing",
    "__unsafe_unretained",
    "__kindof",
];

/// Identifiers that start a statement which is never a declaration.
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "if", "else", "while", "for", "do", "switch", "case", "default", "goto", "break",
    "continue", "sizeof", "throw", "delete", "new",
];

/// Recognize a pointer variable declaration starting at `first`, such as
/// `static NSString *const kKey = @"k";` or `NSError *a, *b;`.
///
/// Only declarations with at least one pointer declarator are returned.
pub(crate) fn recognize(
    tokens: &Tokens,
    delimiters: &DelimiterTable,
    first: usize,
) -> Option<VariableDeclaration> {
    if STATEMENT_KEYWORDS.contains(&tokens[first].text()) {
        return None;
    }

    // Type specifier: words and generic argument lists up to the first `*`.
    let mut type_end = first;
    loop {
        let next = tokens.next_significant(type_end)?;
        let token = &tokens[next];
        if token.kind() == TokenKind::Identifier {
            type_end = next;
        } else if token.is_punct("<") {
            type_end = closing_angle(tokens, next)?;
        } else if token.is_punct("*") {
            break;
        } else {
            return None;
        }
    }

    let name = pointer_declarator(tokens, type_end)?;
    let mut declarators = vec![TokenSpan { first, last: name }];

    // Later declarators; initializers are skipped.
    let mut cursor = tokens.next_significant(name);
    while let Some(index) = cursor {
        let token = &tokens[index];
        if token.is_punct(";") || token.is_punct("{") || token.is_punct("}") {
            break;
        }
        if token.is_punct(",")
            && let Some(name) = pointer_declarator(tokens, index)
        {
            declarators.push(TokenSpan {
                first: index + 1,
                last: name,
            });
            cursor = tokens.next_significant(name);
            continue;
        }
        let skip_to = if delimiters.is_matched_opener(index) {
            delimiters.partner(index).unwrap_or(index)
        } else {
            index
        };
        cursor = tokens.next_significant(skip_to);
    }

    let last = declarators.last().map_or(name, |declarator| declarator.last);
    Some(VariableDeclaration {
        range: TextRange::new(tokens[first].start(), tokens[last].end()),
        declarators,
    })
}

/// After `from`, a run of `*` mixed with qualifiers and then a name that is
/// followed by `=`, `;` or `,`. Returns the name.
fn pointer_declarator(tokens: &Tokens, from: usize) -> Option<usize> {
    let mut stars = 0usize;
    let mut index = from;
    loop {
        index = tokens.next_significant(index)?;
        let token = &tokens[index];
        if token.is_punct("*") {
            stars += 1;
        } else if token.kind() == TokenKind::Identifier {
            if stars > 0 && POINTER_QUALIFIERS.contains(&token.text()) {
                continue;
            }
            break;
        } else {
            return None;
        }
    }
    if stars == 0 {
        return None;
    }
    let after = tokens.next_significant(index)?;
    let after = &tokens[after];
    (after.is_punct("=") || after.is_punct(";") || after.is_punct(",")).then_some(index)
}

/// The `>` closing the generic argument list opened at `open`.
fn closing_angle(tokens: &Tokens, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut index = open;
    loop {
        let token = &tokens[index];
        if token.is_punct("<") {
            depth += 1;
        } else if token.is_punct(">") {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        } else if !(token.kind() == TokenKind::Identifier
            || token.is_punct("*")
            || token.is_punct(","))
        {
            return None;
        }
        index = tokens.next_significant(index)?;
    }
}
