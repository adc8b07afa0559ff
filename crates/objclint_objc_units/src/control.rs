use objclint_objc_lexer::{Token, Tokens};

use crate::DelimiterTable;
use crate::recognizer::unit_range;
use crate::unit::{ControlHeader, ParenGroup};

/// Recognize `keyword (condition) {` at `keyword`. Returns `None` when the
/// keyword isn't followed by a condition.
pub(crate) fn recognize(
    tokens: &Tokens,
    delimiters: &DelimiterTable,
    keyword: usize,
) -> Option<ControlHeader> {
    let open = tokens
        .next_significant(keyword)
        .filter(|&next| tokens[next].is_punct("("))?;
    let close = delimiters.partner(open);

    let brace = close
        .and_then(|close| tokens.next_significant(close))
        .filter(|&next| tokens[next].is_punct("{"));

    let (brace_on_same_line, has_comment_before_brace) = match (close, brace) {
        (Some(close), Some(brace)) => {
            let trivia = tokens.between(close, brace);
            (
                !trivia.iter().any(Token::contains_line_break),
                trivia.iter().any(Token::is_comment),
            )
        }
        _ => (false, false),
    };

    Some(ControlHeader {
        range: unit_range(tokens, keyword, brace.or(close)),
        keyword,
        condition: ParenGroup { open, close },
        brace,
        brace_on_same_line,
        has_comment_before_brace,
    })
}
