use objclint_objc_lexer::{TokenKind, Tokens};

use crate::DelimiterTable;
use crate::recognizer::unit_range;
use crate::unit::{MethodInvocation, SelectorPart, TokenSpan};

/// Keywords after which `[` still begins an expression.
const EXPRESSION_KEYWORDS: &[&str] = &["return", "case", "in", "else", "do", "throw"];

/// Recognize a message send opening at `open`, or `None` when the bracket is
/// a subscript, an array declarator or anything else.
pub(crate) fn recognize(
    tokens: &Tokens,
    delimiters: &DelimiterTable,
    open: usize,
) -> Option<MethodInvocation> {
    if !at_expression_start(tokens, open) {
        return None;
    }

    let close = delimiters.partner(open);
    let limit = close.unwrap_or(tokens.len());
    let within = |index: usize| (index < limit).then_some(index);

    let first = tokens.next_significant(open).and_then(within)?;
    let receiver_last = receiver_end(tokens, delimiters, first, limit)?;
    let mut cursor = tokens.next_significant(receiver_last).and_then(within);

    let mut parts = Vec::new();
    if let Some(selector) = cursor
        && tokens[selector].kind() == TokenKind::Identifier
        && close.is_some()
        && tokens.next_significant(selector) == close
    {
        parts.push(SelectorPart {
            keyword: Some(selector),
            colon: None,
        });
    } else {
        let mut pending_ternary = 0usize;
        while let Some(index) = cursor {
            let token = &tokens[index];
            if token.is_punct("?") {
                pending_ternary += 1;
            } else if token.is_punct(":") {
                if pending_ternary > 0 {
                    pending_ternary -= 1;
                } else {
                    let keyword = tokens.prev_significant(index).filter(|&keyword| {
                        keyword > receiver_last && tokens[keyword].kind() == TokenKind::Identifier
                    });
                    parts.push(SelectorPart {
                        keyword,
                        colon: Some(index),
                    });
                }
            }
            let skip_to = if delimiters.is_matched_opener(index) {
                delimiters.partner(index).unwrap_or(index)
            } else {
                index
            };
            cursor = tokens.next_significant(skip_to).and_then(within);
        }
    }

    if parts.is_empty() {
        return None;
    }

    Some(MethodInvocation {
        range: unit_range(tokens, open, close),
        open,
        close,
        receiver: TokenSpan {
            first,
            last: receiver_last,
        },
        parts,
    })
}

/// Whether a `[` at `open` sits where an expression may begin.
fn at_expression_start(tokens: &Tokens, open: usize) -> bool {
    let Some(prev) = tokens.prev_significant(open) else {
        return true;
    };
    let prev = &tokens[prev];
    match prev.kind() {
        TokenKind::Identifier => EXPRESSION_KEYWORDS.contains(&prev.text()),
        TokenKind::StringLiteral | TokenKind::CharLiteral | TokenKind::NumericLiteral => false,
        TokenKind::Punctuation => !matches!(prev.text(), ")" | "]"),
        _ => true,
    }
}

/// The last token of the receiver expression starting at `first`.
fn receiver_end(
    tokens: &Tokens,
    delimiters: &DelimiterTable,
    first: usize,
    limit: usize,
) -> Option<usize> {
    let token = &tokens[first];
    let mut last = match token.kind() {
        TokenKind::Identifier
        | TokenKind::StringLiteral
        | TokenKind::CharLiteral
        | TokenKind::NumericLiteral => first,
        TokenKind::Punctuation if delimiters.is_matched_opener(first) => {
            let close = delimiters.partner(first)?;
            // `(Type *)value` is a cast applied to the receiver.
            if token.is_punct("(")
                && let Some(value) = tokens.next_significant(close)
                && tokens[value].kind() == TokenKind::Identifier
                && tokens.next_significant(value).is_some_and(|after| {
                    tokens[after].kind() == TokenKind::Identifier
                        || tokens[after].is_punct("[")
                        || tokens[after].is_punct("(")
                })
            {
                return receiver_end(tokens, delimiters, value, limit);
            }
            close
        }
        _ => return None,
    };

    while let Some(next) = tokens.next_significant(last).filter(|&next| next < limit) {
        let token = &tokens[next];
        if token.is_punct(".") {
            match tokens.next_significant(next) {
                Some(member) if tokens[member].kind() == TokenKind::Identifier => last = member,
                _ => break,
            }
        } else if token.is_punct("-")
            && tokens.get(next + 1).is_some_and(|arrow| arrow.is_punct(">"))
        {
            match tokens.next_significant(next + 1) {
                Some(member) if tokens[member].kind() == TokenKind::Identifier => last = member,
                _ => break,
            }
        } else if (token.is_punct("(") || token.is_punct("["))
            && delimiters.is_matched_opener(next)
        {
            last = delimiters.partner(next)?;
        } else {
            break;
        }
    }

    Some(last)
}

#[cfg(test)]
mod tests {
    use objclint_text_size::Ranged;

    use super::*;
    use crate::recognize;

    fn invocations(source: &str) -> (Tokens<'_>, Vec<MethodInvocation>) {
        let tokens = Tokens::new(source);
        let units = recognize(&tokens)
            .units
            .into_iter()
            .filter_map(|unit| unit.method_invocation())
            .collect();
        (tokens, units)
    }

    fn keywords(tokens: &Tokens, invocation: &MethodInvocation) -> Vec<String> {
        invocation
            .parts
            .iter()
            .map(|part| part.keyword.map_or_else(String::new, |k| tokens[k].text().to_string()))
            .collect()
    }

    fn receiver(tokens: &Tokens, invocation: &MethodInvocation) -> String {
        let TokenSpan { first, last } = invocation.receiver;
        tokens.source()[tokens[first].start().to_usize()..tokens[last].end().to_usize()]
            .to_string()
    }

    #[test]
    fn test_keyword_message() {
        let (tokens, units) = invocations("[obj setValue:v forKey:k];");
        assert_eq!(units.len(), 1);
        assert_eq!(keywords(&tokens, &units[0]), vec!["setValue", "forKey"]);
        assert_eq!(receiver(&tokens, &units[0]), "obj");
    }

    #[test]
    fn test_unary_message() {
        let (tokens, units) = invocations("x = [self.view bounds];");
        assert_eq!(units[0].unary_selector().map(|i| tokens[i].text()), Some("bounds"));
        assert_eq!(receiver(&tokens, &units[0]), "self.view");
    }

    #[test]
    fn test_nested_messages_in_source_order() {
        let (tokens, units) = invocations("[[Foo alloc] initWithName:[bar name]];");
        assert_eq!(units.len(), 3);
        assert_eq!(keywords(&tokens, &units[0]), vec!["initWithName"]);
        assert_eq!(keywords(&tokens, &units[1]), vec!["alloc"]);
        assert_eq!(keywords(&tokens, &units[2]), vec!["name"]);
    }

    #[test]
    fn test_ternary_colon_is_not_a_selector_part() {
        let (tokens, units) = invocations("[obj setX:flag ? a : b y:c];");
        assert_eq!(keywords(&tokens, &units[0]), vec!["setX", "y"]);
    }

    #[test]
    fn test_subscript_is_not_a_message() {
        let (_, units) = invocations("x = items[0]; y = dict[@\"k\"];");
        assert!(units.is_empty());
    }

    #[test]
    fn test_cast_receiver() {
        let (tokens, units) = invocations("n = [(NSString *)value length];");
        assert_eq!(units.len(), 1);
        assert_eq!(receiver(&tokens, &units[0]), "(NSString *)value");
        assert_eq!(keywords(&tokens, &units[0]), vec!["length"]);
    }

    #[test]
    fn test_return_message() {
        let (_, units) = invocations("return [self value];");
        assert_eq!(units.len(), 1);
    }
}
