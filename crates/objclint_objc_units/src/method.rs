use objclint_objc_lexer::{TokenKind, Tokens};

use crate::DelimiterTable;
use crate::recognizer::unit_range;
use crate::unit::{
    DeclarationContext, MethodDeclaration, MethodTerminator, ParameterGroup, ParenGroup,
};

/// Recognize a method declaration whose sigil is at `sigil`. The caller has
/// checked that the sigil is followed by `(`.
pub(crate) fn recognize(
    tokens: &Tokens,
    delimiters: &DelimiterTable,
    sigil: usize,
    context: DeclarationContext,
) -> MethodDeclaration {
    let open = tokens.next_significant(sigil).unwrap_or(sigil);
    let close = delimiters.partner(open);

    let mut selector = None;
    let mut parameters: Vec<ParameterGroup> = Vec::new();
    let mut terminator = None;
    let mut last = close;

    let mut cursor = close.and_then(|close| tokens.next_significant(close));
    let mut in_selector = true;

    while let Some(index) = cursor {
        let token = &tokens[index];
        if token.is_punct(";") {
            terminator = Some(MethodTerminator::Semicolon(index));
            last = Some(index);
            break;
        }
        if token.is_punct("{") {
            terminator = Some(MethodTerminator::Body(index));
            last = Some(index);
            break;
        }
        if starts_next_declaration(tokens, index) {
            break;
        }

        if in_selector {
            if let Some(colon) = keyword_colon(tokens, index) {
                let mut group = ParameterGroup {
                    keyword: (index != colon).then_some(index),
                    colon,
                    param_type: None,
                    name: None,
                };
                last = Some(colon);
                let mut next = tokens.next_significant(colon);

                if let Some(paren) = next
                    && tokens[paren].is_punct("(")
                {
                    let paren_close = delimiters.partner(paren);
                    group.param_type = Some(ParenGroup {
                        open: paren,
                        close: paren_close,
                    });
                    last = paren_close;
                    next = paren_close.and_then(|close| tokens.next_significant(close));
                }

                if let Some(name) = next
                    && tokens[name].kind() == TokenKind::Identifier
                    && keyword_colon(tokens, name).is_none()
                {
                    group.name = Some(name);
                    last = Some(name);
                    next = tokens.next_significant(name);
                }

                parameters.push(group);
                cursor = next;
                continue;
            }

            if token.kind() == TokenKind::Identifier && parameters.is_empty() && selector.is_none()
            {
                selector = Some(index);
                last = Some(index);
                cursor = tokens.next_significant(index);
                continue;
            }

            in_selector = false;
        }

        // Attributes, availability macros and variadic tails.
        let skip_to = if delimiters.is_matched_opener(index) {
            delimiters.partner(index).unwrap_or(index)
        } else {
            index
        };
        last = Some(skip_to);
        cursor = tokens.next_significant(skip_to);
    }

    if terminator.is_none() && cursor.is_none() {
        last = None;
    }

    let first_keyword_len = parameters
        .first()
        .and_then(|group| group.keyword)
        .or(selector)
        .map_or(0, |keyword| tokens[keyword].text().chars().count());

    MethodDeclaration {
        range: unit_range(tokens, sigil, last),
        sigil,
        return_type: ParenGroup { open, close },
        selector,
        parameters,
        first_keyword_len,
        terminator,
        context,
    }
}

/// If `index` begins a `keyword:` or anonymous `:` segment, the colon.
fn keyword_colon(tokens: &Tokens, index: usize) -> Option<usize> {
    let token = &tokens[index];
    if token.is_punct(":") {
        return Some(index);
    }
    if token.kind() != TokenKind::Identifier {
        return None;
    }
    tokens
        .next_significant(index)
        .filter(|&next| tokens[next].is_punct(":"))
}

/// `@end`, or a sigil at the start of a line that begins another declaration.
fn starts_next_declaration(tokens: &Tokens, index: usize) -> bool {
    let token = &tokens[index];
    if token.kind() == TokenKind::AtKeyword {
        return true;
    }
    (token.is_punct("-") || token.is_punct("+"))
        && tokens.is_first_on_line(index)
        && tokens
            .next_significant(index)
            .is_some_and(|next| tokens[next].is_punct("("))
}

#[cfg(test)]
mod tests {
    use objclint_text_size::TextSize;

    use super::*;
    use crate::recognize;

    fn method(source: &str) -> (Tokens<'_>, MethodDeclaration) {
        let tokens = Tokens::new(source);
        let method = recognize(&tokens)
            .units
            .into_iter()
            .find_map(|unit| unit.method_declaration())
            .expect("method declaration");
        (tokens, method)
    }

    fn text(tokens: &Tokens, index: Option<usize>) -> Option<String> {
        index.map(|index| tokens[index].text().to_string())
    }

    #[test]
    fn test_multi_part_selector() {
        let (tokens, method) = method("- (void)setX:(int)x y:(NSString *)y;");
        assert_eq!(method.parameters.len(), 2);
        assert_eq!(text(&tokens, method.parameters[0].keyword).as_deref(), Some("setX"));
        assert_eq!(text(&tokens, method.parameters[0].name).as_deref(), Some("x"));
        assert_eq!(text(&tokens, method.parameters[1].keyword).as_deref(), Some("y"));
        assert_eq!(text(&tokens, method.parameters[1].name).as_deref(), Some("y"));
        assert_eq!(method.first_keyword_len, 4);
        assert!(matches!(
            method.terminator,
            Some(MethodTerminator::Semicolon(_))
        ));
    }

    #[test]
    fn test_unary_selector_with_body() {
        let (tokens, method) = method("+ (instancetype)shared {\n}\n");
        assert!(method.parameters.is_empty());
        assert_eq!(text(&tokens, method.selector).as_deref(), Some("shared"));
        assert!(method.terminator.is_some_and(MethodTerminator::is_body));
        assert_eq!(method.first_keyword_len, 6);
    }

    #[test]
    fn test_anonymous_segment() {
        let (_, method) = method("- (void)a:(int)x :(int)y;");
        assert_eq!(method.parameters.len(), 2);
        assert_eq!(method.parameters[1].keyword, None);
    }

    #[test]
    fn test_trailing_attribute() {
        let (tokens, method) =
            method("- (void)old __attribute__((deprecated(\"use new\")));");
        assert_eq!(text(&tokens, method.selector).as_deref(), Some("old"));
        assert!(matches!(
            method.terminator,
            Some(MethodTerminator::Semicolon(_))
        ));
    }

    #[test]
    fn test_multi_line_selector() {
        let source = "- (void)setA:(int)a\n           b:(int)b;";
        let (tokens, method) = method(source);
        assert!(method.is_multi_line(&tokens));
    }

    #[test]
    fn test_truncated_declaration() {
        let source = "- (void)setA:(int)a";
        let (_, method) = method(source);
        assert_eq!(method.terminator, None);
        assert_eq!(method.range.end(), TextSize::of(source));
    }

    #[test]
    fn test_unclosed_return_type() {
        let source = "- (void f;";
        let (_, method) = method(source);
        assert_eq!(method.return_type.close, None);
        assert_eq!(method.terminator, None);
        assert!(method.parameters.is_empty());
    }
}
