use objclint_objc_lexer::Tokens;

use crate::DelimiterTable;
use crate::recognizer::unit_range;
use crate::unit::{ContainerLiteral, LiteralElement, LiteralKind};

/// Recognize the `@[` or `@{` literal opening at `open`.
pub(crate) fn recognize(
    tokens: &Tokens,
    delimiters: &DelimiterTable,
    open: usize,
) -> ContainerLiteral {
    let kind = if tokens[open].is_punct("@{") {
        LiteralKind::Dictionary
    } else {
        LiteralKind::Array
    };
    let close = delimiters.partner(open);
    let limit = close.unwrap_or(tokens.len());

    let mut elements = Vec::new();
    let mut current: Option<LiteralElement> = None;
    let mut pending_ternary = 0usize;
    let mut cursor = tokens.next_significant(open).filter(|&i| i < limit);

    while let Some(index) = cursor {
        let token = &tokens[index];
        let mut skip_to = index;

        if token.is_punct(",") {
            if let Some(mut element) = current.take() {
                element.comma = Some(index);
                elements.push(element);
            }
            pending_ternary = 0;
        } else if kind == LiteralKind::Dictionary
            && token.is_punct(":")
            && let Some(element) = current.as_mut()
            && pending_ternary == 0
            && element.key_separator.is_none()
        {
            element.key_separator = Some(index);
        } else {
            if token.is_punct("?") {
                pending_ternary += 1;
            } else if token.is_punct(":") {
                pending_ternary = pending_ternary.saturating_sub(1);
            }
            if delimiters.is_matched_opener(index) {
                skip_to = delimiters.partner(index).unwrap_or(index);
            }
            match current.as_mut() {
                Some(element) => element.last = skip_to,
                None => {
                    current = Some(LiteralElement {
                        first: index,
                        last: skip_to,
                        key_separator: None,
                        comma: None,
                    });
                }
            }
        }

        cursor = tokens.next_significant(skip_to).filter(|&i| i < limit);
    }

    if let Some(element) = current {
        elements.push(element);
    }

    ContainerLiteral {
        range: unit_range(tokens, open, close),
        kind,
        open,
        close,
        elements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognize;

    fn literals(source: &str) -> Vec<ContainerLiteral> {
        let tokens = Tokens::new(source);
        recognize(&tokens)
            .units
            .into_iter()
            .filter_map(|unit| unit.container_literal())
            .collect()
    }

    #[test]
    fn test_array_elements() {
        let literals = literals("x = @[ @1, foo(a, b), @\"c\" ];");
        assert_eq!(literals.len(), 1);
        let array = &literals[0];
        assert_eq!(array.kind, LiteralKind::Array);
        assert_eq!(array.elements.len(), 3);
        assert!(array.elements[0].comma.is_some());
        assert!(array.elements[2].comma.is_none());
    }

    #[test]
    fn test_trailing_comma() {
        let literals = literals("x = @[\n    @1,\n    @2,\n];");
        assert_eq!(literals[0].elements.len(), 2);
        assert!(literals[0].elements[1].comma.is_some());
    }

    #[test]
    fn test_dictionary_pairs() {
        let literals = literals("d = @{ @\"a\" : flag ? @1 : @2, @\"b\" : @[ @3 ] };");
        let dictionary = &literals[0];
        assert_eq!(dictionary.kind, LiteralKind::Dictionary);
        assert_eq!(dictionary.elements.len(), 2);
        assert!(
            dictionary
                .elements
                .iter()
                .all(|element| element.key_separator.is_some())
        );
        // The nested array is its own unit.
        assert_eq!(literals.len(), 2);
    }

    #[test]
    fn test_empty_literals() {
        let literals = literals("a = @[]; d = @{};");
        assert!(literals.iter().all(ContainerLiteral::is_empty));
    }
}
