use objclint_objc_lexer::{TokenKind, Tokens};

use crate::recognizer::unit_range;
use crate::unit::{InterfaceBlock, InterfaceKind};

/// Recognize the block opened by `@interface`, `@protocol` or
/// `@implementation` at `keyword`.
///
/// `@protocol(Name)` expressions and `@protocol A, B;` forward declarations
/// don't open a block.
pub(crate) fn recognize(tokens: &Tokens, keyword: usize) -> Option<InterfaceBlock> {
    let kind = match tokens[keyword].text() {
        "@interface" => InterfaceKind::Interface,
        "@protocol" => InterfaceKind::Protocol,
        "@implementation" => InterfaceKind::Implementation,
        _ => return None,
    };

    if kind == InterfaceKind::Protocol {
        let mut cursor = tokens.next_significant(keyword);
        if cursor.is_some_and(|next| tokens[next].is_punct("(")) {
            return None;
        }
        while let Some(index) = cursor {
            let token = &tokens[index];
            if token.is_punct(";") {
                return None;
            }
            if token.kind() != TokenKind::Identifier && !token.is_punct(",") {
                break;
            }
            cursor = tokens.next_significant(index);
        }
    }

    let end = (keyword + 1..tokens.len()).find(|&i| tokens[i].is_at_keyword("@end"));

    Some(InterfaceBlock {
        range: unit_range(tokens, keyword, end),
        kind,
        keyword,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognize;

    fn blocks(source: &str) -> Vec<InterfaceBlock> {
        let tokens = Tokens::new(source);
        recognize(&tokens)
            .units
            .into_iter()
            .filter_map(|unit| unit.interface_block())
            .collect()
    }

    #[test]
    fn test_interface_and_implementation() {
        let blocks = blocks("@interface A : NSObject\n@end\n\n@implementation A\n@end\n");
        let kinds: Vec<_> = blocks.iter().map(|block| block.kind).collect();
        assert_eq!(
            kinds,
            vec![InterfaceKind::Interface, InterfaceKind::Implementation]
        );
        assert!(blocks.iter().all(|block| block.end.is_some()));
    }

    #[test]
    fn test_forward_protocol_declaration() {
        assert!(blocks("@protocol A, B;\n").is_empty());
    }

    #[test]
    fn test_protocol_expression() {
        assert!(blocks("x = @protocol(Foo);\n").is_empty());
    }

    #[test]
    fn test_protocol_with_conformance() {
        let blocks = blocks("@protocol P <NSObject>\n- (void)f;\n@end\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, InterfaceKind::Protocol);
    }
}
