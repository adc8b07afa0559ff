use objclint_objc_lexer::{TokenKind, Tokens};
use objclint_text_size::{Ranged, TextRange, TextSize};

use crate::unit::{DirectiveStyle, ImportDirective, PathDelimiter};

/// Recognize `#import` or `#include` followed by a path on the same line.
pub(crate) fn recognize(tokens: &Tokens, directive: usize) -> Option<ImportDirective> {
    let style = match tokens[directive].text() {
        "#import" => DirectiveStyle::Import,
        "#include" => DirectiveStyle::Include,
        _ => return None,
    };

    let mut start = directive + 1;
    while tokens.get(start)?.is_whitespace() {
        start += 1;
    }
    let token = &tokens[start];

    let (delimiter, path_range, last) = if token.kind() == TokenKind::StringLiteral {
        let text = token.text();
        if token.error().is_some() || !text.starts_with('"') || text.len() < 2 {
            return None;
        }
        let one = TextSize::from(1);
        let range = TextRange::new(token.start() + one, token.end() - one);
        (PathDelimiter::Quoted, range, start)
    } else if token.is_punct("<") {
        let close = (start + 1..tokens.len())
            .take_while(|&i| !tokens[i].contains_line_break())
            .find(|&i| tokens[i].is_punct(">"))?;
        let range = TextRange::new(token.end(), tokens[close].start());
        (PathDelimiter::Angle, range, close)
    } else {
        return None;
    };

    Some(ImportDirective {
        range: TextRange::new(tokens[directive].start(), tokens[last].end()),
        directive,
        style,
        delimiter,
        path: tokens.source()[path_range].to_string(),
        path_range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognize;

    fn directives(source: &str) -> Vec<ImportDirective> {
        let tokens = Tokens::new(source);
        recognize(&tokens)
            .units
            .into_iter()
            .filter_map(|unit| unit.import_directive())
            .collect()
    }

    #[test]
    fn test_quoted_import() {
        let directives = directives("#import \"Foo/Bar.h\"\n");
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].style, DirectiveStyle::Import);
        assert_eq!(directives[0].delimiter, PathDelimiter::Quoted);
        assert_eq!(directives[0].path, "Foo/Bar.h");
    }

    #[test]
    fn test_angle_include() {
        let directives = directives("#include <sys/types.h>\n#include <stdio.h>\n");
        let paths: Vec<_> = directives.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["sys/types.h", "stdio.h"]);
        assert!(
            directives
                .iter()
                .all(|d| d.style == DirectiveStyle::Include)
        );
    }

    #[test]
    fn test_other_directives_are_ignored() {
        assert!(directives("#define FOO 1\n#pragma mark - Section\n").is_empty());
    }

    #[test]
    fn test_unterminated_angle_path() {
        assert!(directives("#import <Foundation/Foundation.h\nint x;").is_empty());
    }
}
