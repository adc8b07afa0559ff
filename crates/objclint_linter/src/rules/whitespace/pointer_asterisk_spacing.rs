//! PointerAsteriskSpacing rule implementation.
//!
//! In method types, property types and pointer variable declarations the `*`
//! binds to the declarator: `NSString *name`, never `NSString* name` or
//! `NSString*name`.

use objclint_diagnostics::{Diagnostic, FixAvailability, Violation};
use objclint_objc_lexer::TokenKind;
use objclint_objc_units::{POINTER_QUALIFIERS, RecognizedUnit, UnitKind};
use objclint_text_size::{Ranged, TextRange};

use crate::rules::common::{Gap, classify_gap, delete_gap, replace_gap};
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AsteriskSide {
    Before,
    After,
}

#[derive(Debug, Clone)]
pub struct MisplacedPointerAsterisk {
    side: AsteriskSide,
}

impl Violation for MisplacedPointerAsterisk {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        match self.side {
            AsteriskSide::Before => "expected one space before `*`".to_string(),
            AsteriskSide::After => "unexpected whitespace after `*`".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointerAsteriskSpacing;

impl FromSettings for PointerAsteriskSpacing {
    const RULE_ID: &'static str = "pointer-asterisk-spacing";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for PointerAsteriskSpacing {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "Pointer asterisks take a space before and none after"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[
            UnitKind::MethodDeclaration,
            UnitKind::PropertyDeclaration,
            UnitKind::VariableDeclaration,
        ]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        type_regions(unit)
            .into_iter()
            .flat_map(|(first, end)| check_region(ctx, first, end))
            .collect()
    }
}

/// Token regions holding a type: `first` up to, not including, `end`.
fn type_regions(unit: &RecognizedUnit) -> Vec<(usize, usize)> {
    match unit {
        RecognizedUnit::MethodDeclaration(method) => std::iter::once(method.return_type)
            .chain(method.parameters.iter().filter_map(|group| group.param_type))
            .filter_map(|group| group.close.map(|close| (group.open + 1, close)))
            .collect(),
        RecognizedUnit::PropertyDeclaration(property) => match (property.type_start, property.name)
        {
            (Some(first), Some(name)) if first < name => vec![(first, name)],
            _ => vec![],
        },
        RecognizedUnit::VariableDeclaration(declaration) => declaration
            .declarators
            .iter()
            .map(|declarator| (declarator.first, declarator.last))
            .collect(),
        _ => vec![],
    }
}

fn check_region(ctx: &CheckContext, first: usize, end: usize) -> Vec<Diagnostic> {
    let tokens = ctx.tokens();
    let mut diagnostics = Vec::new();
    let mut index = first;
    while index < end {
        if !tokens[index].is_punct("*") {
            index += 1;
            continue;
        }
        let run_start = index;
        while index + 1 < end && tokens[index + 1].is_punct("*") {
            index += 1;
        }
        let run_end = index;
        index += 1;

        let range = TextRange::new(tokens[run_start].start(), tokens[run_end].end());

        // `(*)` and `(^*)`-style declarators have nothing to space from.
        let prev = tokens.prev_significant(run_start).filter(|&prev| {
            prev >= first
                && (tokens[prev].kind() == TokenKind::Identifier || tokens[prev].is_punct(">"))
        });
        if let Some(prev) = prev {
            let gap = classify_gap(ctx, prev, run_start);
            if gap != Gap::SingleSpace {
                diagnostics.push(
                    Diagnostic::new(
                        MisplacedPointerAsterisk {
                            side: AsteriskSide::Before,
                        },
                        range,
                    )
                    .with_optional_fix(
                        gap.is_plain()
                            .then(|| replace_gap(ctx, prev, run_start, " ")),
                    ),
                );
            }
        }

        if let Some(next) = tokens.next_significant(run_end)
            && next <= end
            && !POINTER_QUALIFIERS.contains(&tokens[next].text())
        {
            let gap = classify_gap(ctx, run_end, next);
            if gap != Gap::Empty {
                diagnostics.push(
                    Diagnostic::new(
                        MisplacedPointerAsterisk {
                            side: AsteriskSide::After,
                        },
                        range,
                    )
                    .with_optional_fix(
                        matches!(gap, Gap::SingleSpace | Gap::Whitespace)
                            .then(|| delete_gap(ctx, run_end, next)),
                    ),
                );
            }
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_util::{bodies, check, fix};

    #[test]
    fn test_asterisk_attached_to_type() {
        let source = "- (NSString*)name;\n";
        let diagnostics = check::<PointerAsteriskSpacing>(source);
        assert_eq!(bodies(&diagnostics), vec!["expected one space before `*`"]);
        assert_eq!(fix::<PointerAsteriskSpacing>(source), "- (NSString *)name;\n");
    }

    #[test]
    fn test_property_asterisk_attached_to_type() {
        let source = "@property (nonatomic) NSString* name;\n";
        assert_eq!(check::<PointerAsteriskSpacing>(source).len(), 2);
        assert_eq!(
            fix::<PointerAsteriskSpacing>(source),
            "@property (nonatomic) NSString *name;\n"
        );
    }

    #[test]
    fn test_double_pointer_is_one_run() {
        let source = "- (void)get:(NSError**)error;\n";
        assert_eq!(check::<PointerAsteriskSpacing>(source).len(), 1);
        assert_eq!(
            fix::<PointerAsteriskSpacing>(source),
            "- (void)get:(NSError **)error;\n"
        );
    }

    #[test]
    fn test_qualifier_after_asterisk() {
        let source = "- (NSString * _Nullable)name;\n- (id<P> __autoreleasing *)x;\n";
        assert!(check::<PointerAsteriskSpacing>(source).is_empty());
    }

    #[test]
    fn test_generic_type() {
        assert_eq!(
            fix::<PointerAsteriskSpacing>("- (NSArray<NSString *>*)names;\n"),
            "- (NSArray<NSString *> *)names;\n"
        );
    }

    #[test]
    fn test_local_variable() {
        let source = "- (void)f {\n    NSString* s = nil;\n}\n";
        let diagnostics = check::<PointerAsteriskSpacing>(source);
        assert_eq!(
            bodies(&diagnostics),
            vec![
                "expected one space before `*`",
                "unexpected whitespace after `*`"
            ]
        );
        assert_eq!(
            fix::<PointerAsteriskSpacing>(source),
            "- (void)f {\n    NSString *s = nil;\n}\n"
        );
    }

    #[test]
    fn test_instance_variable() {
        let source = "@interface Foo : NSObject {\n    NSString*_name;\n}\n@end\n";
        assert_eq!(check::<PointerAsteriskSpacing>(source).len(), 1);
        assert_eq!(
            fix::<PointerAsteriskSpacing>(source),
            "@interface Foo : NSObject {\n    NSString *_name;\n}\n@end\n"
        );
    }

    #[test]
    fn test_static_constant() {
        let source = "#import \"Foo.h\"\n\nstatic NSString* const kKey = @\"k\";\n";
        let diagnostics = check::<PointerAsteriskSpacing>(source);
        assert_eq!(bodies(&diagnostics), vec!["expected one space before `*`"]);
        assert_eq!(
            fix::<PointerAsteriskSpacing>(source),
            "#import \"Foo.h\"\n\nstatic NSString * const kKey = @\"k\";\n"
        );
    }

    #[test]
    fn test_second_declarator() {
        let source = "- (void)f {\n    NSError *a, * b;\n}\n";
        assert_eq!(
            fix::<PointerAsteriskSpacing>(source),
            "- (void)f {\n    NSError *a, *b;\n}\n"
        );
    }

    #[test]
    fn test_multiplication_is_ignored() {
        let source = "- (void)f {\n    x = y*z;\n    return a* b;\n}\n";
        assert!(check::<PointerAsteriskSpacing>(source).is_empty());
    }

    #[test]
    fn test_conforming() {
        let source = "@property (nonatomic, copy) NSString *name;\n- (void)set:(id *)x;\n";
        assert!(check::<PointerAsteriskSpacing>(source).is_empty());
    }
}
