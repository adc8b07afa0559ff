//! MethodColonSpacing rule implementation.
//!
//! Inside a method signature nothing separates the return type from the
//! selector, a keyword from its colon, the colon from the parameter type, or
//! the parameter type from the parameter name.

use objclint_diagnostics::{Diagnostic, FixAvailability, Violation};
use objclint_objc_units::{MethodDeclaration, RecognizedUnit, UnitKind};

use crate::rules::common::{Gap, classify_gap, delete_gap};
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignaturePosition {
    AfterReturnType,
    BeforeColon,
    AfterColon,
    BeforeParameterName,
}

#[derive(Debug, Clone)]
pub struct WhitespaceInSignature {
    position: SignaturePosition,
}

impl Violation for WhitespaceInSignature {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        match self.position {
            SignaturePosition::AfterReturnType => "unexpected whitespace after the return type",
            SignaturePosition::BeforeColon => "unexpected whitespace before `:`",
            SignaturePosition::AfterColon => "unexpected whitespace after `:`",
            SignaturePosition::BeforeParameterName => {
                "unexpected whitespace before the parameter name"
            }
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MethodColonSpacing;

impl FromSettings for MethodColonSpacing {
    const RULE_ID: &'static str = "method-colon-spacing";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for MethodColonSpacing {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "No whitespace around selector colons and parameter types in method signatures"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::MethodDeclaration]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(method) = unit.as_method_declaration() else {
            return vec![];
        };
        signature_gaps(method)
            .into_iter()
            .filter_map(|(before, after, position)| {
                let gap = classify_gap(ctx, before, after);
                if gap == Gap::Empty {
                    return None;
                }
                // A line break here is layout, only same-line padding is removed.
                let fix = matches!(gap, Gap::SingleSpace | Gap::Whitespace)
                    .then(|| delete_gap(ctx, before, after));
                Some(
                    Diagnostic::new(WhitespaceInSignature { position }, ctx.gap(before, after))
                        .with_optional_fix(fix),
                )
            })
            .collect()
    }
}

/// Token pairs that must touch, in source order.
fn signature_gaps(method: &MethodDeclaration) -> Vec<(usize, usize, SignaturePosition)> {
    let mut gaps = Vec::new();

    let first = method
        .parameters
        .first()
        .map(|group| group.keyword.unwrap_or(group.colon))
        .or(method.selector);
    if let (Some(close), Some(first)) = (method.return_type.close, first) {
        gaps.push((close, first, SignaturePosition::AfterReturnType));
    }

    for group in &method.parameters {
        if let Some(keyword) = group.keyword {
            gaps.push((keyword, group.colon, SignaturePosition::BeforeColon));
        }
        match group.param_type {
            Some(param_type) => {
                gaps.push((group.colon, param_type.open, SignaturePosition::AfterColon));
                if let (Some(close), Some(name)) = (param_type.close, group.name) {
                    gaps.push((close, name, SignaturePosition::BeforeParameterName));
                }
            }
            None => {
                if let Some(name) = group.name {
                    gaps.push((group.colon, name, SignaturePosition::AfterColon));
                }
            }
        }
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_util::{bodies, check, fix};

    #[test]
    fn test_padded_signature() {
        let source = "- (void) setName : (NSString *) name;\n";
        let diagnostics = check::<MethodColonSpacing>(source);
        assert_eq!(
            bodies(&diagnostics),
            vec![
                "unexpected whitespace after the return type",
                "unexpected whitespace before `:`",
                "unexpected whitespace after `:`",
                "unexpected whitespace before the parameter name",
            ]
        );
        assert_eq!(
            fix::<MethodColonSpacing>(source),
            "- (void)setName:(NSString *)name;\n"
        );
    }

    #[test]
    fn test_unary_selector() {
        assert_eq!(fix::<MethodColonSpacing>("- (id) value;\n"), "- (id)value;\n");
    }

    #[test]
    fn test_line_break_is_reported_without_fix() {
        let diagnostics = check::<MethodColonSpacing>("- (void)set:\n(int)x;\n");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn test_multi_line_selector_is_conforming() {
        let source = "- (void)setA:(int)a\n           b:(int)b;\n";
        assert!(check::<MethodColonSpacing>(source).is_empty());
    }
}
