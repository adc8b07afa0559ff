//! Brace placement rules.
//!
//! The opening brace of a control body or a method body stays on the line of
//! its header: `if (x) {` and `- (void)run {`.

use objclint_diagnostics::{Diagnostic, FixAvailability, Violation};
use objclint_objc_units::{MethodTerminator, RecognizedUnit, UnitKind};
use objclint_text_size::Ranged;

use crate::rules::common::{Gap, classify_gap, replace_gap};
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone)]
pub struct BraceOnOwnLine {
    owner: &'static str,
}

impl Violation for BraceOnOwnLine {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        format!("`{{` should be on the same line as the {}", self.owner)
    }
}

/// Join a brace that sits on a later line back onto its header.
fn join_brace(ctx: &CheckContext, brace: usize, owner: &'static str) -> Option<Diagnostic> {
    let anchor = ctx.tokens().prev_significant(brace)?;
    if !ctx.tokens().has_line_break_between(anchor, brace) {
        return None;
    }
    let fix = (classify_gap(ctx, anchor, brace) == Gap::LineBreak)
        .then(|| replace_gap(ctx, anchor, brace, " "));
    Some(Diagnostic::new(BraceOnOwnLine { owner }, ctx.token(brace).range()).with_optional_fix(fix))
}

#[derive(Debug, Clone, Default)]
pub struct NoLinebreakBeforeControlBrace;

impl FromSettings for NoLinebreakBeforeControlBrace {
    const RULE_ID: &'static str = "no-linebreak-before-control-brace";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for NoLinebreakBeforeControlBrace {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "The opening brace of a control body stays on the header line"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::ControlHeader]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(header) = unit.as_control_header() else {
            return vec![];
        };
        let Some(brace) = header.brace else {
            return vec![];
        };
        if header.brace_on_same_line {
            return vec![];
        }
        join_brace(ctx, brace, "control statement")
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoLinebreakBeforeMethodBodyBrace;

impl FromSettings for NoLinebreakBeforeMethodBodyBrace {
    const RULE_ID: &'static str = "no-linebreak-before-method-body-brace";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for NoLinebreakBeforeMethodBodyBrace {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "The opening brace of a method body stays on the signature line"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::MethodDeclaration]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(method) = unit.as_method_declaration() else {
            return vec![];
        };
        let Some(MethodTerminator::Body(brace)) = method.terminator else {
            return vec![];
        };
        join_brace(ctx, brace, "method signature")
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_util::{bodies, check, fix};

    #[test]
    fn test_control_brace_on_next_line() {
        let source = "if (x)\n{\n    y();\n}\n";
        let diagnostics = check::<NoLinebreakBeforeControlBrace>(source);
        assert_eq!(
            bodies(&diagnostics),
            vec!["`{` should be on the same line as the control statement"]
        );
        assert_eq!(
            fix::<NoLinebreakBeforeControlBrace>(source),
            "if (x) {\n    y();\n}\n"
        );
    }

    #[test]
    fn test_control_brace_after_comment_has_no_fix() {
        let diagnostics = check::<NoLinebreakBeforeControlBrace>("if (x) // why\n{\n}\n");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn test_method_brace_on_next_line() {
        let source = "- (void)run\n{\n}\n";
        assert_eq!(
            fix::<NoLinebreakBeforeMethodBodyBrace>(source),
            "- (void)run {\n}\n"
        );
    }

    #[test]
    fn test_multi_line_signature_brace() {
        let source = "- (void)setA:(int)a\n           b:(int)b\n{\n}\n";
        assert_eq!(
            fix::<NoLinebreakBeforeMethodBodyBrace>(source),
            "- (void)setA:(int)a\n           b:(int)b {\n}\n"
        );
    }

    #[test]
    fn test_conforming() {
        assert!(check::<NoLinebreakBeforeControlBrace>("while (x) {\n}\n").is_empty());
        assert!(check::<NoLinebreakBeforeMethodBodyBrace>("- (void)run {\n}\n").is_empty());
        assert!(check::<NoLinebreakBeforeControlBrace>("if (x)\n    y();\n").is_empty());
    }
}
