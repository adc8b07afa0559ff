//! SpaceBeforeBrace rule implementation.
//!
//! Checks that exactly one space separates a control header or a method
//! signature from the `{` that opens its body.

use objclint_diagnostics::{Diagnostic, FixAvailability, Violation};
use objclint_objc_units::{MethodTerminator, RecognizedUnit, UnitKind};
use objclint_text_size::Ranged;

use crate::rules::common::{Gap, classify_gap, replace_gap};
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

/// Violation: the trivia before `{` is not a single space.
#[derive(Debug, Clone)]
pub struct SpaceBeforeBraceViolation {
    gap: Gap,
}

impl Violation for SpaceBeforeBraceViolation {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        match self.gap {
            Gap::Empty => "missing space before `{`".to_string(),
            Gap::LineBreak | Gap::Comment => {
                "`{` should follow the header after a single space".to_string()
            }
            Gap::SingleSpace | Gap::Whitespace => "expected a single space before `{`".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpaceBeforeBrace;

const RELEVANT_KINDS: &[UnitKind] = &[UnitKind::ControlHeader, UnitKind::MethodDeclaration];

impl FromSettings for SpaceBeforeBrace {
    const RULE_ID: &'static str = "space-before-brace";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for SpaceBeforeBrace {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "Exactly one space separates a header or signature from its opening brace"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let brace = match unit {
            RecognizedUnit::ControlHeader(header) => header.brace,
            RecognizedUnit::MethodDeclaration(method) => match method.terminator {
                Some(MethodTerminator::Body(brace)) => Some(brace),
                _ => None,
            },
            _ => None,
        };
        let Some(brace) = brace else {
            return vec![];
        };
        let Some(anchor) = ctx.tokens().prev_significant(brace) else {
            return vec![];
        };

        let gap = classify_gap(ctx, anchor, brace);
        if gap == Gap::SingleSpace {
            return vec![];
        }

        let fix = gap.is_plain().then(|| replace_gap(ctx, anchor, brace, " "));
        vec![
            Diagnostic::new(SpaceBeforeBraceViolation { gap }, ctx.token(brace).range())
                .with_optional_fix(fix),
        ]
    }
}
