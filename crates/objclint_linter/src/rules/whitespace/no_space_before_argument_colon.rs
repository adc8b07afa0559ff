//! NoSpaceBeforeArgumentColon rule implementation.
//!
//! In a message send the selector keyword and its colon touch:
//! `[obj setValue:v]`, never `[obj setValue :v]`.

use objclint_diagnostics::{Diagnostic, FixAvailability, Violation};
use objclint_objc_units::{RecognizedUnit, UnitKind};
use objclint_text_size::Ranged;

use crate::rules::common::{Gap, classify_gap, delete_gap};
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone)]
pub struct SpaceBeforeArgumentColon {
    keyword: String,
}

impl Violation for SpaceBeforeArgumentColon {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        format!("unexpected whitespace between `{}` and `:`", self.keyword)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoSpaceBeforeArgumentColon;

impl FromSettings for NoSpaceBeforeArgumentColon {
    const RULE_ID: &'static str = "no-space-before-argument-colon";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for NoSpaceBeforeArgumentColon {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "No whitespace between a message keyword and its colon"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::MethodInvocation]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(invocation) = unit.as_method_invocation() else {
            return vec![];
        };

        let mut diagnostics = Vec::new();
        for part in &invocation.parts {
            let (Some(keyword), Some(colon)) = (part.keyword, part.colon) else {
                continue;
            };
            let gap = classify_gap(ctx, keyword, colon);
            if gap == Gap::Empty {
                continue;
            }
            diagnostics.push(
                Diagnostic::new(
                    SpaceBeforeArgumentColon {
                        keyword: ctx.token(keyword).text().to_string(),
                    },
                    ctx.token(colon).range(),
                )
                .with_optional_fix(gap.is_plain().then(|| delete_gap(ctx, keyword, colon))),
            );
        }
        diagnostics
    }
}
