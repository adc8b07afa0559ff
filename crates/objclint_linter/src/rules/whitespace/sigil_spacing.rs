//! SigilSpacing rule implementation.
//!
//! Checks that the `-` or `+` of a method declaration is followed by exactly
//! one space before the return type.

use objclint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use objclint_objc_units::{RecognizedUnit, UnitKind};
use objclint_text_size::{Ranged, TextSize};

use crate::rules::common::{Gap, classify_gap, replace_gap};
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone)]
pub struct SigilNotFollowedBySpace {
    sigil: char,
}

impl Violation for SigilNotFollowedBySpace {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        format!("expected one space after `{}`", self.sigil)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SigilSpacing;

impl FromSettings for SigilSpacing {
    const RULE_ID: &'static str = "sigil-spacing";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for SigilSpacing {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "Exactly one space follows the `-` or `+` of a method declaration"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::MethodDeclaration]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(method) = unit.as_method_declaration() else {
            return vec![];
        };
        let sigil = method.sigil;
        let open = method.return_type.open;
        if open == sigil {
            return vec![];
        }

        let gap = classify_gap(ctx, sigil, open);
        let fix = match gap {
            Gap::SingleSpace => return vec![],
            Gap::Empty | Gap::LineBreak => Some(replace_gap(ctx, sigil, open, " ")),
            Gap::Whitespace => {
                let range = ctx.gap(sigil, open);
                let text = ctx.text_at(range);
                if text.bytes().all(|byte| byte == b' ') {
                    // Keep the first space, drop the rest.
                    Some(Fix::safe_edit(Edit::deletion(
                        range.start() + TextSize::from(1),
                        range.end(),
                    )))
                } else {
                    Some(replace_gap(ctx, sigil, open, " "))
                }
            }
            Gap::Comment => None,
        };

        let token = ctx.token(sigil);
        vec![
            Diagnostic::new(
                SigilNotFollowedBySpace {
                    sigil: token.text().chars().next().unwrap_or('-'),
                },
                token.range(),
            )
            .with_optional_fix(fix),
        ]
    }
}
