//! MultiParameterAlignment rule implementation.
//!
//! When a method selector is split over several lines, the colons of every
//! continuation line line up with the colon of the first line:
//!
//! ```text
//! - (void)setA:(int)a
//!            b:(int)b
//!     longerName:(int)c;
//! ```
//!
//! If a continuation keyword is too long to right-align, every colon moves
//! to the sigil column plus one indent plus the longest keyword.

use objclint_diagnostics::{Diagnostic, FixAvailability, Violation};
use objclint_objc_units::{MethodDeclaration, RecognizedUnit, UnitKind};
use objclint_text_size::Ranged;

use crate::rules::common::reindent;
use crate::rules::whitespace::{
    MethodColonSpacing, NoSpaceInsideParens, PointerAsteriskSpacing, SigilSpacing,
};
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone)]
pub struct MisalignedParameter {
    keyword: String,
    colon_column: usize,
}

impl Violation for MisalignedParameter {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        format!(
            "misaligned parameter `{}`: colon should be at column {}",
            self.keyword, self.colon_column
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct MultiParameterAlignment;

impl FromSettings for MultiParameterAlignment {
    const RULE_ID: &'static str = "multi-parameter-alignment";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for MultiParameterAlignment {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "Colons of a multi-line method selector are aligned"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::MethodDeclaration]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(method) = unit.as_method_declaration() else {
            return vec![];
        };
        let tokens = ctx.tokens();
        if method.parameters.len() < 2 || !method.is_multi_line(tokens) {
            return vec![];
        }
        let first_colon = method.parameters[0].colon;
        if tokens[first_colon].line() != tokens[method.sigil].line() {
            return vec![];
        }

        // Keywords that start a continuation line.
        let continuations: Vec<usize> = method.parameters[1..]
            .iter()
            .filter_map(|group| group.keyword)
            .filter(|&keyword| tokens.is_first_on_line(keyword))
            .collect();
        let Some(longest) = continuations
            .iter()
            .map(|&keyword| keyword_len(ctx, keyword))
            .max()
        else {
            return vec![];
        };

        let target = ctx
            .column(first_colon)
            .max(ctx.column(method.sigil) + ctx.indent_width() + longest);
        let fixable = first_line_is_canonical(ctx, unit, method);
        tracing::trace!(target, fixable, "checking selector alignment");

        continuations
            .into_iter()
            .filter_map(|keyword| {
                let expected = target - keyword_len(ctx, keyword);
                if ctx.column(keyword) == expected {
                    return None;
                }
                let fix = if fixable {
                    reindent(ctx, keyword, expected)
                } else {
                    None
                };
                Some(
                    Diagnostic::new(
                        MisalignedParameter {
                            keyword: ctx.token(keyword).text().to_string(),
                            colon_column: target + 1,
                        },
                        ctx.token(keyword).range(),
                    )
                    .with_optional_fix(fix),
                )
            })
            .collect()
    }
}

fn keyword_len(ctx: &CheckContext, keyword: usize) -> usize {
    ctx.token(keyword).text().chars().count()
}

/// Whether the first line of the signature already has its final layout, so
/// that the first colon will not move when other rules are applied.
fn first_line_is_canonical(
    ctx: &CheckContext,
    unit: &RecognizedUnit,
    method: &MethodDeclaration,
) -> bool {
    let first_colon = ctx.token(method.parameters[0].colon).start();
    let first_line_rules: [&dyn Rule; 4] = [
        &SigilSpacing,
        &MethodColonSpacing,
        &NoSpaceInsideParens,
        &PointerAsteriskSpacing,
    ];
    first_line_rules.iter().all(|rule| {
        rule.check(ctx, unit)
            .iter()
            .all(|diagnostic| diagnostic.range.start() > first_colon)
    })
}
