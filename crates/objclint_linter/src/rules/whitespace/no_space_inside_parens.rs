//! NoSpaceInsideParens rule implementation.
//!
//! Checks for whitespace just inside the parentheses of control conditions,
//! method return and parameter types, and property attribute lists.

use objclint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use objclint_objc_units::{ParenGroup, RecognizedUnit, UnitKind};
use objclint_text_size::Ranged;

use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParenSide {
    AfterOpen,
    BeforeClose,
    Empty,
}

#[derive(Debug, Clone)]
pub struct SpaceInsideParens {
    side: ParenSide,
}

impl Violation for SpaceInsideParens {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Always;

    fn message(&self) -> String {
        match self.side {
            ParenSide::AfterOpen => "unexpected whitespace after `(`".to_string(),
            ParenSide::BeforeClose => "unexpected whitespace before `)`".to_string(),
            ParenSide::Empty => "unexpected whitespace inside `()`".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoSpaceInsideParens;

const RELEVANT_KINDS: &[UnitKind] = &[
    UnitKind::ControlHeader,
    UnitKind::MethodDeclaration,
    UnitKind::PropertyDeclaration,
];

impl FromSettings for NoSpaceInsideParens {
    const RULE_ID: &'static str = "no-space-inside-parens";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for NoSpaceInsideParens {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "No whitespace just inside condition, type and attribute parentheses"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        paren_groups(unit)
            .into_iter()
            .flat_map(|group| check_group(ctx, group))
            .collect()
    }
}

fn paren_groups(unit: &RecognizedUnit) -> Vec<ParenGroup> {
    match unit {
        RecognizedUnit::ControlHeader(header) => vec![header.condition],
        RecognizedUnit::MethodDeclaration(method) => std::iter::once(method.return_type)
            .chain(method.parameters.iter().filter_map(|group| group.param_type))
            .collect(),
        RecognizedUnit::PropertyDeclaration(property) => property.attributes.into_iter().collect(),
        _ => vec![],
    }
}

fn check_group(ctx: &CheckContext, group: ParenGroup) -> Vec<Diagnostic> {
    let Some(close) = group.close else {
        return vec![];
    };
    let open = group.open;
    if close <= open + 1 {
        return vec![];
    }

    let tokens = ctx.tokens();
    let deletion = |index: usize, side: ParenSide| {
        let range = tokens[index].range();
        Diagnostic::new(SpaceInsideParens { side }, range)
            .with_fix(Fix::safe_edit(Edit::range_deletion(range)))
    };

    let after_open = open + 1;
    let before_close = close - 1;
    if after_open == before_close {
        return if tokens[after_open].is_whitespace() {
            vec![deletion(after_open, ParenSide::Empty)]
        } else {
            vec![]
        };
    }

    let mut diagnostics = Vec::new();
    // Whitespace that runs up to a line break is indentation or trailing
    // whitespace, not padding.
    if tokens[after_open].is_whitespace() && !tokens[after_open + 1].is_newline() {
        diagnostics.push(deletion(after_open, ParenSide::AfterOpen));
    }
    if tokens[before_close].is_whitespace()
        && before_close > after_open
        && !tokens[before_close - 1].is_newline()
    {
        diagnostics.push(deletion(before_close, ParenSide::BeforeClose));
    }
    diagnostics
}
