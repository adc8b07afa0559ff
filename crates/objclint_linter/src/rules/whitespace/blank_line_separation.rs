//! BlankLineSeparation rule implementation.
//!
//! Consecutive method and property declarations in an `@interface` or
//! `@protocol` block are separated by exactly one blank line.

use objclint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use objclint_objc_lexer::Token;
use objclint_objc_units::{InterfaceKind, MethodTerminator, RecognizedUnit, UnitKind};
use objclint_text_size::{Ranged, TextRange};

use crate::rules::common::replace_gap;
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone)]
pub struct WrongBlankLineCount {
    found: usize,
}

impl Violation for WrongBlankLineCount {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        format!(
            "expected one blank line between declarations, found {}",
            self.found
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlankLineSeparation;

impl FromSettings for BlankLineSeparation {
    const RULE_ID: &'static str = "blank-line-separation";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for BlankLineSeparation {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "One blank line between consecutive declarations in interfaces and protocols"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::InterfaceBlock]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(block) = unit.as_interface_block() else {
            return vec![];
        };
        if block.kind == InterfaceKind::Implementation {
            return vec![];
        }

        let members: Vec<(usize, Option<usize>)> = ctx
            .units()
            .iter()
            .filter(|member| block.range.contains_range(member.range()))
            .filter_map(|member| member_bounds(ctx, member))
            .collect();

        members
            .windows(2)
            .filter_map(|pair| {
                let (_, Some(previous_end)) = pair[0] else {
                    return None;
                };
                let (next_start, _) = pair[1];
                check_separation(ctx, previous_end, next_start)
            })
            .collect()
    }
}

/// First and last token of a declaration inside the block.
fn member_bounds(ctx: &CheckContext, unit: &RecognizedUnit) -> Option<(usize, Option<usize>)> {
    match unit {
        RecognizedUnit::MethodDeclaration(method) => {
            let end = method.terminator.and_then(|terminator| match terminator {
                MethodTerminator::Semicolon(semicolon) => Some(semicolon),
                MethodTerminator::Body(brace) => ctx.delimiters().partner(brace),
            });
            Some((method.sigil, end))
        }
        RecognizedUnit::PropertyDeclaration(property) => {
            Some((property.keyword, property.semicolon))
        }
        _ => None,
    }
}

fn check_separation(ctx: &CheckContext, previous_end: usize, next_start: usize) -> Option<Diagnostic> {
    let tokens = ctx.tokens();
    if previous_end >= next_start {
        return None;
    }
    let between = tokens.between(previous_end, next_start);
    // Anything but trivia (a macro, `@optional`) breaks the run.
    if !between.iter().all(Token::is_trivia) {
        return None;
    }

    let blank_lines = count_blank_lines(between);
    if blank_lines == 1 {
        return None;
    }

    let line_ending = ctx.line_ending();
    let fix = if between.iter().any(Token::is_comment) {
        None
    } else if !between.iter().any(Token::is_newline) {
        let indent = tokens.line_indent(previous_end);
        Some(replace_gap(
            ctx,
            previous_end,
            next_start,
            &format!("{line_ending}{line_ending}{indent}"),
        ))
    } else {
        let last_newline = between
            .iter()
            .rev()
            .find(|token| token.is_newline())
            .map(Ranged::end)?;
        let range = TextRange::new(tokens[previous_end].end(), last_newline);
        Some(Fix::safe_edit(Edit::range_replacement(
            line_ending.repeat(2),
            range,
        )))
    };

    Some(
        Diagnostic::new(
            WrongBlankLineCount {
                found: blank_lines,
            },
            tokens[next_start].range(),
        )
        .with_optional_fix(fix),
    )
}

/// Lines holding nothing but whitespace. The first line break ends the line
/// of the previous declaration.
fn count_blank_lines(between: &[Token]) -> usize {
    let mut blank_lines = 0;
    let mut seen_newline = false;
    let mut line_has_content = false;
    for token in between {
        if token.is_newline() {
            if seen_newline && !line_has_content {
                blank_lines += 1;
            }
            seen_newline = true;
            line_has_content = false;
        } else if token.is_comment() {
            line_has_content = true;
        }
    }
    blank_lines
}
