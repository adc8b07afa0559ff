//! ContainerLiteralBracketSpacing rule implementation.
//!
//! Single-line literals are padded with one space inside the brackets:
//! `@[ @1, @2 ]` and `@{ @"a" : @1 }`. Multi-line literals put every element
//! on its own line, one indent deeper than the line that opens the literal,
//! and the closing bracket back at the opening line's indentation.

use objclint_diagnostics::{Diagnostic, Fix, FixAvailability, Violation};
use objclint_objc_units::{ContainerLiteral, RecognizedUnit, UnitKind};
use objclint_text_size::Ranged;

use crate::rules::common::{Gap, classify_gap, delete_gap, newline_indent, reindent, replace_gap};
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone, PartialEq, Eq)]
enum LayoutProblem {
    SpaceAfterOpener(String),
    SpaceBeforeCloser(String),
    SpaceBeforeComma,
    SpaceAfterComma,
    SpaceBeforeKeySeparator,
    SpaceAfterKeySeparator,
    OpenerOnOwnLine(String),
    ElementNotOnOwnLine,
    MisindentedElement(usize),
    CloserNotOnOwnLine(String),
    MisindentedCloser(String, usize),
}

#[derive(Debug, Clone)]
pub struct LiteralLayout {
    problem: LayoutProblem,
}

impl Violation for LiteralLayout {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        match &self.problem {
            LayoutProblem::SpaceAfterOpener(open) => format!("expected one space after `{open}`"),
            LayoutProblem::SpaceBeforeCloser(close) => {
                format!("expected one space before `{close}`")
            }
            LayoutProblem::SpaceBeforeComma => "unexpected whitespace before `,`".to_string(),
            LayoutProblem::SpaceAfterComma => "expected one space after `,`".to_string(),
            LayoutProblem::SpaceBeforeKeySeparator => "expected one space before `:`".to_string(),
            LayoutProblem::SpaceAfterKeySeparator => "expected one space after `:`".to_string(),
            LayoutProblem::OpenerOnOwnLine(open) => {
                format!("`{open}` of a multi-line literal should not start its own line")
            }
            LayoutProblem::ElementNotOnOwnLine => {
                "each element of a multi-line literal should start its own line".to_string()
            }
            LayoutProblem::MisindentedElement(column) => {
                format!("literal element should be at column {column}")
            }
            LayoutProblem::CloserNotOnOwnLine(close) => {
                format!("`{close}` of a multi-line literal should start its own line")
            }
            LayoutProblem::MisindentedCloser(close, column) => {
                format!("`{close}` should be at column {column}")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContainerLiteralBracketSpacing;

impl FromSettings for ContainerLiteralBracketSpacing {
    const RULE_ID: &'static str = "container-literal-bracket-spacing";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for ContainerLiteralBracketSpacing {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "Spacing and layout inside `@[...]` and `@{...}` literals"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::ContainerLiteral]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(literal) = unit.as_container_literal() else {
            return vec![];
        };
        // Unclosed literals are reported as malformed elsewhere.
        let Some(close) = literal.close else {
            return vec![];
        };
        if literal.is_empty() {
            return vec![];
        }

        let mut checker = LiteralChecker {
            ctx,
            literal,
            close,
            diagnostics: Vec::new(),
        };
        let multi_line = is_multi_line(ctx, literal);
        if multi_line {
            checker.check_multi_line();
        } else {
            checker.check_single_line();
        }
        checker.check_separators(multi_line);
        checker.diagnostics
    }
}

fn is_multi_line(ctx: &CheckContext, literal: &ContainerLiteral) -> bool {
    literal
        .close
        .is_some_and(|close| ctx.tokens().has_line_break_between(literal.open, close))
}

/// The column the closing bracket of a multi-line literal belongs at.
///
/// A literal that starts an element of an enclosing multi-line literal takes
/// its base from the enclosing literal's element column, since that is where
/// its line will be indented to.
fn base_column(ctx: &CheckContext, literal: &ContainerLiteral) -> usize {
    let tokens = ctx.tokens();
    if let Some(outer) = ctx
        .enclosing(literal.range, UnitKind::ContainerLiteral)
        .and_then(RecognizedUnit::as_container_literal)
        && is_multi_line(ctx, outer)
        && let Some(element) = outer
            .elements
            .iter()
            .find(|element| element.first <= literal.open && literal.open <= element.last)
        && tokens[element.first].line() == tokens[literal.open].line()
    {
        return base_column(ctx, outer) + ctx.indent_width();
    }
    tokens.line_indent(literal.open).chars().count()
}

struct LiteralChecker<'c, 'a, 'src> {
    ctx: &'c CheckContext<'a, 'src>,
    literal: &'c ContainerLiteral,
    close: usize,
    diagnostics: Vec<Diagnostic>,
}

impl LiteralChecker<'_, '_, '_> {
    fn open_text(&self) -> String {
        self.ctx.token(self.literal.open).text().to_string()
    }

    fn close_text(&self) -> String {
        self.ctx.token(self.close).text().to_string()
    }

    fn report(&mut self, problem: LayoutProblem, at: usize, fix: Option<Fix>) {
        self.diagnostics.push(
            Diagnostic::new(LiteralLayout { problem }, self.ctx.token(at).range())
                .with_optional_fix(fix),
        );
    }

    /// Require a single space between two tokens.
    fn expect_single_space(
        &mut self,
        before: usize,
        after: usize,
        problem: LayoutProblem,
        at: usize,
    ) {
        let gap = classify_gap(self.ctx, before, after);
        if gap == Gap::SingleSpace || (gap == Gap::Comment && self.space_then_comment(before, after)) {
            return;
        }
        let fix = gap
            .is_plain()
            .then(|| replace_gap(self.ctx, before, after, " "));
        self.report(problem, at, fix);
    }

    /// `, /* note */ @2`: one space, then a comment.
    fn space_then_comment(&self, before: usize, after: usize) -> bool {
        matches!(
            self.ctx.tokens().between(before, after),
            [space, comment, ..] if space.text() == " " && comment.is_comment()
        )
    }

    fn check_single_line(&mut self) {
        let tokens = self.ctx.tokens();
        let open = self.literal.open;
        let close = self.close;
        if let Some(first) = tokens.next_significant(open) {
            let problem = LayoutProblem::SpaceAfterOpener(self.open_text());
            self.expect_single_space(open, first, problem, open);
        }
        if let Some(last) = tokens.prev_significant(close) {
            let problem = LayoutProblem::SpaceBeforeCloser(self.close_text());
            self.expect_single_space(last, close, problem, close);
        }
    }

    fn check_multi_line(&mut self) {
        let ctx = self.ctx;
        let tokens = ctx.tokens();
        let literal = self.literal;
        let open = literal.open;
        let base = base_column(ctx, literal);
        let element_column = base + ctx.indent_width();

        if let Some(prev) = tokens.prev_significant(open)
            && tokens.has_line_break_between(prev, open)
        {
            let problem = LayoutProblem::OpenerOnOwnLine(self.open_text());
            self.report(problem, open, None);
        }

        for element in &literal.elements {
            let first = element.first;
            let prev = tokens.prev_significant(first).unwrap_or(open);
            if !tokens.has_line_break_between(prev, first) {
                let fix = classify_gap(ctx, prev, first).is_plain().then(|| {
                    replace_gap(ctx, prev, first, &newline_indent(ctx, element_column))
                });
                self.report(LayoutProblem::ElementNotOnOwnLine, first, fix);
            } else if tokens.is_first_on_line(first) && ctx.column(first) != element_column {
                self.report(
                    LayoutProblem::MisindentedElement(element_column + 1),
                    first,
                    reindent(ctx, first, element_column),
                );
            }
        }

        let close = self.close;
        let prev = tokens.prev_significant(close).unwrap_or(open);
        if !tokens.has_line_break_between(prev, close) {
            let fix = classify_gap(ctx, prev, close)
                .is_plain()
                .then(|| replace_gap(ctx, prev, close, &newline_indent(ctx, base)));
            let problem = LayoutProblem::CloserNotOnOwnLine(self.close_text());
            self.report(problem, close, fix);
        } else if tokens.is_first_on_line(close) && ctx.column(close) != base {
            let problem = LayoutProblem::MisindentedCloser(self.close_text(), base + 1);
            self.report(problem, close, reindent(ctx, close, base));
        }
    }

    /// Commas and dictionary colons.
    fn check_separators(&mut self, multi_line: bool) {
        let ctx = self.ctx;
        let tokens = ctx.tokens();
        let literal = self.literal;
        for element in &literal.elements {
            if let Some(comma) = element.comma {
                let gap = classify_gap(ctx, element.last, comma);
                if gap != Gap::Empty {
                    let fix = matches!(gap, Gap::SingleSpace | Gap::Whitespace)
                        .then(|| delete_gap(ctx, element.last, comma));
                    self.report(LayoutProblem::SpaceBeforeComma, comma, fix);
                }
                if !multi_line
                    && let Some(next) = tokens.next_significant(comma)
                    && next != self.close
                {
                    self.expect_single_space(comma, next, LayoutProblem::SpaceAfterComma, comma);
                }
            }

            if let Some(separator) = element.key_separator {
                if let Some(key_end) = tokens.prev_significant(separator)
                    && !tokens.has_line_break_between(key_end, separator)
                {
                    self.expect_single_space(
                        key_end,
                        separator,
                        LayoutProblem::SpaceBeforeKeySeparator,
                        separator,
                    );
                }
                if let Some(value) = tokens.next_significant(separator)
                    && !tokens.has_line_break_between(separator, value)
                {
                    self.expect_single_space(
                        separator,
                        value,
                        LayoutProblem::SpaceAfterKeySeparator,
                        separator,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_util::{bodies, check, fix};

    #[test]
    fn test_single_line_array_padding() {
        let source = "x = @[@1,@2];\n";
        let diagnostics = check::<ContainerLiteralBracketSpacing>(source);
        assert_eq!(
            bodies(&diagnostics),
            vec![
                "expected one space after `@[`",
                "expected one space before `]`",
                "expected one space after `,`",
            ]
        );
        assert_eq!(
            fix::<ContainerLiteralBracketSpacing>(source),
            "x = @[ @1, @2 ];\n"
        );
    }

    #[test]
    fn test_single_line_dictionary() {
        assert_eq!(
            fix::<ContainerLiteralBracketSpacing>("x = @{@\"a\":@1 , @\"b\"  :  @2};\n"),
            "x = @{ @\"a\" : @1, @\"b\" : @2 };\n"
        );
    }

    #[test]
    fn test_nested_single_line() {
        assert_eq!(
            fix::<ContainerLiteralBracketSpacing>("x = @[@[@1]];\n"),
            "x = @[ @[ @1 ] ];\n"
        );
    }

    #[test]
    fn test_base_column_is_statement_indentation() {
        let source = "NSArray *names = @[\n    @\"Brian\",\n    @\"Matt\"\n];\n";
        assert!(check::<ContainerLiteralBracketSpacing>(source).is_empty());
        assert_eq!(
            fix::<ContainerLiteralBracketSpacing>(
                "NSArray *names = @[\n                    @\"Brian\",\n    @\"Matt\"\n                 ];\n"
            ),
            source
        );
    }

    #[test]
    fn test_comment_after_single_space() {
        assert!(check::<ContainerLiteralBracketSpacing>("x = @[ @1, /* c */ @2 ];\n").is_empty());
        let diagnostics = check::<ContainerLiteralBracketSpacing>("x = @[ @1,/* c */ @2 ];\n");
        assert_eq!(bodies(&diagnostics), vec!["expected one space after `,`"]);
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn test_line_breaks_follow_the_file() {
        assert_eq!(
            fix::<ContainerLiteralBracketSpacing>("x = @[ @1,\r\n  @2 ];\r\n"),
            "x = @[\r\n    @1,\r\n    @2\r\n];\r\n"
        );
    }

    #[test]
    fn test_empty_literal_is_exempt() {
        assert!(check::<ContainerLiteralBracketSpacing>("x = @[];\ny = @{};\n").is_empty());
    }

    #[test]
    fn test_multi_line_layout() {
        let source = "\
    x = @[
  @1,
      @2];
";
        let expected = "\
    x = @[
        @1,
        @2
    ];
";
        let diagnostics = check::<ContainerLiteralBracketSpacing>(source);
        assert_eq!(
            bodies(&diagnostics),
            vec![
                "literal element should be at column 9",
                "literal element should be at column 9",
                "`]` of a multi-line literal should start its own line",
            ]
        );
        assert_eq!(fix::<ContainerLiteralBracketSpacing>(source), expected);
    }

    #[test]
    fn test_multi_line_first_element_on_opener_line() {
        let source = "x = @{ @\"a\" : @1,\n    @\"b\" : @2\n};\n";
        assert_eq!(
            fix::<ContainerLiteralBracketSpacing>(source),
            "x = @{\n    @\"a\" : @1,\n    @\"b\" : @2\n};\n"
        );
    }

    #[test]
    fn test_nested_multi_line_uses_outer_element_column() {
        let source = "\
x = @[
    @{
        @\"a\" : @1
    },
];
";
        assert!(check::<ContainerLiteralBracketSpacing>(source).is_empty());
    }

    #[test]
    fn test_opener_on_own_line_has_no_fix() {
        let source = "x =\n@[\n    @1\n];\n";
        let diagnostics = check::<ContainerLiteralBracketSpacing>(source);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn test_conforming() {
        let source = "x = @[ @1, @2 ];\ny = @{ @\"k\" : @[ @1 ] };\nz = @[\n    @1,\n    @2,\n];\n";
        assert!(check::<ContainerLiteralBracketSpacing>(source).is_empty());
    }
}
