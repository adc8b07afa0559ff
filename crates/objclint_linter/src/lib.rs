//! Objective-C style linter with auto-fix support.

pub mod fix;
pub mod linter;
pub mod registry;
pub mod report;
pub mod rules;
pub mod settings;
pub mod suppression;

mod structural;

pub use structural::{MALFORMED_LITERAL, UNBALANCED_DELIMITER};

pub use fix::{apply_edits, resolve_fixes};
pub use linter::{
    FixedSource, LintResult, Linter, LinterError, MAX_FIX_PASSES, Message, lint_source,
};
pub use registry::{FromSettings, RuleRegistry};
pub use report::{FileReport, Report};
pub use settings::LinterSettings;
pub use suppression::{SuppressionContext, SuppressionFilter};

use std::collections::HashSet;

use objclint_diagnostics::Diagnostic;
use objclint_objc_lexer::{Token, Tokens};
use objclint_objc_units::{DelimiterTable, Recognition, RecognizedUnit, UnitKind};
use objclint_source_file::{LineIndex, SourceCode};
use objclint_text_size::{Ranged, TextRange, TextSize};

/// Context provided to rules during checking.
pub struct CheckContext<'a, 'src> {
    source: &'src str,
    line_index: LineIndex,
    tokens: &'a Tokens<'src>,
    recognition: &'a Recognition,
    settings: &'a LinterSettings,
    property_names: HashSet<&'src str>,
    line_ending: &'src str,
}

impl<'a, 'src> CheckContext<'a, 'src> {
    pub fn new(
        tokens: &'a Tokens<'src>,
        recognition: &'a Recognition,
        settings: &'a LinterSettings,
    ) -> Self {
        let source = tokens.source();
        let property_names = recognition
            .units
            .iter()
            .filter_map(RecognizedUnit::as_property_declaration)
            .filter_map(|property| property.name)
            .map(|name| tokens[name].text())
            .collect();
        let line_ending = tokens
            .iter()
            .find(|token| token.is_newline())
            .map_or("\n", Token::text);
        Self {
            source,
            line_index: LineIndex::from_source_text(source),
            tokens,
            recognition,
            settings,
            property_names,
            line_ending,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Get the cached line index.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Get the source code helper for line/column info.
    pub fn source_code(&self) -> SourceCode<'src, '_> {
        SourceCode::new(self.source, &self.line_index)
    }

    pub fn tokens(&self) -> &'a Tokens<'src> {
        self.tokens
    }

    pub fn token(&self, index: usize) -> &'a Token<'src> {
        &self.tokens[index]
    }

    /// All recognized units, in source order.
    pub fn units(&self) -> &'a [RecognizedUnit] {
        &self.recognition.units
    }

    pub fn delimiters(&self) -> &'a DelimiterTable {
        &self.recognition.delimiters
    }

    pub fn settings(&self) -> &'a LinterSettings {
        self.settings
    }

    pub fn indent_width(&self) -> usize {
        self.settings.indent_width
    }

    /// Whether `name` is declared with `@property` somewhere in the file.
    pub fn is_property(&self, name: &str) -> bool {
        self.property_names.contains(name)
    }

    /// The file's line ending, taken from its first line break.
    pub fn line_ending(&self) -> &'src str {
        self.line_ending
    }

    /// Get text at a given range.
    pub fn text_at(&self, range: TextRange) -> &'src str {
        &self.source[range]
    }

    /// The range between the end of token `before` and the start of token
    /// `after`.
    pub fn gap(&self, before: usize, after: usize) -> TextRange {
        TextRange::new(self.tokens[before].end(), self.tokens[after].start())
    }

    /// Zero-based character column of a token.
    pub fn column(&self, index: usize) -> usize {
        self.tokens[index].column().to_zero_indexed()
    }

    /// Start offset of the line holding token `index`.
    pub fn line_start_offset(&self, index: usize) -> TextSize {
        self.line_index
            .line_start(self.tokens[index].line(), self.source)
    }

    /// The innermost unit of `kind` that strictly encloses `range`.
    pub fn enclosing(&self, range: TextRange, kind: UnitKind) -> Option<&'a RecognizedUnit> {
        self.recognition
            .units
            .iter()
            .rev()
            .find(|unit| {
                unit.kind() == kind && unit.range() != range && unit.range().contains_range(range)
            })
    }
}

/// Trait for lint rules.
pub trait Rule: Send + Sync {
    /// The rule identifier, as used in configuration and output.
    fn name(&self) -> &'static str;

    /// A one-line description of what the rule enforces.
    fn description(&self) -> &'static str;

    /// Unit kinds this rule inspects.
    fn relevant_kinds(&self) -> &'static [UnitKind];

    /// Check a recognized unit for violations.
    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic>;
}
