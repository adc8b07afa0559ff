//! The per-file pipeline: tokens, units, rule diagnostics, resolved fixes.

use objclint_config::RuleMode;
use objclint_diagnostics::{Applicability, Diagnostic, DiagnosticKind, Edit, Fix, Severity};
use objclint_objc_lexer::Tokens;
use objclint_objc_units::recognize;
use objclint_source_file::{SourceLocation, SourceSpan};
use objclint_text_size::{Ranged, TextRange};
use thiserror::Error;

use crate::report::sort_messages;
use crate::structural::structural_diagnostics;
use crate::{
    CheckContext, LinterSettings, Rule, RuleRegistry, SuppressionContext, SuppressionFilter,
    apply_edits, resolve_fixes,
};

#[derive(Error, Debug)]
pub enum LinterError {
    #[error("Unknown rule: {0}")]
    UnknownRule(String),
    #[error("Invalid suppression pattern: {0}")]
    InvalidSuppressionPattern(#[from] regex::Error),
}

/// A diagnostic attributed to a rule and located in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub rule: &'static str,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub span: SourceSpan,
    pub fix: Option<Fix>,
}

impl Message {
    pub fn body(&self) -> &str {
        &self.kind.body
    }

    pub fn location(&self) -> SourceLocation {
        self.span.start
    }
}

impl Ranged for Message {
    fn range(&self) -> TextRange {
        self.span.range
    }
}

/// Result of linting a file.
#[derive(Debug, Default)]
pub struct LintResult {
    /// Messages sorted by line, column and rule.
    pub messages: Vec<Message>,
    /// Conflict-free edits sorted by start offset. Empty unless autofix is on.
    pub edits: Vec<Edit>,
}

impl LintResult {
    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get all fixable messages.
    pub fn fixable(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|message| message.fix.is_some())
    }

    /// Messages reported by one rule.
    pub fn by_rule<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Message> {
        self.messages
            .iter()
            .filter(move |message| message.rule == rule)
    }
}

/// Upper bound on lint/apply rounds in [`Linter::fix_source`].
pub const MAX_FIX_PASSES: usize = 10;

/// The outcome of fixing one file.
#[derive(Debug)]
pub struct FixedSource {
    pub source: String,
    /// Number of edits applied across all passes.
    pub applied: usize,
    pub passes: usize,
    /// Messages left after the last pass.
    pub remaining: Vec<Message>,
}

/// Runs the enabled rules over source files.
pub struct Linter {
    settings: LinterSettings,
    rules: Vec<Box<dyn Rule>>,
    filter: SuppressionFilter,
}

impl Linter {
    pub fn new(settings: LinterSettings) -> Result<Self, LinterError> {
        Self::with_registry(&RuleRegistry::builtin(), settings)
    }

    pub fn with_registry(
        registry: &RuleRegistry,
        settings: LinterSettings,
    ) -> Result<Self, LinterError> {
        if let Some(unknown) = settings
            .referenced_rules()
            .find(|rule| !registry.has_rule(rule))
        {
            return Err(LinterError::UnknownRule(unknown.to_string()));
        }

        let rules: Vec<Box<dyn Rule>> = registry
            .rule_ids()
            .filter(|id| settings.is_rule_enabled(id))
            .filter_map(|id| registry.create_rule(id, &settings))
            .collect();
        let filter = SuppressionFilter::new(&settings.suppression_off, &settings.suppression_on)?;

        tracing::debug!(rules = rules.len(), "linter configured");
        Ok(Self {
            settings,
            rules,
            filter,
        })
    }

    pub fn settings(&self) -> &LinterSettings {
        &self.settings
    }

    /// The enabled rules, in identifier order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(AsRef::as_ref)
    }

    /// Lint one source text.
    pub fn lint_source(&self, source: &str) -> LintResult {
        let tokens = Tokens::new(source);
        let recognition = recognize(&tokens);
        tracing::debug!(
            tokens = tokens.len(),
            units = recognition.units.len(),
            defects = recognition.defects.len(),
            "recognized source"
        );

        let ctx = CheckContext::new(&tokens, &recognition, &self.settings);
        let source_code = ctx.source_code();
        let to_message = |rule: &'static str, diagnostic: Diagnostic| Message {
            rule,
            severity: Severity::Violation,
            span: source_code.span(diagnostic.range),
            kind: diagnostic.kind,
            fix: diagnostic.fix,
        };

        let mut messages: Vec<Message> = structural_diagnostics(&tokens, &recognition)
            .into_iter()
            .map(|(rule, diagnostic)| to_message(rule, diagnostic))
            .collect();

        let suppressions = SuppressionContext::from_tokens(&tokens, &self.filter);
        for rule in &self.rules {
            let before = messages.len();
            for unit in recognition
                .units
                .iter()
                .filter(|unit| rule.relevant_kinds().contains(&unit.kind()))
            {
                messages.extend(
                    rule.check(&ctx, unit)
                        .into_iter()
                        .filter(|diagnostic| {
                            !suppressions.is_suppressed(rule.name(), diagnostic.range.start())
                        })
                        .map(|diagnostic| to_message(rule.name(), diagnostic)),
                );
            }
            tracing::trace!(rule = rule.name(), count = messages.len() - before, "rule done");
        }

        self.filter_fixes(&mut messages);
        let edits = resolve_fixes(&mut messages);
        sort_messages(&mut messages);

        LintResult {
            messages,
            edits: if self.settings.autofix {
                edits
            } else {
                Vec::new()
            },
        }
    }

    /// Lint and fix `source` until no edit remains, or until
    /// [`MAX_FIX_PASSES`] passes have run. Returns the source unchanged when
    /// autofix is off.
    pub fn fix_source(&self, source: &str) -> FixedSource {
        let mut current = source.to_string();
        let mut applied = 0;
        let mut passes = 0;

        let mut result = self.lint_source(&current);
        while !result.edits.is_empty() && passes < MAX_FIX_PASSES {
            applied += result.edits.len();
            passes += 1;
            current = apply_edits(&current, &result.edits);
            result = self.lint_source(&current);
        }
        if !result.edits.is_empty() {
            tracing::warn!(passes, "fixes did not converge");
        }

        FixedSource {
            source: current,
            applied,
            passes,
            remaining: result.messages,
        }
    }

    /// Drop fixes of rules in check mode and fixes above the allowed
    /// applicability.
    fn filter_fixes(&self, messages: &mut [Message]) {
        let required = if self.settings.unsafe_fixes {
            Applicability::Unsafe
        } else {
            Applicability::Safe
        };
        for message in messages {
            let keep = message.fix.as_ref().is_some_and(|fix| {
                fix.applies(required) && self.settings.rule_mode(message.rule) == RuleMode::Fix
            });
            if !keep {
                message.fix = None;
            }
        }
    }
}

/// Lint `source` with a linter built from `settings`.
pub fn lint_source(source: &str, settings: &LinterSettings) -> Result<LintResult, LinterError> {
    Ok(Linter::new(settings.clone())?.lint_source(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structural::{MALFORMED_LITERAL, UNBALANCED_DELIMITER};

    fn rules(result: &LintResult) -> Vec<&'static str> {
        result.messages.iter().map(|message| message.rule).collect()
    }

    #[test]
    fn test_empty_source() {
        let result = lint_source("", &LinterSettings::default()).unwrap();
        assert!(result.is_clean());
        assert!(result.edits.is_empty());
    }

    #[test]
    fn test_garbage_input_terminates() {
        let source = "}}]) @[ @{ \"open\n - ( ( [ #import <";
        let result = lint_source(source, &LinterSettings::default()).unwrap();
        assert!(rules(&result).contains(&MALFORMED_LITERAL));
        assert!(rules(&result).contains(&UNBALANCED_DELIMITER));
    }

    #[test]
    fn test_edits_only_with_autofix() {
        let source = "if(x){\n}\n";
        let check = lint_source(source, &LinterSettings::default()).unwrap();
        assert!(check.edits.is_empty());
        assert!(check.fixable().count() > 0);

        let fix = lint_source(source, &LinterSettings::default().with_autofix(true)).unwrap();
        assert!(!fix.edits.is_empty());
    }

    #[test]
    fn test_check_mode_strips_fixes() {
        let mut settings = LinterSettings::default().with_autofix(true);
        settings
            .rule_modes
            .insert("space-before-brace".to_string(), RuleMode::Check);
        let result = lint_source("if (x){\n}\n", &settings).unwrap();
        assert_eq!(rules(&result), vec!["space-before-brace"]);
        assert!(result.messages[0].fix.is_none());
        assert!(result.edits.is_empty());
    }

    #[test]
    fn test_disabled_rule_does_not_run() {
        let mut settings = LinterSettings::default();
        settings
            .rule_modes
            .insert("space-before-brace".to_string(), RuleMode::Disabled);
        let result = lint_source("if (x){\n}\n", &settings).unwrap();
        assert!(result.is_clean());
    }

    #[test]
    fn test_unknown_rule_is_an_error() {
        let settings = LinterSettings::default().only("no-such-rule");
        assert!(matches!(
            Linter::new(settings),
            Err(LinterError::UnknownRule(rule)) if rule == "no-such-rule"
        ));
    }

    #[test]
    fn test_invalid_suppression_pattern_is_an_error() {
        let settings = LinterSettings {
            suppression_off: "(".to_string(),
            ..LinterSettings::default()
        };
        assert!(matches!(
            Linter::new(settings),
            Err(LinterError::InvalidSuppressionPattern(_))
        ));
    }

    #[test]
    fn test_suppressed_rule() {
        let source = "\
// OBJCLINT:OFF:space-before-brace
if (x){
}
// OBJCLINT:ON:space-before-brace
if (y){
}
";
        let result = lint_source(source, &LinterSettings::default()).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].span.start.line.get(), 5);
    }

    #[test]
    fn test_fix_source_runs_until_stable() {
        let linter = Linter::new(LinterSettings::default().with_autofix(true)).unwrap();
        let fixed = linter.fix_source("if(x)\n{\n}\n");
        assert_eq!(fixed.source, "if (x) {\n}\n");
        assert!(fixed.remaining.is_empty());
        assert!(fixed.passes >= 1);
    }

    #[test]
    fn test_fix_source_without_autofix_is_a_no_op() {
        let linter = Linter::new(LinterSettings::default()).unwrap();
        let fixed = linter.fix_source("if(x){\n}\n");
        assert_eq!(fixed.source, "if(x){\n}\n");
        assert_eq!(fixed.applied, 0);
        assert_eq!(fixed.remaining.len(), 2);
    }

    #[test]
    fn test_structural_defects_are_not_disabled_by_enabled_rules() {
        let settings = LinterSettings::default().only("sigil-spacing");
        let result = lint_source("x = \"open", &settings).unwrap();
        assert_eq!(rules(&result), vec![MALFORMED_LITERAL]);
    }
}
