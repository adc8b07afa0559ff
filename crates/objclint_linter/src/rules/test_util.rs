//! Helpers for rule unit tests.

use objclint_diagnostics::{Diagnostic, Edit};
use objclint_objc_lexer::Tokens;
use objclint_objc_units::recognize;

use crate::{CheckContext, FromSettings, LinterSettings, Rule, apply_edits};

pub(crate) fn check_with<R: Rule>(
    rule: &R,
    source: &str,
    settings: &LinterSettings,
) -> Vec<Diagnostic> {
    let tokens = Tokens::new(source);
    let recognition = recognize(&tokens);
    let ctx = CheckContext::new(&tokens, &recognition, settings);
    recognition
        .units
        .iter()
        .filter(|unit| rule.relevant_kinds().contains(&unit.kind()))
        .flat_map(|unit| rule.check(&ctx, unit))
        .collect()
}

pub(crate) fn check<R: FromSettings>(source: &str) -> Vec<Diagnostic> {
    let settings = LinterSettings::default();
    check_with(&R::from_settings(&settings), source, &settings)
}

/// Apply every fix the rule emits for `source`.
pub(crate) fn fix<R: FromSettings>(source: &str) -> String {
    let mut edits: Vec<Edit> = check::<R>(source)
        .into_iter()
        .filter_map(|diagnostic| diagnostic.fix)
        .flat_map(|fix| fix.edits().to_vec())
        .collect();
    edits.sort();
    apply_edits(source, &edits)
}

pub(crate) fn bodies(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .map(|diagnostic| diagnostic.kind.body.as_str())
        .collect()
}
