//! PreferDotNotation rule implementation.
//!
//! Reading a property declared in the same file uses dot syntax:
//! `self.name` rather than `[self name]`.

use objclint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use objclint_objc_lexer::TokenKind;
use objclint_objc_units::{RecognizedUnit, UnitKind};

use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone)]
pub struct BracketPropertyAccess {
    property: String,
}

impl Violation for BracketPropertyAccess {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Always;

    fn message(&self) -> String {
        format!("use dot notation to access property `{}`", self.property)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreferDotNotation;

impl FromSettings for PreferDotNotation {
    const RULE_ID: &'static str = "prefer-dot-notation";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for PreferDotNotation {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "Declared properties are read with dot syntax"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::MethodInvocation]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(invocation) = unit.as_method_invocation() else {
            return vec![];
        };
        if invocation.close.is_none() || invocation.receiver.first != invocation.receiver.last {
            return vec![];
        }
        let Some(selector) = invocation.unary_selector() else {
            return vec![];
        };

        let receiver = ctx.token(invocation.receiver.first);
        if receiver.kind() != TokenKind::Identifier {
            return vec![];
        }
        let property = ctx.token(selector).text();
        if !ctx.is_property(property) {
            return vec![];
        }

        // The message may resolve to a method of another class, so the
        // rewrite is not guaranteed to preserve behavior.
        let replacement = format!("{}.{property}", receiver.text());
        vec![
            Diagnostic::new(
                BracketPropertyAccess {
                    property: property.to_string(),
                },
                invocation.range,
            )
            .with_fix(Fix::unsafe_edit(Edit::range_replacement(
                replacement,
                invocation.range,
            ))),
        ]
    }
}
