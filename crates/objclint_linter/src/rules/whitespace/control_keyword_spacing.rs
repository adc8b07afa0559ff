//! ControlKeywordSpacing rule implementation.
//!
//! Checks that `if`, `while`, `for` and `switch` are followed by exactly one
//! space before their condition.

use objclint_diagnostics::{Diagnostic, FixAvailability, Violation};
use objclint_objc_units::{RecognizedUnit, UnitKind};
use objclint_text_size::Ranged;

use crate::rules::common::{Gap, classify_gap, replace_gap};
use crate::{CheckContext, FromSettings, LinterSettings, Rule};

#[derive(Debug, Clone)]
pub struct KeywordNotFollowedBySpace {
    keyword: String,
}

impl Violation for KeywordNotFollowedBySpace {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        format!("expected a single space between `{}` and `(`", self.keyword)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControlKeywordSpacing;

impl FromSettings for ControlKeywordSpacing {
    const RULE_ID: &'static str = "control-keyword-spacing";

    fn from_settings(_settings: &LinterSettings) -> Self {
        Self
    }
}

impl Rule for ControlKeywordSpacing {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "Exactly one space separates a control keyword from its condition"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::ControlHeader]
    }

    fn check(&self, ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(header) = unit.as_control_header() else {
            return vec![];
        };
        let keyword = header.keyword;
        let open = header.condition.open;

        let gap = classify_gap(ctx, keyword, open);
        if gap == Gap::SingleSpace {
            return vec![];
        }

        let token = ctx.token(keyword);
        let fix = gap.is_plain().then(|| replace_gap(ctx, keyword, open, " "));
        vec![
            Diagnostic::new(
                KeywordNotFollowedBySpace {
                    keyword: token.text().to_string(),
                },
                token.range(),
            )
            .with_optional_fix(fix),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_util::{bodies, check, fix};

    #[test]
    fn test_missing_space() {
        let diagnostics = check::<ControlKeywordSpacing>("if(x) {\n}\n");
        assert_eq!(
            bodies(&diagnostics),
            vec!["expected a single space between `if` and `(`"]
        );
        assert_eq!(fix::<ControlKeywordSpacing>("if(x) {\n}\n"), "if (x) {\n}\n");
    }

    #[test]
    fn test_extra_space() {
        assert_eq!(
            fix::<ControlKeywordSpacing>("switch   (x) {\n}\n"),
            "switch (x) {\n}\n"
        );
    }

    #[test]
    fn test_do_while_tail() {
        let source = "do {\n} while(x);\n";
        assert_eq!(check::<ControlKeywordSpacing>(source).len(), 1);
        assert_eq!(fix::<ControlKeywordSpacing>(source), "do {\n} while (x);\n");
    }

    #[test]
    fn test_conforming() {
        assert!(check::<ControlKeywordSpacing>("for (int i = 0; i < n; i++) {\n}\n").is_empty());
    }
}
