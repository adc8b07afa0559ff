//! Suppression support for objclint.
//!
//! Rules are switched off and back on with comments:
//! - `// OBJCLINT:OFF:rule-id` / `// OBJCLINT:ON:rule-id`
//! - `/* OBJCLINT:OFF:rule-id */` block comments
//!
//! An off comment without a matching on comment suppresses the rule to the
//! end of the file. A pattern without a capture group suppresses all rules.

use std::collections::HashMap;

use objclint_objc_lexer::Tokens;
use objclint_text_size::{Ranged, TextSize};
use regex::Regex;

/// Key for regions that suppress every rule.
const ALL_RULES: &str = "*";

/// A suppression region where a specific rule is disabled.
#[derive(Debug, Clone)]
pub struct SuppressionRegion {
    /// The rule being suppressed (or "*" for all rules).
    pub rule: String,
    /// Start offset in the source.
    pub start: TextSize,
    /// End offset in the source (None means until end of file).
    pub end: Option<TextSize>,
}

impl SuppressionRegion {
    fn contains(&self, pos: TextSize) -> bool {
        pos >= self.start && self.end.is_none_or(|end| pos < end)
    }
}

/// The comment patterns that open and close a suppression region.
#[derive(Debug, Clone)]
pub struct SuppressionFilter {
    off_pattern: Regex,
    on_pattern: Regex,
}

impl SuppressionFilter {
    pub fn new(off_comment_format: &str, on_comment_format: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            off_pattern: Regex::new(off_comment_format)?,
            on_pattern: Regex::new(on_comment_format)?,
        })
    }

    /// The rule named by the first capture group, or all rules.
    fn rule(pattern: &Regex, comment: &str) -> Option<String> {
        let captures = pattern.captures(comment)?;
        Some(
            captures
                .get(1)
                .map_or_else(|| ALL_RULES.to_string(), |m| m.as_str().to_string()),
        )
    }
}

/// Manages suppressions for a source file.
#[derive(Debug, Default)]
pub struct SuppressionContext {
    /// Suppression regions indexed by rule name.
    /// Key "*" matches all rules.
    regions: HashMap<String, Vec<SuppressionRegion>>,
}

impl SuppressionContext {
    /// Create a new empty suppression context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect suppressions from the comment tokens of a file.
    pub fn from_tokens(tokens: &Tokens, filter: &SuppressionFilter) -> Self {
        let mut ctx = Self::new();
        // Open suppressions: rule -> start offset
        let mut open_suppressions: HashMap<String, TextSize> = HashMap::new();

        for token in tokens.iter().filter(|token| token.is_comment()) {
            let comment = token.text();

            if let Some(rule) = SuppressionFilter::rule(&filter.off_pattern, comment) {
                open_suppressions.entry(rule).or_insert(token.start());
            }

            if let Some(rule) = SuppressionFilter::rule(&filter.on_pattern, comment)
                && let Some(start) = open_suppressions.remove(&rule)
            {
                ctx.add_region(SuppressionRegion {
                    rule,
                    start,
                    end: Some(token.start()),
                });
            }
        }

        // Remaining open suppressions run to the end of the file.
        for (rule, start) in open_suppressions {
            ctx.add_region(SuppressionRegion {
                rule,
                start,
                end: None,
            });
        }

        ctx
    }

    /// Add a suppression region.
    fn add_region(&mut self, region: SuppressionRegion) {
        self.regions
            .entry(region.rule.clone())
            .or_default()
            .push(region);
    }

    /// Check if a diagnostic at the given position for the given rule is suppressed.
    pub fn is_suppressed(&self, rule_name: &str, pos: TextSize) -> bool {
        [rule_name, ALL_RULES].iter().any(|key| {
            self.regions
                .get(*key)
                .is_some_and(|regions| regions.iter().any(|region| region.contains(pos)))
        })
    }

    /// Check if there are any suppressions.
    pub fn has_suppressions(&self) -> bool {
        !self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use objclint_config::{DEFAULT_SUPPRESSION_OFF, DEFAULT_SUPPRESSION_ON};

    use super::*;

    fn default_filter() -> SuppressionFilter {
        SuppressionFilter::new(DEFAULT_SUPPRESSION_OFF, DEFAULT_SUPPRESSION_ON).unwrap()
    }

    fn offset_of(source: &str, needle: &str) -> TextSize {
        TextSize::try_from(source.find(needle).unwrap()).unwrap()
    }

    #[test]
    fn test_line_comment_region() {
        let source = "\
alpha
// OBJCLINT:OFF:sigil-spacing
bravo
// OBJCLINT:ON:sigil-spacing
charlie
";
        let tokens = Tokens::new(source);
        let ctx = SuppressionContext::from_tokens(&tokens, &default_filter());

        assert!(ctx.has_suppressions());
        assert!(!ctx.is_suppressed("sigil-spacing", offset_of(source, "alpha")));
        assert!(ctx.is_suppressed("sigil-spacing", offset_of(source, "bravo")));
        assert!(!ctx.is_suppressed("sigil-spacing", offset_of(source, "charlie")));
        assert!(!ctx.is_suppressed("space-before-brace", offset_of(source, "bravo")));
    }

    #[test]
    fn test_block_comment_runs_to_end_of_file() {
        let source = "alpha /* OBJCLINT:OFF:space-before-brace */ bravo\ncharlie\n";
        let tokens = Tokens::new(source);
        let ctx = SuppressionContext::from_tokens(&tokens, &default_filter());

        assert!(!ctx.is_suppressed("space-before-brace", offset_of(source, "alpha")));
        assert!(ctx.is_suppressed("space-before-brace", offset_of(source, "charlie")));
    }

    #[test]
    fn test_directive_in_string_is_ignored() {
        let source = "x = @\"// OBJCLINT:OFF:sigil-spacing\";\ny\n";
        let tokens = Tokens::new(source);
        let ctx = SuppressionContext::from_tokens(&tokens, &default_filter());
        assert!(!ctx.has_suppressions());
    }

    #[test]
    fn test_pattern_without_group_suppresses_all_rules() {
        let filter = SuppressionFilter::new("lint-off", "lint-on").unwrap();
        let source = "// lint-off\nx\n// lint-on\ny\n";
        let tokens = Tokens::new(source);
        let ctx = SuppressionContext::from_tokens(&tokens, &filter);

        assert!(ctx.is_suppressed("anything", offset_of(source, "x")));
        assert!(!ctx.is_suppressed("anything", offset_of(source, "y")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(SuppressionFilter::new("(", "ok").is_err());
    }
}
