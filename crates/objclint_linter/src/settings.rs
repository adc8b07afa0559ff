//! Options consumed by the linter core.

use std::collections::{BTreeSet, HashMap};

use objclint_config::{
    DEFAULT_INDENT_WIDTH, DEFAULT_SUPPRESSION_OFF, DEFAULT_SUPPRESSION_ON, ObjclintConfig,
    RuleMode,
};

/// Frameworks recognized by `import-vs-include` in addition to any
/// capitalized first path component.
pub const DEFAULT_FRAMEWORKS: &[&str] = &["objc", "dispatch", "os"];

#[derive(Debug, Clone)]
pub struct LinterSettings {
    /// Rules to run. `None` runs every rule.
    pub enabled_rules: Option<BTreeSet<String>>,
    /// Whether the linter returns edits to apply.
    pub autofix: bool,
    pub indent_width: usize,
    /// Whether `Unsafe` fixes may be applied.
    pub unsafe_fixes: bool,
    pub rule_modes: HashMap<String, RuleMode>,
    /// Angle-bracket path prefixes that name Objective-C frameworks.
    pub frameworks: Vec<String>,
    pub suppression_off: String,
    pub suppression_on: String,
}

impl Default for LinterSettings {
    fn default() -> Self {
        Self {
            enabled_rules: None,
            autofix: false,
            indent_width: DEFAULT_INDENT_WIDTH,
            unsafe_fixes: false,
            rule_modes: HashMap::new(),
            frameworks: DEFAULT_FRAMEWORKS.iter().map(ToString::to_string).collect(),
            suppression_off: DEFAULT_SUPPRESSION_OFF.to_string(),
            suppression_on: DEFAULT_SUPPRESSION_ON.to_string(),
        }
    }
}

impl LinterSettings {
    pub fn from_config(config: &ObjclintConfig) -> Self {
        let mut frameworks: Vec<String> =
            DEFAULT_FRAMEWORKS.iter().map(ToString::to_string).collect();
        frameworks.extend(config.imports.frameworks.iter().cloned());

        Self {
            enabled_rules: config
                .enabled_rules
                .as_ref()
                .map(|rules| rules.iter().cloned().collect()),
            autofix: config.autofix,
            indent_width: config.indent_width,
            unsafe_fixes: config.fix.unsafe_fixes,
            rule_modes: config.fix.rules.clone(),
            frameworks,
            suppression_off: config.suppression.off.clone(),
            suppression_on: config.suppression.on.clone(),
        }
    }

    /// Restrict the run to a single rule.
    #[must_use]
    pub fn only(mut self, rule: &str) -> Self {
        self.enabled_rules = Some(BTreeSet::from([rule.to_string()]));
        self
    }

    #[must_use]
    pub fn with_autofix(mut self, autofix: bool) -> Self {
        self.autofix = autofix;
        self
    }

    #[must_use]
    pub fn with_unsafe_fixes(mut self, unsafe_fixes: bool) -> Self {
        self.unsafe_fixes = unsafe_fixes;
        self
    }

    pub fn rule_mode(&self, rule: &str) -> RuleMode {
        if let Some(enabled) = &self.enabled_rules
            && !enabled.contains(rule)
        {
            return RuleMode::Disabled;
        }
        self.rule_modes.get(rule).copied().unwrap_or_default()
    }

    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        self.rule_mode(rule) != RuleMode::Disabled
    }

    /// Every rule identifier named in the settings.
    pub(crate) fn referenced_rules(&self) -> impl Iterator<Item = &str> {
        self.enabled_rules
            .iter()
            .flatten()
            .chain(self.rule_modes.keys())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = LinterSettings::default();
        assert_eq!(settings.indent_width, 4);
        assert!(!settings.autofix);
        assert!(!settings.unsafe_fixes);
        assert!(settings.is_rule_enabled("sigil-spacing"));
    }

    #[test]
    fn test_from_config() {
        let config = ObjclintConfig::parse(
            r#"
indent-width = 2
enabled-rules = ["sigil-spacing", "space-before-brace"]

[fix.rules]
space-before-brace = "check"

[imports]
frameworks = ["MyKit"]
"#,
        )
        .unwrap();
        let settings = LinterSettings::from_config(&config);
        assert_eq!(settings.indent_width, 2);
        assert_eq!(settings.rule_mode("sigil-spacing"), RuleMode::Fix);
        assert_eq!(settings.rule_mode("space-before-brace"), RuleMode::Check);
        assert_eq!(settings.rule_mode("import-vs-include"), RuleMode::Disabled);
        assert!(settings.frameworks.iter().any(|f| f == "MyKit"));
        assert!(settings.frameworks.iter().any(|f| f == "objc"));
    }

    #[test]
    fn test_only() {
        let settings = LinterSettings::default().only("sigil-spacing");
        assert!(settings.is_rule_enabled("sigil-spacing"));
        assert!(!settings.is_rule_enabled("space-before-brace"));
    }
}
