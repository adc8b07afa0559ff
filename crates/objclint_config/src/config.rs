//! Parser for objclint.toml configuration files.
//!
//! ```toml
//! indent-width = 4
//! autofix = false
//! enabled-rules = ["space-before-brace", "sigil-spacing"]
//!
//! [fix]
//! unsafe-fixes = false
//!
//! [fix.rules]
//! multi-parameter-alignment = "check"
//! prefer-dot-notation = "disabled"
//!
//! [imports]
//! frameworks = ["Foundation", "UIKit"]
//!
//! [suppression]
//! off = 'OBJCLINT:OFF:([\w-]+)'
//! on = 'OBJCLINT:ON:([\w-]+)'
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_INDENT_WIDTH: usize = 4;
pub const DEFAULT_SUPPRESSION_OFF: &str = r"OBJCLINT:OFF:([\w-]+)";
pub const DEFAULT_SUPPRESSION_ON: &str = r"OBJCLINT:ON:([\w-]+)";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid value for `{key}`: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// How a rule should handle violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleMode {
    /// Report and auto-fix violations.
    #[default]
    Fix,
    /// Only report violations.
    Check,
    /// Skip the rule entirely.
    Disabled,
}

impl<'de> Deserialize<'de> for RuleMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "fix" => Ok(RuleMode::Fix),
            "check" => Ok(RuleMode::Check),
            "disabled" | "disable" | "off" => Ok(RuleMode::Disabled),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid rule mode: {s}. Expected fix, check, or disabled"
            ))),
        }
    }
}

/// Fix-related configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FixConfig {
    /// Whether to apply unsafe fixes without `--unsafe`.
    #[serde(default)]
    pub unsafe_fixes: bool,

    /// Per-rule mode overrides.
    #[serde(default)]
    pub rules: HashMap<String, RuleMode>,
}

/// Header classification for `import-vs-include`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ImportsConfig {
    /// Angle-bracket path prefixes that name Objective-C frameworks.
    #[serde(default)]
    pub frameworks: Vec<String>,
}

/// Comment patterns that switch a rule off and back on. The first capture
/// group of each pattern is the rule identifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuppressionConfig {
    #[serde(default = "default_off")]
    pub off: String,
    #[serde(default = "default_on")]
    pub on: String,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            off: default_off(),
            on: default_on(),
        }
    }
}

fn default_off() -> String {
    DEFAULT_SUPPRESSION_OFF.to_string()
}

fn default_on() -> String {
    DEFAULT_SUPPRESSION_ON.to_string()
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

/// Root objclint.toml configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ObjclintConfig {
    /// Columns per indentation level.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Whether fixes are emitted without asking for them explicitly.
    #[serde(default)]
    pub autofix: bool,

    /// Rules to run. `None` runs every rule.
    #[serde(default)]
    pub enabled_rules: Option<Vec<String>>,

    #[serde(default)]
    pub fix: FixConfig,

    #[serde(default)]
    pub imports: ImportsConfig,

    #[serde(default)]
    pub suppression: SuppressionConfig,
}

impl Default for ObjclintConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            autofix: false,
            enabled_rules: None,
            fix: FixConfig::default(),
            imports: ImportsConfig::default(),
            suppression: SuppressionConfig::default(),
        }
    }
}

impl ObjclintConfig {
    /// Parse an objclint.toml file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse objclint.toml content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.indent_width == 0 {
            return Err(ConfigError::InvalidValue {
                key: "indent-width",
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(rules) = &self.enabled_rules
            && let Some(empty) = rules.iter().find(|rule| rule.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                key: "enabled-rules",
                message: format!("empty rule identifier {empty:?}"),
            });
        }
        Ok(())
    }

    /// The configured mode of a rule, `Disabled` when `enabled-rules` is set
    /// and doesn't name it.
    pub fn rule_mode(&self, rule_name: &str) -> RuleMode {
        if let Some(enabled) = &self.enabled_rules
            && !enabled.iter().any(|rule| rule == rule_name)
        {
            return RuleMode::Disabled;
        }
        self.fix
            .rules
            .get(rule_name)
            .copied()
            .unwrap_or_default()
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rule_mode(rule_name) != RuleMode::Disabled
    }

    /// Check if a rule's fixes may be applied.
    pub fn should_fix(&self, rule_name: &str) -> bool {
        self.rule_mode(rule_name) == RuleMode::Fix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = ObjclintConfig::parse("").unwrap();
        assert_eq!(config.indent_width, 4);
        assert!(!config.autofix);
        assert!(config.enabled_rules.is_none());
        assert!(!config.fix.unsafe_fixes);
        assert!(config.fix.rules.is_empty());
        assert!(config.imports.frameworks.is_empty());
        assert_eq!(config.suppression.off, DEFAULT_SUPPRESSION_OFF);
        assert_eq!(config.suppression.on, DEFAULT_SUPPRESSION_ON);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
indent-width = 2
autofix = true

[fix]
unsafe-fixes = true

[fix.rules]
space-before-brace = "fix"
multi-parameter-alignment = "check"
prefer-dot-notation = "disabled"

[imports]
frameworks = ["Foundation", "MyKit"]

[suppression]
off = 'lint:off ([\w-]+)'
"#;

        let config = ObjclintConfig::parse(toml).unwrap();

        assert_eq!(config.indent_width, 2);
        assert!(config.autofix);
        assert!(config.fix.unsafe_fixes);
        assert_eq!(config.rule_mode("space-before-brace"), RuleMode::Fix);
        assert_eq!(config.rule_mode("multi-parameter-alignment"), RuleMode::Check);
        assert_eq!(config.rule_mode("prefer-dot-notation"), RuleMode::Disabled);
        assert_eq!(config.rule_mode("sigil-spacing"), RuleMode::Fix); // Default

        assert!(!config.is_rule_enabled("prefer-dot-notation"));
        assert!(config.should_fix("space-before-brace"));
        assert!(!config.should_fix("multi-parameter-alignment"));

        assert_eq!(config.imports.frameworks, vec!["Foundation", "MyKit"]);
        assert_eq!(config.suppression.off, r"lint:off ([\w-]+)");
        assert_eq!(config.suppression.on, DEFAULT_SUPPRESSION_ON);
    }

    #[test]
    fn test_enabled_rules_restrict_the_set() {
        let toml = r#"
enabled-rules = ["sigil-spacing"]

[fix.rules]
space-before-brace = "check"
"#;
        let config = ObjclintConfig::parse(toml).unwrap();
        assert!(config.is_rule_enabled("sigil-spacing"));
        assert!(!config.is_rule_enabled("space-before-brace"));
    }

    #[test]
    fn test_rule_mode_case_insensitive() {
        let toml = r#"
[fix.rules]
rule-1 = "FIX"
rule-2 = "CHECK"
rule-3 = "DISABLED"
rule-4 = "off"
"#;
        let config = ObjclintConfig::parse(toml).unwrap();
        assert_eq!(config.rule_mode("rule-1"), RuleMode::Fix);
        assert_eq!(config.rule_mode("rule-2"), RuleMode::Check);
        assert_eq!(config.rule_mode("rule-3"), RuleMode::Disabled);
        assert_eq!(config.rule_mode("rule-4"), RuleMode::Disabled);
    }

    #[test]
    fn test_invalid_rule_mode() {
        let toml = r#"
[fix.rules]
sigil-spacing = "sometimes"
"#;
        let err = ObjclintConfig::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().contains("Invalid rule mode: sometimes"));
    }

    #[test]
    fn test_zero_indent_width_is_rejected() {
        let err = ObjclintConfig::parse("indent-width = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "indent-width",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(ObjclintConfig::parse("indent = 4").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("objclint.toml");
        std::fs::write(&path, "autofix = true\n").unwrap();

        let config = ObjclintConfig::from_file(&path).unwrap();
        assert!(config.autofix);

        let missing = ObjclintConfig::from_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
