//! Rule registry mapping rule identifiers to rule implementations.

use std::collections::BTreeMap;

use crate::{LinterSettings, Rule};

/// Trait for rules that can be constructed from linter settings.
pub trait FromSettings: Rule + Sized {
    /// The identifier this rule is registered under.
    const RULE_ID: &'static str;

    /// Create a rule instance from settings.
    fn from_settings(settings: &LinterSettings) -> Self;
}

/// A factory function that creates a boxed rule from settings.
type RuleFactory = fn(&LinterSettings) -> Box<dyn Rule>;

/// Registry mapping rule identifiers to rule factories.
///
/// Identifiers iterate in lexicographic order, which is also the order the
/// overlap policy prefers fixes in.
pub struct RuleRegistry {
    factories: BTreeMap<&'static str, RuleFactory>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Create a registry with all built-in rules registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register a rule type that implements `FromSettings`.
    pub fn register<R: FromSettings + 'static>(&mut self) {
        self.factories
            .insert(R::RULE_ID, |settings| Box::new(R::from_settings(settings)));
    }

    /// Register all built-in rules.
    fn register_builtins(&mut self) {
        use crate::rules::{
            BlankLineSeparation, ContainerLiteralBracketSpacing, ControlKeywordSpacing,
            ImportVsInclude, MethodColonSpacing, MultiParameterAlignment,
            NoLinebreakBeforeControlBrace, NoLinebreakBeforeMethodBodyBrace,
            NoSpaceBeforeArgumentColon, NoSpaceInsideParens, PointerAsteriskSpacing,
            PreferDotNotation, SigilSpacing, SpaceBeforeBrace,
        };
        // Whitespace rules
        self.register::<SpaceBeforeBrace>();
        self.register::<ControlKeywordSpacing>();
        self.register::<NoSpaceInsideParens>();
        self.register::<SigilSpacing>();
        self.register::<PointerAsteriskSpacing>();
        self.register::<NoSpaceBeforeArgumentColon>();
        self.register::<MethodColonSpacing>();
        self.register::<BlankLineSeparation>();
        // Block rules
        self.register::<NoLinebreakBeforeControlBrace>();
        self.register::<NoLinebreakBeforeMethodBodyBrace>();
        // Import rules
        self.register::<ImportVsInclude>();
        // Style rules
        self.register::<MultiParameterAlignment>();
        self.register::<ContainerLiteralBracketSpacing>();
        self.register::<PreferDotNotation>();
    }

    /// Create a rule from its identifier.
    /// Returns None if the identifier is not recognized.
    pub fn create_rule(&self, rule_id: &str, settings: &LinterSettings) -> Option<Box<dyn Rule>> {
        self.factories.get(rule_id).map(|factory| factory(settings))
    }

    /// Check if an identifier is registered.
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.factories.contains_key(rule_id)
    }

    /// Get all registered identifiers, in lexicographic order.
    pub fn rule_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
