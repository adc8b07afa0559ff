//! Diagnostic types for reporting violations.

use std::fmt;

use objclint_text_size::{Ranged, TextRange};

use crate::Fix;

/// Indicates whether a fix is available for a violation.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq)]
pub enum FixAvailability {
    /// A fix is always available.
    Always,
    /// A fix is sometimes available.
    Sometimes,
    /// A fix is never available.
    #[default]
    None,
}

/// How serious a diagnostic is.
///
/// Every style rule is pass/fail, so there is a single level.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    #[default]
    Violation,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Violation => f.write_str("violation"),
        }
    }
}

/// A trait for violations that can be reported as diagnostics.
pub trait Violation: fmt::Debug + Clone + Send + Sync {
    /// The availability of a fix for this violation.
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::None;

    /// Returns the message describing the violation.
    fn message(&self) -> String;
}

/// The kind of diagnostic (violation name and message).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticKind {
    /// The violation name (e.g., "MissingSpaceBeforeBrace").
    pub name: String,
    /// The message body.
    pub body: String,
}

/// A diagnostic representing a violation found in source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The kind of diagnostic.
    pub kind: DiagnosticKind,
    /// The range in the source where the violation occurs.
    pub range: TextRange,
    /// The optional fix for the violation.
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Create a new diagnostic from a violation.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new<V: Violation>(violation: V, range: TextRange) -> Self {
        Self {
            kind: DiagnosticKind {
                name: std::any::type_name::<V>()
                    .split("::")
                    .last()
                    .unwrap_or("Unknown")
                    .to_string(),
                body: violation.message(),
            },
            range,
            fix: None,
        }
    }

    /// Add a fix to this diagnostic.
    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Add a fix to this diagnostic when one could be computed.
    #[must_use]
    pub fn with_optional_fix(mut self, fix: Option<Fix>) -> Self {
        self.fix = fix;
        self
    }

    /// Set the fix for this diagnostic.
    pub fn set_fix(&mut self, fix: Fix) {
        self.fix = Some(fix);
    }

    /// Returns true if this diagnostic has a fix.
    pub fn fixable(&self) -> bool {
        self.fix.is_some()
    }
}

impl Ranged for Diagnostic {
    fn range(&self) -> TextRange {
        self.range
    }
}
