//! Messages for input the lexer or recognizer had to recover from.

use objclint_diagnostics::{Diagnostic, Violation};
use objclint_objc_lexer::{LexicalErrorKind, Tokens};
use objclint_objc_units::{Recognition, StructuralDefect};

pub const MALFORMED_LITERAL: &str = "malformed-literal";
pub const UNBALANCED_DELIMITER: &str = "unbalanced-delimiter";

/// Violation: a literal or comment runs to the end of the file.
#[derive(Debug, Clone)]
pub(crate) struct MalformedLiteral {
    kind: LexicalErrorKind,
}

impl Violation for MalformedLiteral {
    fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Violation: a delimiter or block is never closed or never opened.
#[derive(Debug, Clone)]
pub(crate) struct UnbalancedDelimiter {
    defect: StructuralDefect,
}

impl Violation for UnbalancedDelimiter {
    fn message(&self) -> String {
        self.defect.to_string()
    }
}

/// Diagnostics for every structural defect, paired with their identifier.
pub(crate) fn structural_diagnostics(
    tokens: &Tokens,
    recognition: &Recognition,
) -> Vec<(&'static str, Diagnostic)> {
    let literals = tokens.errors().map(|error| {
        (
            MALFORMED_LITERAL,
            Diagnostic::new(MalformedLiteral { kind: error.kind }, error.range),
        )
    });
    let delimiters = recognition.defects.iter().map(|defect| {
        (
            UNBALANCED_DELIMITER,
            Diagnostic::new(
                UnbalancedDelimiter {
                    defect: defect.clone(),
                },
                defect.range,
            ),
        )
    });
    literals.chain(delimiters).collect()
}
