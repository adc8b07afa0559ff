//! Diagnostic and fix infrastructure for linting.

pub use diagnostic::{Diagnostic, DiagnosticKind, FixAvailability, Severity, Violation};
pub use edit::Edit;
pub use fix::{Applicability, Fix};

mod diagnostic;
mod edit;
mod fix;
