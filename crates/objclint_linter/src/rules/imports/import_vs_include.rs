//! ImportVsInclude rule implementation.
//!
//! Objective-C headers are brought in with `#import`, C and C++ headers with
//! `#include`. The rule only advises; switching directives can change which
//! declarations a translation unit sees, so no fix is offered.

use lazy_static::lazy_static;
use regex::Regex;

use objclint_diagnostics::{Diagnostic, Violation};
use objclint_objc_units::{DirectiveStyle, ImportDirective, PathDelimiter, RecognizedUnit, UnitKind};

use crate::{CheckContext, FromSettings, LinterSettings, Rule};

lazy_static! {
    /// Header extensions used only by C++.
    static ref CXX_HEADER: Regex = Regex::new(r"\.(hpp|hh|hxx|inl)$").unwrap();
    /// `<Framework/Header.h>`: a capitalized framework directory.
    static ref FRAMEWORK_PATH: Regex = Regex::new(r"^[A-Z][A-Za-z0-9_]*/").unwrap();
}

#[derive(Debug, Clone)]
pub struct WrongDirective {
    expected: DirectiveStyle,
    path: String,
}

impl Violation for WrongDirective {
    fn message(&self) -> String {
        match self.expected {
            DirectiveStyle::Import => {
                format!("use `#import` for Objective-C header {}", self.path)
            }
            DirectiveStyle::Include => format!("use `#include` for C/C++ header {}", self.path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportVsInclude {
    frameworks: Vec<String>,
}

impl FromSettings for ImportVsInclude {
    const RULE_ID: &'static str = "import-vs-include";

    fn from_settings(settings: &LinterSettings) -> Self {
        Self {
            frameworks: settings.frameworks.clone(),
        }
    }
}

impl ImportVsInclude {
    fn expected_style(&self, directive: &ImportDirective) -> DirectiveStyle {
        match directive.delimiter {
            PathDelimiter::Quoted if CXX_HEADER.is_match(&directive.path) => {
                DirectiveStyle::Include
            }
            PathDelimiter::Quoted => DirectiveStyle::Import,
            PathDelimiter::Angle if self.is_framework(&directive.path) => DirectiveStyle::Import,
            PathDelimiter::Angle => DirectiveStyle::Include,
        }
    }

    fn is_framework(&self, path: &str) -> bool {
        let Some((framework, _)) = path.split_once('/') else {
            return false;
        };
        if CXX_HEADER.is_match(path) {
            return false;
        }
        self.frameworks.iter().any(|known| known == framework) || FRAMEWORK_PATH.is_match(path)
    }
}

impl Rule for ImportVsInclude {
    fn name(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "`#import` for Objective-C headers, `#include` for C and C++ headers"
    }

    fn relevant_kinds(&self) -> &'static [UnitKind] {
        &[UnitKind::ImportDirective]
    }

    fn check(&self, _ctx: &CheckContext, unit: &RecognizedUnit) -> Vec<Diagnostic> {
        let Some(directive) = unit.as_import_directive() else {
            return vec![];
        };
        let expected = self.expected_style(directive);
        if expected == directive.style {
            return vec![];
        }

        let path = match directive.delimiter {
            PathDelimiter::Quoted => format!("\"{}\"", directive.path),
            PathDelimiter::Angle => format!("<{}>", directive.path),
        };
        tracing::trace!(path = %path, ?expected, "directive style mismatch");
        vec![Diagnostic::new(WrongDirective { expected, path }, directive.range)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_util::{bodies, check, check_with};

    #[test]
    fn test_quoted_objc_header_needs_import() {
        let diagnostics = check::<ImportVsInclude>("#include \"Spring.h\"\n");
        assert_eq!(
            bodies(&diagnostics),
            vec!["use `#import` for Objective-C header \"Spring.h\""]
        );
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn test_system_c_header_needs_include() {
        let diagnostics = check::<ImportVsInclude>("#import <stdio.h>\n");
        assert_eq!(
            bodies(&diagnostics),
            vec!["use `#include` for C/C++ header <stdio.h>"]
        );
    }

    #[test]
    fn test_cxx_header_needs_include() {
        assert_eq!(check::<ImportVsInclude>("#import \"Engine.hpp\"\n").len(), 1);
        assert!(check::<ImportVsInclude>("#include \"Engine.hpp\"\n").is_empty());
    }

    #[test]
    fn test_frameworks() {
        let source = "#import <Foundation/Foundation.h>\n#import <objc/runtime.h>\n#include <sys/types.h>\n";
        assert!(check::<ImportVsInclude>(source).is_empty());
    }

    #[test]
    fn test_configured_framework() {
        let mut settings = LinterSettings::default();
        settings.frameworks.push("vendor".to_string());
        let rule = ImportVsInclude::from_settings(&settings);
        assert!(check_with(&rule, "#import <vendor/kit.h>\n", &settings).is_empty());
        assert_eq!(check::<ImportVsInclude>("#import <vendor/kit.h>\n").len(), 1);
    }

    #[test]
    fn test_diagnostic_covers_directive() {
        let source = "#include \"A.h\"\n";
        let diagnostics = check::<ImportVsInclude>(source);
        assert_eq!(&source[diagnostics[0].range], "#include \"A.h\"");
    }
}
