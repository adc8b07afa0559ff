//! Lint rules organized by category.

pub mod blocks;
pub mod common;
pub mod imports;
pub mod style;
pub mod whitespace;

// Re-export all rules
pub use blocks::{NoLinebreakBeforeControlBrace, NoLinebreakBeforeMethodBodyBrace};
pub use imports::ImportVsInclude;
pub use style::{ContainerLiteralBracketSpacing, MultiParameterAlignment, PreferDotNotation};
pub use whitespace::*;

#[cfg(test)]
pub(crate) mod test_util;
