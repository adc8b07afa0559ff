//! Preprocessor directive rules.

pub mod import_vs_include;

pub use import_vs_include::ImportVsInclude;
