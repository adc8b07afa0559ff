//! Brace placement rules.

pub mod brace_placement;

pub use brace_placement::{NoLinebreakBeforeControlBrace, NoLinebreakBeforeMethodBodyBrace};
