//! Layout and idiom rules that look at whole constructs.

pub mod container_literal_bracket_spacing;
pub mod multi_parameter_alignment;
pub mod prefer_dot_notation;

pub use container_literal_bracket_spacing::ContainerLiteralBracketSpacing;
pub use multi_parameter_alignment::MultiParameterAlignment;
pub use prefer_dot_notation::PreferDotNotation;
