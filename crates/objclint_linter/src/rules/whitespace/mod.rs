//! Whitespace-related rules.

pub mod blank_line_separation;
pub mod control_keyword_spacing;
pub mod method_colon_spacing;
pub mod no_space_before_argument_colon;
pub mod no_space_inside_parens;
pub mod pointer_asterisk_spacing;
pub mod sigil_spacing;
pub mod space_before_brace;

pub use blank_line_separation::BlankLineSeparation;
pub use control_keyword_spacing::ControlKeywordSpacing;
pub use method_colon_spacing::MethodColonSpacing;
pub use no_space_before_argument_colon::NoSpaceBeforeArgumentColon;
pub use no_space_inside_parens::NoSpaceInsideParens;
pub use pointer_asterisk_spacing::PointerAsteriskSpacing;
pub use sigil_spacing::SigilSpacing;
pub use space_before_brace::SpaceBeforeBrace;
