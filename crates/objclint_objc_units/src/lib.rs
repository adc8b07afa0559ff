//! Recognition of the Objective-C structures that style rules inspect.
//!
//! This is not a parser for the whole language: it reconstructs method
//! declarations and message sends, property and pointer variable
//! declarations, container literals, control-flow headers, import
//! directives, brace blocks and `@interface`/`@protocol`/`@implementation`
//! blocks from the token stream, and nothing else.

mod control;
mod declaration;
mod delimiters;
mod directive;
mod interface;
mod invocation;
mod literal;
mod method;
mod property;
mod recognizer;
mod unit;

pub use declaration::POINTER_QUALIFIERS;
pub use delimiters::DelimiterTable;
pub use recognizer::{DefectKind, Recognition, StructuralDefect, recognize};
pub use unit::{
    BraceBlock, ContainerLiteral, ControlHeader, DeclarationContext, DirectiveStyle,
    ImportDirective, InterfaceBlock, InterfaceKind, LiteralElement, LiteralKind,
    MethodDeclaration, MethodInvocation, MethodTerminator, ParameterGroup, ParenGroup,
    PathDelimiter, PropertyDeclaration, RecognizedUnit, SelectorPart, TokenSpan, UnitKind,
    VariableDeclaration,
};
