use objclint_text_size::{Ranged, TextRange};

/// A parenthesized group, `close` is `None` when the group is never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParenGroup {
    pub open: usize,
    pub close: Option<usize>,
}

/// An inclusive span of token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub first: usize,
    pub last: usize,
}

/// The block a method declaration appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationContext {
    Interface,
    Protocol,
    Implementation,
    Unknown,
}

impl From<InterfaceKind> for DeclarationContext {
    fn from(kind: InterfaceKind) -> Self {
        match kind {
            InterfaceKind::Interface => Self::Interface,
            InterfaceKind::Protocol => Self::Protocol,
            InterfaceKind::Implementation => Self::Implementation,
        }
    }
}

/// One `keyword:(Type)name` segment of a method selector.
///
/// `keyword` is `None` for an anonymous segment such as the second part of
/// `- (void)a:(int)x :(int)y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterGroup {
    pub keyword: Option<usize>,
    pub colon: usize,
    pub param_type: Option<ParenGroup>,
    pub name: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodTerminator {
    Semicolon(usize),
    Body(usize),
}

impl MethodTerminator {
    pub fn token(self) -> usize {
        match self {
            Self::Semicolon(index) | Self::Body(index) => index,
        }
    }

    pub const fn is_body(self) -> bool {
        matches!(self, Self::Body(_))
    }
}

/// `- (ReturnType)keyword:(Type)name keyword:(Type)name;` or with a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub range: TextRange,
    /// The `-` or `+`.
    pub sigil: usize,
    pub return_type: ParenGroup,
    /// The selector of a method without parameters.
    pub selector: Option<usize>,
    pub parameters: Vec<ParameterGroup>,
    /// Length in characters of the first selector keyword.
    pub first_keyword_len: usize,
    /// `None` when the declaration is truncated.
    pub terminator: Option<MethodTerminator>,
    pub context: DeclarationContext,
}

impl MethodDeclaration {
    /// Whether the selector spans more than one line.
    pub fn is_multi_line(&self, tokens: &objclint_objc_lexer::Tokens) -> bool {
        let (Some(first), Some(last)) = (self.parameters.first(), self.parameters.last()) else {
            return false;
        };
        tokens[first.colon].line() != tokens[last.colon].line()
    }
}

/// One `keyword:` part of a message selector, or the unary selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorPart {
    pub keyword: Option<usize>,
    pub colon: Option<usize>,
}

/// `[receiver keyword:argument ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInvocation {
    pub range: TextRange,
    pub open: usize,
    pub close: Option<usize>,
    pub receiver: TokenSpan,
    pub parts: Vec<SelectorPart>,
}

impl MethodInvocation {
    /// The selector keyword of a unary message.
    pub fn unary_selector(&self) -> Option<usize> {
        match self.parts.as_slice() {
            [
                SelectorPart {
                    keyword: Some(keyword),
                    colon: None,
                },
            ] => Some(*keyword),
            _ => None,
        }
    }
}

/// `@property (attributes) Type *name;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    pub range: TextRange,
    pub keyword: usize,
    pub attributes: Option<ParenGroup>,
    /// First token of the declared type.
    pub type_start: Option<usize>,
    pub name: Option<usize>,
    pub semicolon: Option<usize>,
}

/// A variable declaration with pointer declarators, such as a local, an
/// instance variable or a file-scope constant. Each declarator spans from
/// the start of its type (or the token after the separating comma) to the
/// declared name. Initializers are not part of the range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub range: TextRange,
    pub declarators: Vec<TokenSpan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Array,
    Dictionary,
}

/// One element of a container literal. For dictionaries the element is a
/// `key : value` pair and `key_separator` is its colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralElement {
    pub first: usize,
    pub last: usize,
    pub key_separator: Option<usize>,
    pub comma: Option<usize>,
}

/// `@[ ... ]` or `@{ ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLiteral {
    pub range: TextRange,
    pub kind: LiteralKind,
    pub open: usize,
    pub close: Option<usize>,
    pub elements: Vec<LiteralElement>,
}

impl ContainerLiteral {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// `if (...) {`, `while (...) {`, `for (...) {` or `switch (...) {`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlHeader {
    pub range: TextRange,
    pub keyword: usize,
    pub condition: ParenGroup,
    /// The body's opening brace, when the body is a block.
    pub brace: Option<usize>,
    pub brace_on_same_line: bool,
    /// A comment sits between the condition and the brace.
    pub has_comment_before_brace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveStyle {
    Import,
    Include,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDelimiter {
    Quoted,
    Angle,
}

/// `#import "Path.h"` or `#include <path.h>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    pub range: TextRange,
    pub directive: usize,
    pub style: DirectiveStyle,
    pub delimiter: PathDelimiter,
    pub path: String,
    pub path_range: TextRange,
}

/// A `{ ... }` block of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BraceBlock {
    pub range: TextRange,
    pub open: usize,
    pub close: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    Interface,
    Protocol,
    Implementation,
}

/// `@interface`, `@protocol` or `@implementation` through `@end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceBlock {
    pub range: TextRange,
    pub kind: InterfaceKind,
    pub keyword: usize,
    pub end: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    MethodDeclaration,
    MethodInvocation,
    PropertyDeclaration,
    VariableDeclaration,
    ContainerLiteral,
    ControlHeader,
    ImportDirective,
    BraceBlock,
    InterfaceBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, is_macro::Is)]
pub enum RecognizedUnit {
    MethodDeclaration(MethodDeclaration),
    MethodInvocation(MethodInvocation),
    PropertyDeclaration(PropertyDeclaration),
    VariableDeclaration(VariableDeclaration),
    ContainerLiteral(ContainerLiteral),
    ControlHeader(ControlHeader),
    ImportDirective(ImportDirective),
    BraceBlock(BraceBlock),
    InterfaceBlock(InterfaceBlock),
}

impl RecognizedUnit {
    pub const fn kind(&self) -> UnitKind {
        match self {
            Self::MethodDeclaration(_) => UnitKind::MethodDeclaration,
            Self::MethodInvocation(_) => UnitKind::MethodInvocation,
            Self::PropertyDeclaration(_) => UnitKind::PropertyDeclaration,
            Self::VariableDeclaration(_) => UnitKind::VariableDeclaration,
            Self::ContainerLiteral(_) => UnitKind::ContainerLiteral,
            Self::ControlHeader(_) => UnitKind::ControlHeader,
            Self::ImportDirective(_) => UnitKind::ImportDirective,
            Self::BraceBlock(_) => UnitKind::BraceBlock,
            Self::InterfaceBlock(_) => UnitKind::InterfaceBlock,
        }
    }
}

impl Ranged for RecognizedUnit {
    fn range(&self) -> TextRange {
        match self {
            Self::MethodDeclaration(unit) => unit.range,
            Self::MethodInvocation(unit) => unit.range,
            Self::PropertyDeclaration(unit) => unit.range,
            Self::VariableDeclaration(unit) => unit.range,
            Self::ContainerLiteral(unit) => unit.range,
            Self::ControlHeader(unit) => unit.range,
            Self::ImportDirective(unit) => unit.range,
            Self::BraceBlock(unit) => unit.range,
            Self::InterfaceBlock(unit) => unit.range,
        }
    }
}
