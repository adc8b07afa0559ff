use std::fmt;

use objclint_objc_lexer::{TokenKind, Tokens};
use objclint_text_size::{Ranged, TextRange, TextSize};

use crate::delimiters::closer_for;
use crate::unit::{BraceBlock, DeclarationContext, InterfaceKind, RecognizedUnit};
use crate::{
    DelimiterTable, control, declaration, directive, interface, invocation, literal, method,
    property,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectKind {
    /// An opening delimiter that is never closed.
    UnclosedDelimiter,
    /// A closing delimiter with no opener.
    UnmatchedCloser,
    /// An `@interface`, `@protocol` or `@implementation` without `@end`.
    MissingEnd,
}

/// A structural problem that prevents reliable recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralDefect {
    pub kind: DefectKind,
    pub range: TextRange,
    pub delimiter: String,
}

impl fmt::Display for StructuralDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DefectKind::UnclosedDelimiter => write!(f, "`{}` is never closed", self.delimiter),
            DefectKind::UnmatchedCloser => {
                write!(f, "`{}` has no matching opener", self.delimiter)
            }
            DefectKind::MissingEnd => write!(f, "`{}` is missing `@end`", self.delimiter),
        }
    }
}

impl Ranged for StructuralDefect {
    fn range(&self) -> TextRange {
        self.range
    }
}

/// The units recognized in one file, in source order, plus the defects met.
#[derive(Debug, Clone, Default)]
pub struct Recognition {
    pub units: Vec<RecognizedUnit>,
    pub defects: Vec<StructuralDefect>,
    pub delimiters: DelimiterTable,
}

/// Recognize all units in `tokens`.
pub fn recognize(tokens: &Tokens) -> Recognition {
    let delimiters = DelimiterTable::build(tokens);
    let mut recognizer = Recognizer {
        tokens,
        delimiters: &delimiters,
        units: Vec::new(),
        defects: Vec::new(),
        open: Vec::new(),
        container: None,
    };
    recognizer.run();

    let Recognizer {
        units, mut defects, ..
    } = recognizer;

    for &index in delimiters.unclosed() {
        defects.push(defect_at(tokens, index, DefectKind::UnclosedDelimiter));
    }
    for &index in delimiters.unmatched() {
        defects.push(defect_at(tokens, index, DefectKind::UnmatchedCloser));
    }
    defects.sort_by_key(|defect| defect.range.start());

    Recognition {
        units,
        defects,
        delimiters,
    }
}

fn defect_at(tokens: &Tokens, index: usize, kind: DefectKind) -> StructuralDefect {
    StructuralDefect {
        kind,
        range: tokens[index].range(),
        delimiter: tokens[index].text().to_string(),
    }
}

/// The range from token `first` to token `last`, or to the end of input when
/// the unit is truncated.
pub(crate) fn unit_range(tokens: &Tokens, first: usize, last: Option<usize>) -> TextRange {
    let end = last.map_or_else(|| TextSize::of(tokens.source()), |last| tokens[last].end());
    TextRange::new(tokens[first].start(), end)
}

struct Recognizer<'a, 'src> {
    tokens: &'a Tokens<'src>,
    delimiters: &'a DelimiterTable,
    units: Vec<RecognizedUnit>,
    defects: Vec<StructuralDefect>,
    /// Matched openers enclosing the current token.
    open: Vec<usize>,
    container: Option<InterfaceKind>,
}

impl Recognizer<'_, '_> {
    fn run(&mut self) {
        for index in 0..self.tokens.len() {
            self.visit(index);
            self.track_depth(index);
        }
    }

    fn visit(&mut self, index: usize) {
        let tokens = self.tokens;
        let delimiters = self.delimiters;
        let token = &tokens[index];

        let unit = match token.kind() {
            TokenKind::Punctuation => match token.text() {
                "-" | "+" if self.at_declaration_start(index) => {
                    let context = self
                        .container
                        .map_or(DeclarationContext::Unknown, DeclarationContext::from);
                    Some(RecognizedUnit::MethodDeclaration(method::recognize(
                        tokens, delimiters, index, context,
                    )))
                }
                "[" => invocation::recognize(tokens, delimiters, index)
                    .map(RecognizedUnit::MethodInvocation),
                "@[" | "@{" => Some(RecognizedUnit::ContainerLiteral(literal::recognize(
                    tokens, delimiters, index,
                ))),
                "{" => {
                    let close = delimiters.partner(index);
                    Some(RecognizedUnit::BraceBlock(BraceBlock {
                        range: unit_range(tokens, index, close),
                        open: index,
                        close,
                    }))
                }
                _ => None,
            },
            TokenKind::Identifier if matches!(token.text(), "if" | "while" | "for" | "switch") => {
                control::recognize(tokens, delimiters, index).map(RecognizedUnit::ControlHeader)
            }
            TokenKind::Identifier if self.at_statement_start(index) => {
                declaration::recognize(tokens, delimiters, index)
                    .map(RecognizedUnit::VariableDeclaration)
            }
            TokenKind::Directive => {
                directive::recognize(tokens, index).map(RecognizedUnit::ImportDirective)
            }
            TokenKind::AtKeyword => match token.text() {
                "@property" => Some(RecognizedUnit::PropertyDeclaration(property::recognize(
                    tokens, delimiters, index,
                ))),
                "@interface" | "@protocol" | "@implementation" => {
                    let block = interface::recognize(tokens, index);
                    if let Some(block) = &block {
                        self.container = Some(block.kind);
                        if block.end.is_none() {
                            self.defects.push(StructuralDefect {
                                kind: DefectKind::MissingEnd,
                                range: token.range(),
                                delimiter: token.text().to_string(),
                            });
                        }
                    }
                    block.map(RecognizedUnit::InterfaceBlock)
                }
                "@end" => {
                    self.container = None;
                    None
                }
                _ => None,
            },
            _ => None,
        };

        if let Some(unit) = unit {
            self.units.push(unit);
        }
    }

    fn track_depth(&mut self, index: usize) {
        let Some(partner) = self.delimiters.partner(index) else {
            return;
        };
        if partner > index && closer_for(self.tokens[index].text()).is_some() {
            self.open.push(index);
        } else {
            while let Some(open) = self.open.pop() {
                if open == partner {
                    break;
                }
            }
        }
    }

    /// A method declaration starts with `-` or `+` outside any brackets, at
    /// the start of a line or right after another declaration, followed by
    /// the return type.
    fn at_declaration_start(&self, index: usize) -> bool {
        if !self.open.is_empty() {
            return false;
        }
        let next_is_paren = self
            .tokens
            .next_significant(index)
            .is_some_and(|next| self.tokens[next].is_punct("("));
        if !next_is_paren {
            return false;
        }
        if self.tokens.is_first_on_line(index) {
            return true;
        }
        match self.tokens.prev_significant(index) {
            None => true,
            Some(prev) => {
                let prev = &self.tokens[prev];
                prev.is_punct(";") || prev.is_punct("}")
            }
        }
    }

    /// Whether `index` begins a statement in a brace block or at file scope:
    /// it follows `;`, `{` or `}`, starts the input, or starts a line after
    /// an import directive or an `@interface`-style header line.
    fn at_statement_start(&self, index: usize) -> bool {
        let tokens = self.tokens;
        if self
            .open
            .last()
            .is_some_and(|&open| !tokens[open].is_punct("{"))
        {
            return false;
        }
        let Some(prev) = tokens.prev_significant(index) else {
            return true;
        };
        let prev_token = &tokens[prev];
        if prev_token.is_punct(";") || prev_token.is_punct("{") || prev_token.is_punct("}") {
            return true;
        }
        if !self.open.is_empty() || !tokens.is_first_on_line(index) {
            return false;
        }
        (tokens.line_start(prev)..=prev)
            .find(|&i| !tokens[i].is_trivia())
            .is_some_and(|head| {
                matches!(
                    tokens[head].kind(),
                    TokenKind::Directive | TokenKind::AtKeyword
                )
            })
    }
}
