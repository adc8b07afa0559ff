//! Line/column lookup for source text.

use std::fmt;

use objclint_text_size::{TextRange, TextSize};

pub use crate::line_index::{LineIndex, OneIndexed};

mod line_index;

/// A 1-based line and column pair.
///
/// Columns count characters, not bytes, so that tabs and multi-byte
/// characters each occupy one column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub line: OneIndexed,
    pub column: OneIndexed,
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self {
            line: OneIndexed::MIN,
            column: OneIndexed::MIN,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A byte range together with the resolved locations of both ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceSpan {
    pub range: TextRange,
    pub start: SourceLocation,
    pub end: SourceLocation,
}

/// Gives access to the source text of a file together with its line index.
#[derive(Debug, Clone, Copy)]
pub struct SourceCode<'src, 'index> {
    text: &'src str,
    index: &'index LineIndex,
}

impl<'src, 'index> SourceCode<'src, 'index> {
    pub fn new(text: &'src str, index: &'index LineIndex) -> Self {
        Self { text, index }
    }

    /// Computes the one-indexed line and column of `offset`.
    pub fn line_column(&self, offset: TextSize) -> SourceLocation {
        self.index.source_location(offset, self.text)
    }

    /// Resolves both ends of `range`.
    pub fn span(&self, range: TextRange) -> SourceSpan {
        SourceSpan {
            range,
            start: self.line_column(range.start()),
            end: self.line_column(range.end()),
        }
    }

    pub fn line_index(&self, offset: TextSize) -> OneIndexed {
        self.index.line_index(offset)
    }

    pub fn line_start(&self, line: OneIndexed) -> TextSize {
        self.index.line_start(line, self.text)
    }

    pub fn line_end(&self, line: OneIndexed) -> TextSize {
        self.index.line_end(line, self.text)
    }

    /// The range of `line` without its line terminator.
    pub fn line_range(&self, line: OneIndexed) -> TextRange {
        TextRange::new(self.line_start(line), self.line_end(line))
    }

    /// The text of `line` without its line terminator.
    pub fn line_text(&self, line: OneIndexed) -> &'src str {
        &self.text[self.line_range(line)]
    }

    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    pub fn text(&self) -> &'src str {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_resolves_both_ends() {
        let source = "@interface Foo\n- (void)bar;\n@end\n";
        let index = LineIndex::from_source_text(source);
        let code = SourceCode::new(source, &index);

        let start = TextSize::new(15);
        let end = TextSize::new(27);
        let span = code.span(TextRange::new(start, end));

        assert_eq!(span.start.line.get(), 2);
        assert_eq!(span.start.column.get(), 1);
        assert_eq!(span.end.line.get(), 2);
        assert_eq!(span.end.column.get(), 13);
    }

    #[test]
    fn test_line_text_excludes_terminator() {
        let source = "a\r\nbc\nd";
        let index = LineIndex::from_source_text(source);
        let code = SourceCode::new(source, &index);

        assert_eq!(code.line_text(OneIndexed::from_zero_indexed(0)), "a");
        assert_eq!(code.line_text(OneIndexed::from_zero_indexed(1)), "bc");
        assert_eq!(code.line_text(OneIndexed::from_zero_indexed(2)), "d");
        assert_eq!(code.line_count(), 3);
    }
}
