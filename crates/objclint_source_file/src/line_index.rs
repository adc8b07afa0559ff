use std::fmt;
use std::num::NonZeroUsize;

use objclint_text_size::TextSize;

use crate::SourceLocation;

/// Byte offsets of the start of every line in a source text.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "get-size", derive(get_size2::GetSize))]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    /// Builds the index in a single scan of `text`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_source_text(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = Vec::with_capacity(text.len() / 40 + 1);
        line_starts.push(TextSize::new(0));

        for position in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[position] == b'\r' && bytes.get(position + 1) == Some(&b'\n') {
                continue;
            }
            line_starts.push(TextSize::new((position + 1) as u32));
        }

        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[TextSize] {
        &self.line_starts
    }

    /// The line containing `offset`.
    pub fn line_index(&self, offset: TextSize) -> OneIndexed {
        match self.line_starts.binary_search(&offset) {
            Ok(row) => OneIndexed::from_zero_indexed(row),
            Err(next_row) => OneIndexed::from_zero_indexed(next_row.saturating_sub(1)),
        }
    }

    /// The offset of the first byte of `line`, or the text length when the
    /// line is past the end.
    pub fn line_start(&self, line: OneIndexed, text: &str) -> TextSize {
        self.line_starts
            .get(line.to_zero_indexed())
            .copied()
            .unwrap_or_else(|| TextSize::of(text))
    }

    /// The offset just before the terminator of `line`.
    pub fn line_end(&self, line: OneIndexed, text: &str) -> TextSize {
        let Some(next_start) = self.line_starts.get(line.to_zero_indexed() + 1) else {
            return TextSize::of(text);
        };

        let next = next_start.to_usize();
        let terminator = if text.as_bytes().get(next.wrapping_sub(2)) == Some(&b'\r')
            && text.as_bytes().get(next - 1) == Some(&b'\n')
        {
            2
        } else {
            1
        };
        *next_start - TextSize::new(terminator)
    }

    /// Resolves `offset` into a line and a character column.
    pub fn source_location(&self, offset: TextSize, text: &str) -> SourceLocation {
        let line = self.line_index(offset);
        let line_start = self.line_start(line, text);
        let column = text
            .get(line_start.to_usize()..offset.to_usize())
            .map_or(0, |prefix| prefix.chars().count());

        SourceLocation {
            line,
            column: OneIndexed::from_zero_indexed(column),
        }
    }
}

/// A one-based index, used for lines and columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneIndexed(NonZeroUsize);

impl OneIndexed {
    pub const MIN: Self = Self(NonZeroUsize::MIN);

    pub const fn new(value: usize) -> Option<Self> {
        match NonZeroUsize::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    pub const fn from_zero_indexed(value: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(value))
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }

    pub const fn to_zero_indexed(self) -> usize {
        self.0.get() - 1
    }

    #[must_use]
    pub const fn saturating_add(self, rhs: usize) -> Self {
        Self(self.0.saturating_add(rhs))
    }

    #[must_use]
    pub const fn saturating_sub(self, rhs: usize) -> Self {
        match NonZeroUsize::new(self.0.get().saturating_sub(rhs)) {
            Some(value) => Self(value),
            None => Self::MIN,
        }
    }
}

impl Default for OneIndexed {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for OneIndexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_starts_handle_all_terminators() {
        let index = LineIndex::from_source_text("a\nb\r\nc\rd");
        assert_eq!(
            index.line_starts(),
            &[
                TextSize::new(0),
                TextSize::new(2),
                TextSize::new(5),
                TextSize::new(7)
            ]
        );
    }

    #[test]
    fn test_line_index_lookup() {
        let index = LineIndex::from_source_text("ab\ncd\n");
        assert_eq!(index.line_index(TextSize::new(0)).get(), 1);
        assert_eq!(index.line_index(TextSize::new(2)).get(), 1);
        assert_eq!(index.line_index(TextSize::new(3)).get(), 2);
        assert_eq!(index.line_index(TextSize::new(6)).get(), 3);
    }

    #[test]
    fn test_source_location_counts_characters() {
        let text = "x\n\t→ y";
        let index = LineIndex::from_source_text(text);
        let offset = TextSize::new(text.find('y').unwrap() as u32);
        let location = index.source_location(offset, text);
        assert_eq!(location.line.get(), 2);
        assert_eq!(location.column.get(), 4);
    }

    #[test]
    fn test_line_end_before_crlf() {
        let text = "abc\r\ndef";
        let index = LineIndex::from_source_text(text);
        assert_eq!(index.line_end(OneIndexed::MIN, text), TextSize::new(3));
        assert_eq!(
            index.line_end(OneIndexed::from_zero_indexed(1), text),
            TextSize::new(8)
        );
    }

    #[test]
    fn test_one_indexed_conversions() {
        assert_eq!(OneIndexed::new(0), None);
        assert_eq!(OneIndexed::from_zero_indexed(4).get(), 5);
        assert_eq!(OneIndexed::MIN.saturating_sub(3), OneIndexed::MIN);
    }
}
