use std::cmp;
use std::fmt;
use std::ops::{Index, IndexMut, Range};

use crate::TextSize;

/// A half-open range of bytes, `[start, end)`.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "get-size", derive(get_size2::GetSize))]
pub struct TextRange {
    start: TextSize,
    end: TextSize,
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start().raw, self.end().raw)
    }
}

impl TextRange {
    /// Creates a new range.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    #[inline]
    pub const fn new(start: TextSize, end: TextSize) -> TextRange {
        assert!(start.raw <= end.raw);
        TextRange { start, end }
    }

    /// Creates a range starting at `offset` spanning `len` bytes.
    #[inline]
    pub const fn at(offset: TextSize, len: TextSize) -> TextRange {
        TextRange::new(offset, TextSize::new(offset.raw + len.raw))
    }

    /// An empty range at `offset`, as used for insertions.
    #[inline]
    pub const fn empty(offset: TextSize) -> TextRange {
        TextRange {
            start: offset,
            end: offset,
        }
    }

    /// A range covering `[0, end)`.
    #[inline]
    pub const fn up_to(end: TextSize) -> TextRange {
        TextRange {
            start: TextSize::new(0),
            end,
        }
    }

    #[inline]
    pub const fn start(self) -> TextSize {
        self.start
    }

    #[inline]
    pub const fn end(self) -> TextSize {
        self.end
    }

    #[inline]
    pub const fn len(self) -> TextSize {
        TextSize::new(self.end.raw - self.start.raw)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start.raw == self.end.raw
    }

    /// Whether `offset` lies inside the range (the end is exclusive).
    #[inline]
    pub fn contains(self, offset: TextSize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether `offset` lies inside the range or on its end.
    #[inline]
    pub fn contains_inclusive(self, offset: TextSize) -> bool {
        self.start <= offset && offset <= self.end
    }

    #[inline]
    pub fn contains_range(self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The intersection of two ranges, if they share at least an endpoint.
    #[inline]
    pub fn intersect(self, other: TextRange) -> Option<TextRange> {
        let start = cmp::max(self.start, other.start);
        let end = cmp::min(self.end, other.end);
        if end < start {
            return None;
        }
        Some(TextRange::new(start, end))
    }

    /// The smallest range covering both ranges.
    #[inline]
    pub fn cover(self, other: TextRange) -> TextRange {
        let start = cmp::min(self.start, other.start);
        let end = cmp::max(self.end, other.end);
        TextRange::new(start, end)
    }

    /// The smallest range covering this range and `offset`.
    #[inline]
    pub fn cover_offset(self, offset: TextSize) -> TextRange {
        self.cover(TextRange::empty(offset))
    }

    #[must_use]
    #[inline]
    pub fn add_start(self, amount: TextSize) -> TextRange {
        TextRange::new(self.start() + amount, self.end())
    }

    #[must_use]
    #[inline]
    pub fn sub_end(self, amount: TextSize) -> TextRange {
        TextRange::new(self.start(), self.end() - amount)
    }
}

impl PartialOrd for TextRange {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextRange {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.start()
            .cmp(&other.start())
            .then(self.end().cmp(&other.end()))
    }
}

impl Index<TextRange> for str {
    type Output = str;

    #[inline]
    fn index(&self, index: TextRange) -> &str {
        &self[Range::<usize>::from(index)]
    }
}

impl Index<TextRange> for String {
    type Output = str;

    #[inline]
    fn index(&self, index: TextRange) -> &str {
        &self[Range::<usize>::from(index)]
    }
}

impl IndexMut<TextRange> for str {
    #[inline]
    fn index_mut(&mut self, index: TextRange) -> &mut str {
        &mut self[Range::<usize>::from(index)]
    }
}

impl From<TextRange> for Range<usize> {
    #[inline]
    fn from(r: TextRange) -> Self {
        r.start().into()..r.end().into()
    }
}

impl From<Range<TextSize>> for TextRange {
    #[inline]
    fn from(r: Range<TextSize>) -> Self {
        TextRange::new(r.start, r.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = range(2, 5);
        assert!(!r.contains(TextSize::new(1)));
        assert!(r.contains(TextSize::new(2)));
        assert!(r.contains(TextSize::new(4)));
        assert!(!r.contains(TextSize::new(5)));
        assert!(r.contains_inclusive(TextSize::new(5)));
    }

    #[test]
    fn test_intersect_and_cover() {
        assert_eq!(range(0, 4).intersect(range(2, 6)), Some(range(2, 4)));
        assert_eq!(range(0, 2).intersect(range(2, 6)), Some(range(2, 2)));
        assert_eq!(range(0, 1).intersect(range(2, 6)), None);
        assert_eq!(range(0, 1).cover(range(4, 6)), range(0, 6));
    }

    #[test]
    fn test_index_str() {
        let text = "- (void)foo;";
        assert_eq!(&text[range(2, 8)], "(void)");
    }

    #[test]
    fn test_ordering_by_start_then_end() {
        let mut ranges = vec![range(3, 4), range(1, 9), range(1, 2)];
        ranges.sort();
        assert_eq!(ranges, vec![range(1, 2), range(1, 9), range(3, 4)]);
    }
}
