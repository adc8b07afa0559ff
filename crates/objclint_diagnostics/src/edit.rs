use std::cmp::Ordering;

use get_size2::GetSize;
use objclint_text_size::{Ranged, TextRange, TextSize};

/// A text edit to be applied to a source file. Inserts, deletes, or replaces
/// content at a given location.
#[derive(Clone, Debug, PartialEq, Eq, Hash, GetSize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edit {
    /// The start location of the edit.
    range: TextRange,
    /// The replacement content to insert between the start and end locations.
    content: Option<Box<str>>,
}

impl Edit {
    /// Creates an edit that deletes the content in the `start` to `end` range.
    #[inline]
    pub const fn deletion(start: TextSize, end: TextSize) -> Self {
        Self::range_deletion(TextRange::new(start, end))
    }

    /// Creates an edit that deletes the content in `range`.
    pub const fn range_deletion(range: TextRange) -> Self {
        Self {
            content: None,
            range,
        }
    }

    /// Creates an edit that replaces the content in `start` to `end` with `content`.
    #[inline]
    pub fn replacement(content: String, start: TextSize, end: TextSize) -> Self {
        Self::range_replacement(content, TextRange::new(start, end))
    }

    /// Creates an edit that replaces the content in `range` with `content`.
    pub fn range_replacement(content: String, range: TextRange) -> Self {
        debug_assert!(!content.is_empty(), "Prefer `Edit::range_deletion`");

        Self {
            content: Some(Box::from(content)),
            range,
        }
    }

    /// Creates an edit that inserts `content` at the [`TextSize`] `at`.
    pub fn insertion(content: String, at: TextSize) -> Self {
        debug_assert!(!content.is_empty(), "Insert content is empty");

        Self {
            content: Some(Box::from(content)),
            range: TextRange::new(at, at),
        }
    }

    /// Returns the new content for an insertion or replacement.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }

    pub fn is_deletion(&self) -> bool {
        self.content.is_none()
    }

    pub fn is_replacement(&self) -> bool {
        self.content.is_some() && !self.range.is_empty()
    }

    /// Whether this edit and `other` cannot both be applied in one pass.
    ///
    /// Ranges conflict when they share any byte, or when both start at the
    /// same offset, since the order of two edits at one point is ambiguous.
    pub fn conflicts_with(&self, other: &Edit) -> bool {
        if self.start() == other.start() {
            return true;
        }
        self.start() < other.end() && other.start() < self.end()
    }
}

impl Ranged for Edit {
    fn range(&self) -> TextRange {
        self.range
    }
}

impl Ord for Edit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start()
            .cmp(&other.start())
            .then_with(|| self.end().cmp(&other.end()))
            .then_with(|| self.content.cmp(&other.content))
    }
}

impl PartialOrd for Edit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset: u32) -> TextSize {
        TextSize::new(offset)
    }

    #[test]
    fn test_edit_kinds() {
        assert!(Edit::insertion(" ".to_string(), at(2)).is_insertion());
        assert!(Edit::deletion(at(2), at(4)).is_deletion());
        assert!(Edit::replacement(" ".to_string(), at(2), at(4)).is_replacement());
    }

    #[test]
    fn test_adjacent_edits_do_not_conflict() {
        let first = Edit::deletion(at(2), at(4));
        let second = Edit::replacement(" ".to_string(), at(4), at(6));
        assert!(!first.conflicts_with(&second));
        assert!(!second.conflicts_with(&first));
    }

    #[test]
    fn test_insertion_at_end_of_deletion_does_not_conflict() {
        let deletion = Edit::deletion(at(2), at(4));
        let insertion = Edit::insertion(" ".to_string(), at(4));
        assert!(!deletion.conflicts_with(&insertion));
    }

    #[test]
    fn test_overlapping_and_same_point_edits_conflict() {
        let deletion = Edit::deletion(at(2), at(6));
        assert!(deletion.conflicts_with(&Edit::deletion(at(5), at(8))));
        assert!(deletion.conflicts_with(&Edit::insertion(" ".to_string(), at(3))));

        let first = Edit::insertion(" ".to_string(), at(2));
        let second = Edit::insertion("\n".to_string(), at(2));
        assert!(first.conflicts_with(&second));
    }
}
