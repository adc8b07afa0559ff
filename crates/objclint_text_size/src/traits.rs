use crate::{TextRange, TextSize};

/// Primitives with a textual length that can be passed to [`TextSize::of`].
pub trait TextLen: Copy {
    fn text_len(self) -> TextSize;
}

impl TextLen for &'_ str {
    #[inline]
    fn text_len(self) -> TextSize {
        TextSize::try_from(self.len()).unwrap_or(TextSize::new(u32::MAX))
    }
}

impl TextLen for &'_ String {
    #[inline]
    fn text_len(self) -> TextSize {
        self.as_str().text_len()
    }
}

impl TextLen for char {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn text_len(self) -> TextSize {
        TextSize::new(self.len_utf8() as u32)
    }
}

/// A value that has a range in the source text.
pub trait Ranged {
    fn range(&self) -> TextRange;

    fn start(&self) -> TextSize {
        self.range().start()
    }

    fn end(&self) -> TextSize {
        self.range().end()
    }
}

impl Ranged for TextRange {
    fn range(&self) -> TextRange {
        *self
    }
}

impl<T> Ranged for &T
where
    T: Ranged,
{
    fn range(&self) -> TextRange {
        T::range(self)
    }
}
