use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::TextLen;

/// A byte offset into a source text.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "get-size", derive(get_size2::GetSize))]
pub struct TextSize {
    pub(crate) raw: u32,
}

impl fmt::Debug for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl TextSize {
    pub const fn new(offset: u32) -> Self {
        Self { raw: offset }
    }

    /// The length of `text` in UTF-8 bytes.
    #[inline]
    pub fn of<T: TextLen>(text: T) -> TextSize {
        text.text_len()
    }

    pub const fn to_u32(self) -> u32 {
        self.raw
    }

    pub const fn to_usize(self) -> usize {
        self.raw as usize
    }

    #[inline]
    pub fn checked_add(self, rhs: TextSize) -> Option<TextSize> {
        self.raw.checked_add(rhs.raw).map(TextSize::new)
    }

    #[inline]
    pub fn checked_sub(self, rhs: TextSize) -> Option<TextSize> {
        self.raw.checked_sub(rhs.raw).map(TextSize::new)
    }
}

impl From<u32> for TextSize {
    #[inline]
    fn from(raw: u32) -> Self {
        TextSize::new(raw)
    }
}

impl From<TextSize> for u32 {
    #[inline]
    fn from(value: TextSize) -> Self {
        value.raw
    }
}

impl From<TextSize> for usize {
    #[inline]
    fn from(value: TextSize) -> Self {
        value.raw as usize
    }
}

impl TryFrom<usize> for TextSize {
    type Error = std::num::TryFromIntError;

    #[inline]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Ok(u32::try_from(value)?.into())
    }
}

impl Add for TextSize {
    type Output = TextSize;

    #[inline]
    fn add(self, rhs: TextSize) -> TextSize {
        TextSize::new(self.raw + rhs.raw)
    }
}

impl Sub for TextSize {
    type Output = TextSize;

    #[inline]
    fn sub(self, rhs: TextSize) -> TextSize {
        TextSize::new(self.raw - rhs.raw)
    }
}

impl AddAssign for TextSize {
    #[inline]
    fn add_assign(&mut self, rhs: TextSize) {
        self.raw += rhs.raw;
    }
}

impl SubAssign for TextSize {
    #[inline]
    fn sub_assign(&mut self, rhs: TextSize) {
        self.raw -= rhs.raw;
    }
}

impl<A> std::iter::Sum<A> for TextSize
where
    TextSize: Add<A, Output = TextSize>,
{
    fn sum<I: Iterator<Item = A>>(iter: I) -> TextSize {
        iter.fold(TextSize::default(), Add::add)
    }
}

impl Add<&TextSize> for TextSize {
    type Output = TextSize;

    #[inline]
    fn add(self, rhs: &TextSize) -> TextSize {
        self + *rhs
    }
}
