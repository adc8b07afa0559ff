//! Newtypes for working with byte offsets into source text.
//!
//! Offsets are `u32`: source files larger than 4GiB are not supported.

mod range;
mod size;
mod traits;

#[cfg(feature = "serde")]
mod serde_impls;

pub use crate::range::TextRange;
pub use crate::size::TextSize;
pub use crate::traits::{Ranged, TextLen};

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_eq_size!(TextSize, u32);
    static_assertions::assert_eq_size!(TextRange, u64);
    static_assertions::assert_impl_all!(TextRange: Send, Sync, Copy, Ord);
}
