//! Strongly-typed index newtypes.
//!
//! These keep chunk numbers apart from point offsets, which are both plain
//! `usize` values in the scheduler.

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// First index (0).
            pub const ZERO: Self = Self(0);

            /// Increment index by one.
            #[inline]
            pub fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }
    };
}

define_index!(
    /// Index of a chunk within a [`ChunkPlan`](crate::scheduler::ChunkPlan).
    ///
    /// # Example
    ///
    /// ```
    /// use fuka_export::types::ChunkIndex;
    ///
    /// let chunk = ChunkIndex::new(3);
    /// assert_eq!(chunk.get(), 3);
    /// assert_eq!(chunk.to_string(), "chunk#3");
    /// ```
    ChunkIndex,
    "chunk#"
);
