//! Error handling for the satchel collections.
//!
//! Every fallible operation in this crate reports one of the variants below;
//! nullable variants (`poll`, `peek`, `pop_front`, ...) return [`Option`]
//! instead of an error.

use thiserror::Error;

/// Main error type for the satchel collections.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Index outside the valid bound for the requested operation.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The invalid index.
        index: usize,
        /// The valid length at the time of the access.
        len: usize,
    },

    /// A strict head operation (`remove`, `element`) on an empty container.
    #[error("container is empty")]
    EmptyContainer,
}

impl Error {
    /// Create an index-out-of-range error.
    pub const fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

/// Result type alias for convenience.
pub type Result<T> = core::result::Result<T, Error>;

/// Assert that an index is within `[0, len)`.
#[inline]
pub(crate) const fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        Err(Error::index_out_of_range(index, len))
    } else {
        Ok(())
    }
}
