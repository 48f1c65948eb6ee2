//! Error values returned by the fallible buffer operations.

use thiserror::Error;

/// Error value for ring buffer operations.
///
/// `Empty` and `OutOfRange` together form the out-of-range condition, see
/// [`Error::is_out_of_range`]. A failed operation never leaves the buffer
/// half-modified: everything that can fail is checked or allocated before the
/// first element moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// Popping or checked access on an empty buffer.
    #[error("empty buffer")]
    Empty,

    /// A position that is not inside the logical range.
    #[error("index out of range: the len is {len} but the index is {index}")]
    OutOfRange {
        /// The offending position.
        index: usize,
        /// Length of the buffer at the time of the call.
        len: usize,
    },

    /// The storage strategy could not hand out the requested slots.
    #[error("failed to allocate {slots} slots")]
    AllocFailed {
        /// Number of slots requested.
        slots: usize,
    },

    /// The requested slot count does not fit in `usize`.
    #[error("capacity overflow")]
    CapacityOverflow,
}

impl Error {
    /// Returns true for `Empty` and `OutOfRange`.
    ///
    /// ```
    /// use ringdeque::{CircularBuffer, Error};
    ///
    /// let mut buf: CircularBuffer<i32> = CircularBuffer::with_capacity(2);
    /// assert!(buf.pop_front().unwrap_err().is_out_of_range());
    /// assert!(!Error::CapacityOverflow.is_out_of_range());
    /// ```
    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::Empty | Error::OutOfRange { .. })
    }

    #[inline]
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Error> {
        if len == 0 {
            Err(Error::Empty)
        } else if index >= len {
            Err(Error::OutOfRange { index, len })
        } else {
            Ok(())
        }
    }
}

/// Unwraps the result of an allocation for the infallible entry points.
#[inline]
pub(crate) fn or_panic<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}
