//! Ring buffers with `O(1)` double-ended access.
//!
//! Two containers share the same shape and differ in what happens when they
//! run out of room:
//!
//! - [`CircularBuffer`] has a fixed capacity. Pushing to a full buffer
//!   silently **evicts** the element at the opposite end.
//! - [`GrowableBuffer`] never evicts. When full it **grows** its storage to
//!   `2 * slots + 1` slots and copies the elements over in order.
//!
//! Both have `O(1)` amortized pushes and pops at either end, `O(1)` indexing
//! like a vector, `O(n)` insertion and removal at arbitrary positions, value
//! semantics (`Clone` is a deep copy, `==` compares elements) and positional
//! [cursors](cursor/index.html) that can be moved around like random access
//! iterators.
//!
//! # Feature Flags
//! The **ringdeque** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd; without it the crate is `no_std` and only needs `alloc`
//!
//! # Capacity
//!
//! Storage always has one more slot than `capacity()`, so that an empty
//! buffer (`tail == head`) can be told apart from a full one using the two
//! offsets alone.
//!
//! # Examples
//! ```
//! use ringdeque::CircularBuffer;
//!
//! let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(2);
//! buf.push_back("x");
//! buf.push_back("y");
//! assert_eq!(buf.push_back("z"), Some("x"));
//!
//! assert_eq!(buf, ["y", "z"]);
//! ```
//!
//! ```
//! use ringdeque::GrowableBuffer;
//!
//! let mut buf: GrowableBuffer<_> = GrowableBuffer::with_capacity(2);
//! buf.extend(0..3);
//! assert_eq!(buf.capacity(), 6);
//! assert_eq!(buf, [0, 1, 2]);
//! ```
//!
//! # Cursors
//! ```
//! use ringdeque::CircularBuffer;
//!
//! let buf = CircularBuffer::from(["A", "B", "C", "D"]);
//! let mut cursor = buf.begin() + 2;
//! assert_eq!(cursor.get(), Some(&"C"));
//! cursor -= 1;
//! assert_eq!(cursor.get(), Some(&"B"));
//! assert_eq!(buf.end() - cursor, 3);
//! ```
//!
//! # Sorting
//! ```
//! use ringdeque::{algo, CircularBuffer};
//!
//! let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(3);
//! buf.push_front(1);
//! buf.push_front(4);
//! buf.push_front(5);
//! buf.push_front(3);
//!
//! algo::sort(&mut buf);
//! assert_eq!(buf, [3, 4, 5]);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

pub use odds::IndexRange as RangeArgument;

pub mod algo;
pub mod circular;
pub mod cursor;
pub mod error;
pub mod growable;
pub mod iter;
mod raw;
pub mod storage;

pub use circular::CircularBuffer;
pub use cursor::{Cursor, CursorMut};
pub use error::Error;
pub use growable::GrowableBuffer;
pub use iter::{IntoIter, Iter, IterMut};
pub use storage::{Heap, Storage};

/// Capacity used by `new()` and `Default`.
pub const DEFAULT_CAPACITY: usize = 100;

/// The operations both buffer types have in common.
///
/// Generic code such as the [`algo`](algo/index.html) functions and the
/// cursors is written against this trait. The two implementations differ
/// only in what `push_*` and `insert` do on overflow: `CircularBuffer`
/// evicts and returns the evicted element, `GrowableBuffer` grows and
/// always returns `Ok(None)` unless the allocation fails.
pub trait RingBuffer {
    /// The element type
    type Item;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the number of elements the buffer can hold without evicting
    /// or growing.
    fn capacity(&self) -> usize;

    /// Returns a reference to the element at logical `index`.
    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// Returns a mutable reference to the element at logical `index`.
    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Item>;

    /// Swaps the elements at logical indices `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    fn swap(&mut self, i: usize, j: usize);

    /// Appends an element, returning the element evicted to make room.
    fn push_back(&mut self, element: Self::Item) -> Result<Option<Self::Item>, Error>;

    /// Prepends an element, returning the element evicted to make room.
    fn push_front(&mut self, element: Self::Item) -> Result<Option<Self::Item>, Error>;

    /// Removes the first element.
    fn pop_front(&mut self) -> Result<Self::Item, Error>;

    /// Removes the last element.
    fn pop_back(&mut self) -> Result<Self::Item, Error>;

    /// Inserts an element at logical `index`, returning the element evicted
    /// to make room.
    fn insert(&mut self, index: usize, element: Self::Item)
              -> Result<Option<Self::Item>, Error>;

    /// Removes the element at logical `index`.
    fn remove(&mut self, index: usize) -> Result<Self::Item, Error>;

    /// Returns true if the buffer contains no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checked access: `Error::Empty` on an empty buffer,
    /// `Error::OutOfRange` if `index >= len()`.
    #[inline]
    fn at(&self, index: usize) -> Result<&Self::Item, Error> {
        Error::check_index(index, self.len())?;
        self.get(index).ok_or(Error::OutOfRange { index, len: self.len() })
    }

    /// Returns a cursor at logical `index`.
    #[inline]
    fn cursor(&self, index: usize) -> Cursor<Self> {
        Cursor::new(self, index)
    }

    /// Returns a cursor at the first element.
    #[inline]
    fn begin(&self) -> Cursor<Self> {
        Cursor::new(self, 0)
    }

    /// Returns a cursor one past the last element.
    #[inline]
    fn end(&self) -> Cursor<Self> {
        Cursor::new(self, self.len())
    }

    /// Returns a mutable cursor at logical `index`.
    #[inline]
    fn cursor_mut(&mut self, index: usize) -> CursorMut<Self> {
        CursorMut::new(self, index)
    }
}
