//! Positional cursors over the logical range of a buffer.
//!
//! A cursor is a back-reference to its buffer plus a logical index. The
//! physical slot is computed from the buffer's current offsets every time the
//! cursor is dereferenced, so it can never observe a stale `tail` or a
//! released storage: a [`Cursor`] holds a shared borrow, which rules out any
//! mutation while it is alive, and a [`CursorMut`] performs its mutations
//! through the buffer itself.
//!
//! Cursors move like random access iterators: `+`, `-`, `+=` and `-=` take
//! an `isize` offset, the difference of two cursors is an `isize`, and
//! cursors compare by index. Moving past either end is allowed, dereferencing
//! there yields `None`.
//!
//! ```
//! use ringdeque::CircularBuffer;
//!
//! let buf = CircularBuffer::from([1, 2, 3]);
//! let mut total = 0;
//! let mut it = buf.begin();
//! while it < buf.end() {
//!     total += *it.get().unwrap();
//!     it += 1;
//! }
//! assert_eq!(total, 6);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::Error;
use crate::RingBuffer;

#[inline]
fn step(index: usize, forward: bool, by: usize) -> usize {
    let moved = if forward {
        index.checked_add(by)
    } else {
        index.checked_sub(by)
    };
    match moved {
        Some(index) => index,
        None => panic!("cursor moved out of the addressable range: {} {} {}",
                       index,
                       if forward { '+' } else { '-' },
                       by),
    }
}

#[inline]
fn offset(index: usize, by: isize) -> usize {
    step(index, by >= 0, by.unsigned_abs())
}

/// A read-only cursor, see the [module documentation](index.html).
pub struct Cursor<'a, R: ?Sized + 'a> {
    ring: &'a R,
    index: usize,
}

impl<'a, R: RingBuffer + ?Sized> Cursor<'a, R> {
    #[inline]
    pub(crate) fn new(ring: &'a R, index: usize) -> Self {
        Cursor { ring, index }
    }

    /// Returns the logical index the cursor points at.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the element under the cursor, or `None` outside the logical range.
    #[inline]
    pub fn get(&self) -> Option<&'a R::Item> {
        self.ring.get(self.index)
    }

    /// Checked dereference.
    #[inline]
    pub fn at(&self) -> Result<&'a R::Item, Error> {
        self.ring.at(self.index)
    }

    /// Returns true if the cursor is at or past the end.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index >= self.ring.len()
    }

    /// Moves one position toward the back.
    #[inline]
    pub fn move_next(&mut self) {
        self.index = offset(self.index, 1);
    }

    /// Moves one position toward the front.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at index 0.
    #[inline]
    pub fn move_prev(&mut self) {
        self.index = offset(self.index, -1);
    }

    /// Returns the buffer the cursor belongs to.
    #[inline]
    pub fn ring(&self) -> &'a R {
        self.ring
    }
}

impl<'a, R: ?Sized> Clone for Cursor<'a, R> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, R: ?Sized> Copy for Cursor<'a, R> {}

impl<'a, R: ?Sized> PartialEq for Cursor<'a, R> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<'a, R: ?Sized> Eq for Cursor<'a, R> {}

impl<'a, R: ?Sized> PartialOrd for Cursor<'a, R> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, R: ?Sized> Ord for Cursor<'a, R> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<'a, R: ?Sized> fmt::Debug for Cursor<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cursor").field("index", &self.index).finish()
    }
}

impl<'a, R: ?Sized> AddAssign<isize> for Cursor<'a, R> {
    #[inline]
    fn add_assign(&mut self, by: isize) {
        self.index = offset(self.index, by);
    }
}

impl<'a, R: ?Sized> SubAssign<isize> for Cursor<'a, R> {
    #[inline]
    fn sub_assign(&mut self, by: isize) {
        self.index = step(self.index, by < 0, by.unsigned_abs());
    }
}

impl<'a, R: ?Sized> Add<isize> for Cursor<'a, R> {
    type Output = Self;

    #[inline]
    fn add(mut self, by: isize) -> Self {
        self += by;
        self
    }
}

impl<'a, R: ?Sized> Sub<isize> for Cursor<'a, R> {
    type Output = Self;

    #[inline]
    fn sub(mut self, by: isize) -> Self {
        self -= by;
        self
    }
}

impl<'a, R: ?Sized> Sub for Cursor<'a, R> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Self) -> isize {
        self.index as isize - other.index as isize
    }
}

/// A cursor with exclusive access to its buffer.
///
/// Besides reading and writing the element under it, a `CursorMut` can
/// insert before its position and erase at its position. After either
/// operation it keeps its logical index, so it points at the inserted
/// element or at the one that followed the erased element.
///
/// ```
/// use ringdeque::GrowableBuffer;
///
/// let mut buf: GrowableBuffer<_> = GrowableBuffer::from(["a", "b", "c"]);
/// let mut cursor = buf.cursor_mut(1);
/// assert_eq!(cursor.remove(), Ok("b"));
/// assert_eq!(cursor.get(), Some(&"c"));
/// cursor.insert("x").unwrap();
/// assert_eq!(buf, ["a", "x", "c"]);
/// ```
pub struct CursorMut<'a, R: ?Sized + 'a> {
    ring: &'a mut R,
    index: usize,
}

impl<'a, R: RingBuffer + ?Sized> CursorMut<'a, R> {
    #[inline]
    pub(crate) fn new(ring: &'a mut R, index: usize) -> Self {
        CursorMut { ring, index }
    }

    /// Returns the logical index the cursor points at.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves the cursor to logical `index`.
    #[inline]
    pub fn seek(&mut self, index: usize) {
        self.index = index;
    }

    /// Moves by `by` positions.
    #[inline]
    pub fn advance(&mut self, by: isize) {
        self.index = offset(self.index, by);
    }

    /// Moves one position toward the back.
    #[inline]
    pub fn move_next(&mut self) {
        self.advance(1);
    }

    /// Moves one position toward the front.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at index 0.
    #[inline]
    pub fn move_prev(&mut self) {
        self.advance(-1);
    }

    /// Returns true if the cursor is at or past the end.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index >= self.ring.len()
    }

    /// Returns the element under the cursor.
    #[inline]
    pub fn get(&self) -> Option<&R::Item> {
        self.ring.get(self.index)
    }

    /// Returns the element under the cursor mutably.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut R::Item> {
        self.ring.get_mut(self.index)
    }

    /// Inserts `element` before the cursor position; the cursor then points
    /// at it. Returns the element evicted to make room, if any.
    pub fn insert(&mut self, element: R::Item) -> Result<Option<R::Item>, Error> {
        self.ring.insert(self.index, element)
    }

    /// Erases the element under the cursor.
    pub fn remove(&mut self) -> Result<R::Item, Error> {
        self.ring.remove(self.index)
    }

    /// Reborrows as a read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<R> {
        Cursor::new(&*self.ring, self.index)
    }
}

impl<'a, R: ?Sized> fmt::Debug for CursorMut<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CursorMut").field("index", &self.index).finish()
    }
}
