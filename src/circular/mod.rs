//! The fixed capacity, evicting ring buffer.

use alloc::vec::Vec;
use core::cmp;

use tracing::{debug, trace};

use crate::cursor::{Cursor, CursorMut};
use crate::error::{or_panic, Error};
use crate::iter::{Iter, IterMut};
use crate::raw::{slots_for, RawRing};
use crate::storage::{Heap, Storage};
use crate::{RangeArgument, DEFAULT_CAPACITY};

mod trait_impls;

/// `CircularBuffer` is a fixed capacity ring buffer.
///
/// The "default" usage of this type as a queue is to use `push_back` to add to
/// the queue, and `pop_front` to remove from the queue. `extend` pushes onto
/// the back in this manner, and iterating over `CircularBuffer` goes front
/// to back.
///
/// The buffer never reallocates on its own. Pushing to a full buffer evicts
/// the element at the opposite end and hands it back to the caller; this is
/// normal operation, not an error.
///
/// # Capacity
///
/// Note that `capacity()` is always `slots - 1`: one slot of the storage is
/// kept free so that a full buffer and an empty one have different offsets.
pub struct CircularBuffer<T, S: Storage<Item = T> = Heap<T>> {
    ring: RawRing<T, S>,
}

impl<T, S: Storage<Item = T>> CircularBuffer<T, S> {
    /// Creates an empty `CircularBuffer` with room for
    /// [`DEFAULT_CAPACITY`](../constant.DEFAULT_CAPACITY.html) elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{CircularBuffer, DEFAULT_CAPACITY};
    ///
    /// let buf: CircularBuffer<u8> = CircularBuffer::new();
    /// assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
    /// assert!(buf.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `CircularBuffer` holding at most `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let buf: CircularBuffer<f32> = CircularBuffer::with_capacity(2);
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.capacity(), 2);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        or_panic(Self::try_with_capacity(capacity))
    }

    /// Fallible version of [`with_capacity`](#method.with_capacity).
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{CircularBuffer, Error};
    ///
    /// let res: Result<CircularBuffer<u8>, _> = CircularBuffer::try_with_capacity(usize::MAX);
    /// assert_eq!(res.err(), Some(Error::CapacityOverflow));
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(CircularBuffer { ring: RawRing::with_capacity(capacity)? })
    }

    /// Creates a full buffer of `capacity` clones of `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let buf: CircularBuffer<_> = CircularBuffer::from_elem(3, "abc");
    /// assert_eq!(buf.len(), 3);
    /// assert!(buf.is_full());
    /// assert!(buf.iter().all(|s| *s == "abc"));
    /// ```
    pub fn from_elem(capacity: usize, element: T) -> Self
        where T: Clone
    {
        let mut buf = Self::with_capacity(capacity);
        for _ in 0..capacity {
            buf.ring.push_back_unchecked(element.clone());
        }
        buf
    }

    /// Returns the number of elements the buffer holds before it starts evicting.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let buf: CircularBuffer<usize> = CircularBuffer::with_capacity(3);
    /// assert_eq!(buf.capacity(), 3);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns the number of elements in the `CircularBuffer`.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns true if the buffer contains no elements
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut v: CircularBuffer<_> = CircularBuffer::with_capacity(3);
    /// assert!(v.is_empty());
    /// v.push_front(1);
    /// assert!(!v.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns true if the next push will evict an element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(1);
    /// assert!(!buf.is_full());
    /// buf.push_back(1);
    /// assert!(buf.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Retrieves an element in the `CircularBuffer` by index.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(3);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// assert_eq!(buf.get(1), Some(&4));
    /// assert_eq!(buf.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.ring.get(index)
    }

    /// Retrieves an element in the `CircularBuffer` mutably by index.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.ring.get_mut(index)
    }

    /// Checked indexed access.
    ///
    /// Fails with `Error::Empty` on an empty buffer and with
    /// `Error::OutOfRange` when `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{CircularBuffer, Error};
    ///
    /// let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(3);
    /// assert_eq!(buf.at(0), Err(Error::Empty));
    /// buf.push_back('a');
    /// assert_eq!(buf.at(0), Ok(&'a'));
    /// assert_eq!(buf.at(1), Err(Error::OutOfRange { index: 1, len: 1 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        Error::check_index(index, self.len())?;
        self.ring.get(index).ok_or(Error::OutOfRange { index, len: self.len() })
    }

    /// Checked mutable indexed access, see [`at`](#method.at).
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len();
        Error::check_index(index, len)?;
        self.ring.get_mut(index).ok_or(Error::OutOfRange { index, len })
    }

    /// Provides a reference to the front element, or `None` if the buffer is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.ring.get(0)
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// buffer is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.ring.get_mut(0)
    }

    /// Provides a reference to the back element, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut d: CircularBuffer<_> = CircularBuffer::with_capacity(2);
    /// assert_eq!(d.back(), None);
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// assert_eq!(d.back(), Some(&2));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        let len = self.len();
        if len == 0 { None } else { self.ring.get(len - 1) }
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// buffer is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let len = self.len();
        if len == 0 { None } else { self.ring.get_mut(len - 1) }
    }

    /// Swaps elements at indices `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if there is no element with either index.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.ring.swap(i, j)
    }

    /// Returns a front-to-back iterator.
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.ring.as_slices())
    }

    /// Returns a front-to-back iterator that returns mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<T> {
        IterMut::new(self.ring.as_mut_slices())
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// `CircularBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(5);
    ///
    /// buf.push_back(0);
    /// buf.push_back(1);
    /// buf.push_back(2);
    ///
    /// assert_eq!(buf.as_slices(), (&[0, 1, 2][..], &[][..]));
    ///
    /// buf.push_front(10);
    /// buf.push_front(9);
    ///
    /// assert_eq!(buf.as_slices(), (&[9, 10][..], &[0, 1, 2][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        self.ring.as_slices()
    }

    /// Returns a pair of mutable slices which contain, in order, the contents
    /// of the `CircularBuffer`.
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        self.ring.as_mut_slices()
    }

    /// Returns `true` if the buffer contains an element equal to the given
    /// value.
    pub fn contains(&self, x: &T) -> bool
        where T: PartialEq<T>
    {
        let (a, b) = self.as_slices();
        a.contains(x) || b.contains(x)
    }

    /// Returns a cursor at the first element.
    #[inline]
    pub fn begin(&self) -> Cursor<Self> {
        Cursor::new(self, 0)
    }

    /// Returns a cursor one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor<Self> {
        Cursor::new(self, self.len())
    }

    /// Returns a cursor at logical `index`.
    #[inline]
    pub fn cursor(&self, index: usize) -> Cursor<Self> {
        Cursor::new(self, index)
    }

    /// Returns a cursor at logical `index` that can edit the buffer.
    #[inline]
    pub fn cursor_mut(&mut self, index: usize) -> CursorMut<Self> {
        CursorMut::new(self, index)
    }

    /// Appends an element to the back of the buffer.
    ///
    /// Returns `None` if the buffer still had room, or `Some(oldest)` if it
    /// was full, where `oldest` is the front element evicted to make room.
    ///
    /// # Examples
    ///
    /// ```text
    /// [_, _, _] <-(+)- 1 => [_, _, 1] -> None
    /// [_, _, 1] <-(+)- 2 => [_, 1, 2] -> None
    /// [_, 1, 2] <-(+)- 3 => [1, 2, 3] -> None
    /// [1, 2, 3] <-(+)- 4 => [2, 3, 4] -> Some(1)
    /// ```
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(2);
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// let evicted = buf.push_back(3);
    ///
    /// assert_eq!(buf.back(), Some(&3));
    /// assert_eq!(evicted, Some(1));
    /// ```
    pub fn push_back(&mut self, element: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(element);
        }
        let evicted = if self.is_full() {
            trace!(capacity = self.capacity(), "evicting front element");
            self.ring.pop_front()
        } else {
            None
        };
        self.ring.push_back_unchecked(element);
        evicted
    }

    /// Prepends an element to the front of the buffer.
    ///
    /// Returns `None` if the buffer still had room, or `Some(newest)` if it
    /// was full, where `newest` is the back element evicted to make room.
    ///
    /// # Examples
    ///
    /// ```text
    /// 1 -(+)-> [_, _, _] => [1, _, _] -> None
    /// 2 -(+)-> [1, _, _] => [2, 1, _] -> None
    /// 3 -(+)-> [2, 1, _] => [3, 2, 1] -> None
    /// 4 -(+)-> [3, 2, 1] => [4, 3, 2] -> Some(1)
    /// ```
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(2);
    /// buf.push_front(1);
    /// buf.push_front(2);
    /// let evicted = buf.push_front(3);
    ///
    /// assert_eq!(buf.front(), Some(&3));
    /// assert_eq!(evicted, Some(1));
    /// ```
    pub fn push_front(&mut self, element: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(element);
        }
        let evicted = if self.is_full() {
            trace!(capacity = self.capacity(), "evicting back element");
            self.ring.pop_back()
        } else {
            None
        };
        self.ring.push_front_unchecked(element);
        evicted
    }

    /// Removes the first element and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{CircularBuffer, Error};
    ///
    /// let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(3);
    /// buf.push_back(1);
    /// buf.push_back(2);
    ///
    /// assert_eq!(buf.pop_front(), Ok(1));
    /// assert_eq!(buf.pop_front(), Ok(2));
    /// assert_eq!(buf.pop_front(), Err(Error::Empty));
    /// ```
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, Error> {
        self.ring.pop_front().ok_or(Error::Empty)
    }

    /// Removes the last element and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{CircularBuffer, Error};
    ///
    /// let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(3);
    /// assert_eq!(buf.pop_back(), Err(Error::Empty));
    /// buf.push_back(1);
    /// buf.push_back(3);
    /// assert_eq!(buf.pop_back(), Ok(3));
    /// ```
    #[inline]
    pub fn pop_back(&mut self) -> Result<T, Error> {
        self.ring.pop_back().ok_or(Error::Empty)
    }

    /// Inserts an element at `index`, shifting every element from `index` on
    /// one position toward the back.
    ///
    /// If the buffer is full, the back element is evicted first and
    /// returned, and `index` is clamped to the remaining length.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```text
    /// [0, _, _] <-(+)- 1 @ 0 => [1, 0, _] -> None
    /// [1, 0, _] <-(+)- 3 @ 1 => [1, 3, 0] -> None
    /// [1, 3, 0] <-(+)- 2 @ 1 => [1, 2, 3] -> Some(0)
    /// ```
    ///
    /// ```
    /// use ringdeque::{CircularBuffer, Error};
    ///
    /// let mut buf: CircularBuffer<_> = CircularBuffer::with_capacity(3);
    /// buf.push_back(10);
    /// buf.push_back(12);
    /// assert_eq!(buf.insert(1, 11), Ok(None));
    /// assert_eq!(buf.insert(0, 9), Ok(Some(12)));
    /// assert_eq!(buf, [9, 10, 11]);
    /// assert_eq!(buf.insert(4, 0), Err(Error::OutOfRange { index: 4, len: 3 }));
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> Result<Option<T>, Error> {
        let len = self.len();
        if index > len {
            return Err(Error::OutOfRange { index, len });
        }
        if self.capacity() == 0 {
            return Ok(Some(element));
        }
        let evicted = if self.is_full() {
            trace!(capacity = self.capacity(), "evicting back element");
            self.ring.pop_back()
        } else {
            None
        };
        let index = cmp::min(index, self.len());
        self.ring.insert_unchecked(index, element);
        Ok(evicted)
    }

    /// Inserts `count` clones of `element` at `index`.
    ///
    /// Follows the eviction rule of [`insert`](#method.insert) for every
    /// inserted element; evicted elements are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<&str> = CircularBuffer::with_capacity(6);
    /// buf.extend(["a", "b", "b", "a"]);
    /// buf.insert_n(1, 2, "v").unwrap();
    /// assert_eq!(buf, ["a", "v", "v", "b", "b", "a"]);
    /// ```
    pub fn insert_n(&mut self, index: usize, count: usize, element: T) -> Result<(), Error>
        where T: Clone
    {
        self.insert_iter(index, (0..count).map(|_| element.clone()))
    }

    /// Inserts the values of `iter`, in order, starting at `index`.
    ///
    /// Follows the eviction rule of [`insert`](#method.insert) for every
    /// inserted element; evicted elements are dropped. Nothing is inserted if
    /// `index > len()`.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<(), Error>
        where I: IntoIterator<Item = T>
    {
        let len = self.len();
        if index > len {
            return Err(Error::OutOfRange { index, len });
        }
        for (i, element) in iter.into_iter().enumerate() {
            let at = cmp::min(index + i, self.len());
            self.insert(at, element)?;
        }
        Ok(())
    }

    /// Inserts clones of the elements in `range` of this buffer at `index`.
    ///
    /// The range is copied before anything moves, so it may overlap the
    /// insertion point.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<&str> = CircularBuffer::with_capacity(8);
    /// buf.extend(["a", "b", "b", "a"]);
    /// buf.insert_range(0, 0..2).unwrap();
    /// assert_eq!(buf, ["a", "b", "a", "b", "b", "a"]);
    /// ```
    pub fn insert_range<R>(&mut self, index: usize, range: R) -> Result<(), Error>
        where T: Clone,
              R: RangeArgument<usize>
    {
        let len = self.len();
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(len);
        if end > len || start > end {
            return Err(Error::OutOfRange { index: end, len });
        }
        let values: Vec<T> = self.iter().skip(start).take(end - start).cloned().collect();
        self.insert_iter(index, values)
    }

    /// Removes and returns the element at `index`, shifting the following
    /// elements one position toward the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::from(["A", "B", "C", "D"]);
    /// assert_eq!(buf.remove(2), Ok("C"));
    /// assert_eq!(buf, ["A", "B", "D"]);
    /// assert!(buf.remove(3).is_err());
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, Error> {
        Error::check_index(index, self.len())?;
        self.ring.remove(index).ok_or(Error::OutOfRange { index, len: self.len() })
    }

    /// Replaces the front of the buffer with clones of `other`'s elements.
    ///
    /// Pops `other.len()` elements from the front (or all of them, if there
    /// are fewer), then pushes `other`'s elements back onto the front in
    /// order. Elements past `other.len()` are kept; if `other` is longer than
    /// the capacity, only its first `capacity()` elements remain.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::from(["I", "walk", "this", "street"]);
    /// buf.assign(&CircularBuffer::from(["1", "2"]));
    /// assert_eq!(buf, ["1", "2", "this", "street"]);
    /// ```
    pub fn assign<S2>(&mut self, other: &CircularBuffer<T, S2>)
        where T: Clone,
              S2: Storage<Item = T>
    {
        self.assign_with(other.iter().cloned())
    }

    /// Replaces the first `n` elements with clones of `element`, see
    /// [`assign`](#method.assign).
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::from([1, 2, 3, 4, 5]);
    /// buf.assign_n(2, 0);
    /// assert_eq!(buf, [0, 0, 3, 4, 5]);
    /// ```
    pub fn assign_n(&mut self, n: usize, element: T)
        where T: Clone
    {
        self.assign_with((0..n).map(|_| element.clone()))
    }

    fn assign_with<I>(&mut self, values: I)
        where I: DoubleEndedIterator<Item = T> + ExactSizeIterator
    {
        let popped = cmp::min(values.len(), self.len());
        for _ in 0..popped {
            self.ring.pop_front();
        }
        for element in values.rev() {
            self.push_front(element);
        }
    }

    /// Reallocates the storage to hold `new_capacity` elements.
    ///
    /// The elements are kept, in order. When shrinking below `len()`, the
    /// oldest (front) elements are evicted. On error the buffer is left as it
    /// was.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::from([1, 2, 3, 4]);
    /// buf.reserve(6).unwrap();
    /// assert_eq!(buf.capacity(), 6);
    /// assert_eq!(buf, [1, 2, 3, 4]);
    ///
    /// buf.reserve(2).unwrap();
    /// assert_eq!(buf, [3, 4]);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), Error> {
        let slots = slots_for(new_capacity)?;
        let storage = S::allocate(slots)?;
        debug!(from = self.capacity(), to = new_capacity, len = self.len(), "reallocating circular buffer");
        while self.len() > new_capacity {
            self.ring.pop_front();
        }
        self.ring.relocate(storage);
        Ok(())
    }

    /// Clears the buffer, removing all values. The storage is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::CircularBuffer;
    ///
    /// let mut v: CircularBuffer<_> = CircularBuffer::with_capacity(3);
    /// v.push_back(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 3);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.ring.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use std::rc::Rc;

    fn strings(buf: &CircularBuffer<String>) -> Vec<&str> {
        buf.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn simple() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(7);
        assert_eq!(tester.capacity(), 7);
        assert_eq!(tester.len(), 0);

        tester.push_back(1);
        tester.push_back(2);
        tester.push_back(3);
        tester.push_back(4);
        assert_eq!(tester.len(), 4);

        assert_eq!(tester.pop_front(), Ok(1));
        assert_eq!(tester.pop_front(), Ok(2));
        assert_eq!(tester.len(), 2);
        assert_eq!(tester.pop_front(), Ok(3));
        assert_eq!(tester.pop_front(), Ok(4));
        assert_eq!(tester.pop_front(), Err(Error::Empty));
    }

    #[test]
    fn simple_reversely() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(7);

        tester.push_front(1);
        tester.push_front(2);
        tester.push_front(3);
        tester.push_front(4);
        assert_eq!(tester.len(), 4);
        assert_eq!(tester.pop_back(), Ok(1));
        assert_eq!(tester.pop_back(), Ok(2));
        assert_eq!(tester.len(), 2);
        assert_eq!(tester.pop_back(), Ok(3));
        assert_eq!(tester.pop_back(), Ok(4));
        assert_eq!(tester.pop_back(), Err(Error::Empty));
    }

    #[test]
    fn overflow_evicts_opposite_end() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(2);
        assert_eq!(tester.push_back(1), None);
        assert_eq!(tester.push_back(2), None);
        assert_eq!(tester.push_back(3), Some(1));
        assert_eq!(tester.len(), 2);
        assert_eq!(tester.push_front(0), Some(3));
        assert_eq!(tester, [0, 2]);
    }

    #[test]
    fn zero_capacity() {
        let mut tester: CircularBuffer<i32> = CircularBuffer::with_capacity(0);
        assert_eq!(tester.push_back(1), Some(1));
        assert_eq!(tester.push_front(2), Some(2));
        assert_eq!(tester.insert(0, 3), Ok(Some(3)));
        assert!(tester.is_empty());
        assert_eq!(tester.pop_back(), Err(Error::Empty));
    }

    #[test]
    fn index() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(3);
        tester.push_back(1);
        tester.push_back(2);
        tester.push_back(3);
        assert_eq!(tester[0], 1);
        // pop_front 1 <- [2, 3]
        assert_eq!(tester.pop_front(), Ok(1));
        assert_eq!(tester[0], 2);
        assert_eq!(tester.len(), 2);
        // push_front 0 -> [0, 2, 3]
        tester.push_front(0);
        assert_eq!(tester[0], 0);
        // [0, 2] -> 3 pop_back
        assert_eq!(tester.pop_back(), Ok(3));
        assert_eq!(tester[1], 2);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_out_of_bounds() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(3);
        tester.push_back(1);
        let _ = tester[1];
    }

    #[test]
    fn at_reports_out_of_range() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(3);
        assert_eq!(tester.at(0), Err(Error::Empty));
        assert_eq!(tester.at_mut(0), Err(Error::Empty));
        tester.push_back(5);
        *tester.at_mut(0).unwrap() += 1;
        assert_eq!(tester.at(0), Ok(&6));
        assert_eq!(tester.at(1), Err(Error::OutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn front_back() {
        let mut tester: CircularBuffer<String> = CircularBuffer::new();
        assert_eq!(tester.front(), None);
        assert_eq!(tester.back(), None);
        tester.push_back("BEG".to_string());
        tester.push_back("END".to_string());
        assert_eq!(tester.front().map(|s| s.as_str()), Some("BEG"));
        assert_eq!(tester.back().map(|s| s.as_str()), Some("END"));
        tester.front_mut().unwrap().push('!');
        tester.back_mut().unwrap().push('?');
        assert_eq!(strings(&tester), vec!["BEG!", "END?"]);
    }

    #[test]
    fn insert_wrapped() {
        for shift in 0..6 {
            for index in 0..=3 {
                let mut tester: CircularBuffer<i32> = CircularBuffer::with_capacity(5);
                for _ in 0..shift {
                    tester.push_back(0);
                    tester.pop_front().unwrap();
                }
                tester.extend([1, 2, 3]);
                assert_eq!(tester.insert(index, 9), Ok(None));
                let mut expected = vec![1, 2, 3];
                expected.insert(index, 9);
                assert_eq!(tester, expected, "shift={} index={}", shift, index);
            }
        }
    }

    #[test]
    fn insert_into_full_evicts_back() {
        let mut tester = CircularBuffer::from([1, 2, 3]);
        assert_eq!(tester.insert(3, 4), Ok(Some(3)));
        assert_eq!(tester, [1, 2, 4]);
        assert_eq!(tester.insert(0, 0), Ok(Some(4)));
        assert_eq!(tester, [0, 1, 2]);
    }

    #[test]
    fn insert_iter_full() {
        let mut tester = CircularBuffer::from([1, 2, 3]);
        tester.insert_iter(3, [7, 8]).unwrap();
        assert_eq!(tester, [1, 2, 8]);
        assert_eq!(tester.insert_iter(4, [0]), Err(Error::OutOfRange { index: 4, len: 3 }));
        assert_eq!(tester, [1, 2, 8]);
    }

    #[test]
    fn insert_range_checks_bounds() {
        let mut tester: CircularBuffer<i32> = CircularBuffer::with_capacity(8);
        tester.extend([1, 2, 3]);
        assert_eq!(tester.insert_range(0, 2..4), Err(Error::OutOfRange { index: 4, len: 3 }));
        tester.insert_range(3, ..).unwrap();
        assert_eq!(tester, [1, 2, 3, 1, 2, 3]);
        tester.insert_range(1, 4..).unwrap();
        assert_eq!(tester, [1, 2, 3, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn remove_wrapped() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(4);
        tester.extend(0..6);
        assert_eq!(tester, [2, 3, 4, 5]);
        assert_eq!(tester.remove(1), Ok(3));
        assert_eq!(tester, [2, 4, 5]);
        assert_eq!(tester.remove(2), Ok(5));
        assert_eq!(tester.remove(0), Ok(2));
        assert_eq!(tester, [4]);
        assert_eq!(tester.remove(1), Err(Error::OutOfRange { index: 1, len: 1 }));
        assert_eq!(tester.remove(0), Ok(4));
        assert_eq!(tester.remove(0), Err(Error::Empty));
    }

    #[test]
    fn assign_front() {
        let mut tester = CircularBuffer::from(["I", "Walk", "this", "empty", "street"]);
        tester.assign(&CircularBuffer::from(["1", "2", "3"]));
        assert_eq!(tester, ["1", "2", "3", "empty", "street"]);
        tester.assign_n(4, "x");
        assert_eq!(tester, ["x", "x", "x", "x", "street"]);
    }

    #[test]
    fn assign_longer_than_contents() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(3);
        tester.push_back(9);
        tester.assign_n(2, 1);
        assert_eq!(tester, [1, 1]);
        tester.assign(&CircularBuffer::from([5, 6, 7, 8]));
        assert_eq!(tester, [5, 6, 7]);
    }

    #[test]
    fn reserve_keeps_contents() {
        let mut tester = CircularBuffer::from(["I", "Walk", "this", "empty", "street", "on", "the"]);
        tester.reserve(12).unwrap();
        assert_eq!(tester.len(), 7);
        assert_eq!(tester.capacity(), 12);
        assert_eq!(tester[6], "the");
        assert_eq!(tester.reserve(usize::MAX), Err(Error::CapacityOverflow));
        assert_eq!(tester.capacity(), 12);
    }

    #[test]
    fn failed_allocation_keeps_buffer() {
        let mut tester: CircularBuffer<u64> = CircularBuffer::with_capacity(3);
        tester.extend([0, 1, 2, 3, 4]);
        let huge = usize::MAX / 4;
        assert_eq!(tester.reserve(huge), Err(Error::AllocFailed { slots: huge + 1 }));
        assert_eq!(tester.capacity(), 3);
        assert_eq!(tester.as_slices(), (&[2, 3][..], &[4][..]));
    }

    #[test]
    fn reserve_from_wrapped_state() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(3);
        tester.extend(0..5);
        assert_eq!(tester.as_slices(), (&[2, 3][..], &[4][..]));
        tester.reserve(4).unwrap();
        assert_eq!(tester.as_slices(), (&[2, 3, 4][..], &[][..]));
        tester.push_back(5);
        tester.push_back(6);
        assert_eq!(tester, [3, 4, 5, 6]);
    }

    #[test]
    fn drops_every_element_once() {
        let marker = Rc::new(());
        {
            let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(3);
            for _ in 0..5 {
                tester.push_back(marker.clone());
            }
            assert_eq!(Rc::strong_count(&marker), 4);
            tester.remove(1).unwrap();
            tester.insert(0, marker.clone()).unwrap();
            tester.reserve(1).unwrap();
            assert_eq!(Rc::strong_count(&marker), 2);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn contains_and_clear() {
        let mut tester: CircularBuffer<_> = CircularBuffer::with_capacity(3);
        tester.extend(0..4);
        assert!(tester.contains(&3));
        assert!(!tester.contains(&0));
        tester.clear();
        assert!(tester.is_empty());
        assert!(!tester.contains(&3));
        tester.push_back(1);
        assert_eq!(tester, [1]);
    }
}
