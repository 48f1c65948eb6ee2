//! The growable ring buffer.
//!
//! `GrowableBuffer` never evicts. An insertion into a full buffer first
//! reallocates the storage to `2 * slots + 1` slots and moves the elements,
//! in logical order, to the start of the new block.

use alloc::vec::Vec;
use core::cmp;

use tracing::debug;

use crate::cursor::{Cursor, CursorMut};
use crate::error::{or_panic, Error};
use crate::iter::{Iter, IterMut};
use crate::raw::{slots_for, RawRing};
use crate::storage::{Heap, Storage};
use crate::{RangeArgument, DEFAULT_CAPACITY};

mod trait_impls;

/// A ring buffer that doubles its storage instead of evicting.
///
/// ```
/// use ringdeque::GrowableBuffer;
///
/// let mut buf: GrowableBuffer<_> = GrowableBuffer::from(["a", "b", "b", "a"]);
/// assert_eq!(buf.capacity(), 4);
/// buf.insert_n(0, 3, "v").unwrap();
/// assert_eq!(buf.capacity(), 10);
/// assert_eq!(buf, ["v", "v", "v", "a", "b", "b", "a"]);
/// ```
pub struct GrowableBuffer<T, S: Storage<Item = T> = Heap<T>> {
    ring: RawRing<T, S>,
}

/// Slot count reached by growing `slots` until at least `needed` elements
/// fit, one doubling step at a time.
fn grown_slots(mut slots: usize, needed: usize) -> Result<usize, Error> {
    while slots - 1 < needed {
        slots = slots.checked_mul(2)
            .and_then(|s| s.checked_add(1))
            .ok_or(Error::CapacityOverflow)?;
    }
    Ok(slots)
}

impl<T, S: Storage<Item = T>> GrowableBuffer<T, S> {
    /// Creates an empty buffer with room for
    /// [`DEFAULT_CAPACITY`](../constant.DEFAULT_CAPACITY.html) elements.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer with room for `capacity` elements before the
    /// first reallocation.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be allocated.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        or_panic(Self::try_with_capacity(capacity))
    }

    /// Fallible version of [`with_capacity`](#method.with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(GrowableBuffer { ring: RawRing::with_capacity(capacity)? })
    }

    /// Creates a buffer holding `capacity` clones of `element`.
    ///
    /// ```
    /// use ringdeque::GrowableBuffer;
    ///
    /// let buf: GrowableBuffer<_> = GrowableBuffer::from_elem(2, 0.5);
    /// assert_eq!(buf, [0.5, 0.5]);
    /// assert_eq!(buf.capacity(), 2);
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

    /// Returns the number of elements the buffer holds before it reallocates.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns the number of elements in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns true if the buffer contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns true if the next insertion has to reallocate.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Retrieves an element by index; index 0 is the front.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.ring.get(index)
    }

    /// Retrieves an element mutably by index.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.ring.get_mut(index)
    }

    /// Checked indexed access: `Error::Empty` on an empty buffer,
    /// `Error::OutOfRange` when `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        Error::check_index(index, self.len())?;
        self.ring.get(index).ok_or(Error::OutOfRange { index, len: self.len() })
    }

    /// Checked mutable indexed access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len();
        Error::check_index(index, len)?;
        self.ring.get_mut(index).ok_or(Error::OutOfRange { index, len })
    }

    /// The front element, or `None` if the buffer is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.ring.get(0)
    }

    /// The front element mutably, or `None` if the buffer is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.ring.get_mut(0)
    }

    /// The back element, or `None` if the buffer is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        let len = self.len();
        if len == 0 { None } else { self.ring.get(len - 1) }
    }

    /// The back element mutably, or `None` if the buffer is empty.
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

    /// Returns the contents, in order, as a pair of slices.
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        self.ring.as_slices()
    }

    /// Returns the contents, in order, as a pair of mutable slices.
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        self.ring.as_mut_slices()
    }

    /// Returns `true` if the buffer contains an element equal to `x`.
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

    /// Appends an element to the back, growing the storage if it is full.
    ///
    /// # Panics
    ///
    /// Panics if the grown storage cannot be allocated. See
    /// [`try_push_back`](#method.try_push_back).
    ///
    /// ```
    /// use ringdeque::GrowableBuffer;
    ///
    /// let mut buf: GrowableBuffer<_> = GrowableBuffer::with_capacity(1);
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// assert_eq!(buf.capacity(), 4);
    /// assert_eq!(buf, [1, 2]);
    /// ```
    #[inline]
    pub fn push_back(&mut self, element: T) {
        or_panic(self.try_push_back(element))
    }

    /// Prepends an element to the front, growing the storage if it is full.
    ///
    /// # Panics
    ///
    /// Panics if the grown storage cannot be allocated.
    #[inline]
    pub fn push_front(&mut self, element: T) {
        or_panic(self.try_push_front(element))
    }

    /// Appends an element to the back. On error the buffer is unchanged and
    /// `element` is dropped.
    pub fn try_push_back(&mut self, element: T) -> Result<(), Error> {
        self.grow_for(1)?;
        self.ring.push_back_unchecked(element);
        Ok(())
    }

    /// Prepends an element to the front. On error the buffer is unchanged and
    /// `element` is dropped.
    pub fn try_push_front(&mut self, element: T) -> Result<(), Error> {
        self.grow_for(1)?;
        self.ring.push_front_unchecked(element);
        Ok(())
    }

    /// Removes the first element and returns it, or `Error::Empty`.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, Error> {
        self.ring.pop_front().ok_or(Error::Empty)
    }

    /// Removes the last element and returns it, or `Error::Empty`.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T, Error> {
        self.ring.pop_back().ok_or(Error::Empty)
    }

    /// Inserts an element at `index`, shifting the following elements toward
    /// the back. `index == len()` appends.
    ///
    /// ```
    /// use ringdeque::{Error, GrowableBuffer};
    ///
    /// let mut buf: GrowableBuffer<_> = GrowableBuffer::from(["a", "b", "b", "a"]);
    /// buf.insert(2, "vv").unwrap();
    /// assert_eq!(buf, ["a", "b", "vv", "b", "a"]);
    /// assert_eq!(buf.capacity(), 10);
    /// assert_eq!(buf.insert(9, "x"), Err(Error::OutOfRange { index: 9, len: 5 }));
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> Result<(), Error> {
        self.check_insert_index(index)?;
        self.grow_for(1)?;
        self.ring.insert_unchecked(index, element);
        Ok(())
    }

    /// Inserts `count` clones of `element` at `index`, reallocating at most
    /// once.
    pub fn insert_n(&mut self, index: usize, count: usize, element: T) -> Result<(), Error>
        where T: Clone
    {
        self.check_insert_index(index)?;
        self.grow_for(count)?;
        for i in 0..count {
            self.ring.insert_unchecked(index + i, element.clone());
        }
        Ok(())
    }

    /// Inserts the values of `iter`, in order, starting at `index`,
    /// reallocating at most once.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<(), Error>
        where I: IntoIterator<Item = T>
    {
        self.check_insert_index(index)?;
        let values: Vec<T> = iter.into_iter().collect();
        self.grow_for(values.len())?;
        for (i, element) in values.into_iter().enumerate() {
            self.ring.insert_unchecked(index + i, element);
        }
        Ok(())
    }

    /// Inserts clones of the elements in `range` of this buffer at `index`.
    ///
    /// ```
    /// use ringdeque::GrowableBuffer;
    ///
    /// let mut buf: GrowableBuffer<&str> = GrowableBuffer::with_capacity(3);
    /// buf.extend(["a", "b", "b", "a"]);
    /// buf.insert_range(0, 0..2).unwrap();
    /// assert_eq!(buf, ["a", "b", "a", "b", "b", "a"]);
    /// assert_eq!(buf.capacity(), 8);
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
        self.check_insert_index(index)?;
        let values: Vec<T> = self.iter().skip(start).take(end - start).cloned().collect();
        self.insert_iter(index, values)
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, Error> {
        Error::check_index(index, self.len())?;
        self.ring.remove(index).ok_or(Error::OutOfRange { index, len: self.len() })
    }

    /// Replaces the front of the buffer with clones of `other`'s elements.
    ///
    /// Pops `other.len()` elements from the front (or all of them, if there
    /// are fewer), then pushes `other`'s elements onto the front in order.
    /// Grows first if the result does not fit; on error nothing changes.
    ///
    /// ```
    /// use ringdeque::GrowableBuffer;
    ///
    /// let mut buf: GrowableBuffer<_> = GrowableBuffer::from([1, 2]);
    /// buf.assign(&GrowableBuffer::from([7, 8, 9])).unwrap();
    /// assert_eq!(buf, [7, 8, 9]);
    /// ```
    pub fn assign<S2>(&mut self, other: &GrowableBuffer<T, S2>) -> Result<(), Error>
        where T: Clone,
              S2: Storage<Item = T>
    {
        self.assign_with(other.iter().cloned())
    }

    /// Replaces the first `n` elements with clones of `element`, see
    /// [`assign`](#method.assign).
    pub fn assign_n(&mut self, n: usize, element: T) -> Result<(), Error>
        where T: Clone
    {
        self.assign_with((0..n).map(|_| element.clone()))
    }

    fn assign_with<I>(&mut self, values: I) -> Result<(), Error>
        where I: DoubleEndedIterator<Item = T> + ExactSizeIterator
    {
        let popped = cmp::min(values.len(), self.len());
        self.grow_for(values.len() - popped)?;
        for _ in 0..popped {
            self.ring.pop_front();
        }
        for element in values.rev() {
            self.ring.push_front_unchecked(element);
        }
        Ok(())
    }

    /// Makes room for at least `new_capacity` elements.
    ///
    /// Reallocates to exactly `new_capacity + 1` slots when `new_capacity`
    /// exceeds the current capacity; never shrinks.
    ///
    /// ```
    /// use ringdeque::GrowableBuffer;
    ///
    /// let mut buf: GrowableBuffer<i32> = GrowableBuffer::with_capacity(2);
    /// buf.reserve(12).unwrap();
    /// assert_eq!(buf.capacity(), 12);
    /// buf.reserve(3).unwrap();
    /// assert_eq!(buf.capacity(), 12);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), Error> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.reallocate(slots_for(new_capacity)?)
    }

    /// Clears the buffer, removing all values. The storage is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.ring.clear();
    }

    fn check_insert_index(&self, index: usize) -> Result<(), Error> {
        let len = self.len();
        if index > len {
            Err(Error::OutOfRange { index, len })
        } else {
            Ok(())
        }
    }

    /// Grows until `additional` more elements fit, following the same
    /// doubling sequence one-at-a-time insertion would.
    fn grow_for(&mut self, additional: usize) -> Result<(), Error> {
        let needed = self.len().checked_add(additional).ok_or(Error::CapacityOverflow)?;
        if needed <= self.capacity() {
            return Ok(());
        }
        let slots = grown_slots(self.ring.slots(), needed)?;
        self.reallocate(slots)
    }

    fn reallocate(&mut self, slots: usize) -> Result<(), Error> {
        let storage = S::allocate(slots)?;
        debug!(from = self.ring.slots(), to = slots, len = self.len(), "growing ring buffer");
        self.ring.relocate(storage);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use std::rc::Rc;

    #[test]
    fn growth_sequence() {
        assert_eq!(grown_slots(1, 0), Ok(1));
        assert_eq!(grown_slots(1, 1), Ok(3));
        assert_eq!(grown_slots(5, 5), Ok(11));
        assert_eq!(grown_slots(5, 11), Ok(23));
        assert_eq!(grown_slots(usize::MAX / 2 + 1, usize::MAX), Err(Error::CapacityOverflow));
    }

    #[test]
    fn push_grows_on_full() {
        let mut tester: GrowableBuffer<i32> = GrowableBuffer::with_capacity(2);
        tester.push_back(1);
        tester.push_back(2);
        assert_eq!(tester.capacity(), 2);
        assert!(tester.is_full());
        tester.push_back(3);
        assert_eq!(tester.capacity(), 6);
        assert!(!tester.is_full());
        tester.push_front(0);
        assert_eq!(tester, [0, 1, 2, 3]);
        assert_eq!(tester.pop_back(), Ok(3));
        assert_eq!(tester.pop_front(), Ok(0));
    }

    #[test]
    fn growth_from_wrapped_state() {
        let mut tester: GrowableBuffer<i32> = GrowableBuffer::with_capacity(3);
        tester.push_back(2);
        tester.push_back(3);
        tester.push_front(1);
        assert_eq!(tester.as_slices(), (&[1][..], &[2, 3][..]));
        tester.push_front(0);
        assert_eq!(tester.capacity(), 8);
        assert_eq!(tester, [0, 1, 2, 3]);
        assert_eq!(tester.as_slices(), (&[0][..], &[1, 2, 3][..]));
    }

    #[test]
    fn zero_capacity_grows() {
        let mut tester: GrowableBuffer<&str> = GrowableBuffer::with_capacity(0);
        tester.push_front("x");
        assert_eq!(tester.capacity(), 2);
        assert_eq!(tester.front(), Some(&"x"));
    }

    #[test]
    fn insert_variants() {
        let mut tester: GrowableBuffer<_> = GrowableBuffer::from(["a", "b", "b", "a"]);
        tester.insert_n(0, 3, "v").unwrap();
        assert_eq!(tester.capacity(), 10);
        assert_eq!(tester, ["v", "v", "v", "a", "b", "b", "a"]);

        let mut tester: GrowableBuffer<_> = GrowableBuffer::from(["a", "b", "b", "a"]);
        tester.insert_iter(4, vec!["c"; 8]).unwrap();
        // 5 -> 11 -> 23 slots
        assert_eq!(tester.capacity(), 22);
        assert_eq!(tester.len(), 12);
        assert_eq!(tester.back(), Some(&"c"));
    }

    #[test]
    fn insert_out_of_range_leaves_buffer() {
        let mut tester: GrowableBuffer<_> = GrowableBuffer::from([1, 2]);
        assert_eq!(tester.insert(3, 0), Err(Error::OutOfRange { index: 3, len: 2 }));
        assert_eq!(tester.insert_n(3, 5, 0), Err(Error::OutOfRange { index: 3, len: 2 }));
        assert_eq!(tester.insert_range(0, 1..3), Err(Error::OutOfRange { index: 3, len: 2 }));
        assert_eq!(tester.capacity(), 2);
        assert_eq!(tester, [1, 2]);
    }

    #[test]
    fn assign_grows_when_needed() {
        let mut tester: GrowableBuffer<_> =
            GrowableBuffer::from(["I", "Walk", "this", "empty", "street"]);
        tester.assign(&GrowableBuffer::from(["1", "2"])).unwrap();
        assert_eq!(tester, ["1", "2", "this", "empty", "street"]);
        assert_eq!(tester.capacity(), 5);

        tester.assign_n(7, "x").unwrap();
        assert_eq!(tester, ["x"; 7]);
        // 6 -> 13 slots
        assert_eq!(tester.capacity(), 12);
    }

    #[test]
    fn reserve_and_errors() {
        let mut tester: GrowableBuffer<u8> = GrowableBuffer::with_capacity(2);
        tester.extend([1, 2]);
        assert_eq!(tester.reserve(usize::MAX), Err(Error::CapacityOverflow));
        assert_eq!(tester.try_push_back(3), Ok(()));
        tester.reserve(12).unwrap();
        assert_eq!(tester.capacity(), 12);
        assert_eq!(tester, [1, 2, 3]);
    }

    #[test]
    fn failed_allocation_keeps_buffer() {
        let mut tester: GrowableBuffer<u64> = GrowableBuffer::with_capacity(3);
        tester.extend([4, 5, 6]);
        tester.pop_front().unwrap();
        tester.push_back(7);
        let huge = usize::MAX / 4;
        assert_eq!(tester.reserve(huge), Err(Error::AllocFailed { slots: huge + 1 }));
        assert_eq!(tester.capacity(), 3);
        assert_eq!(tester, [5, 6, 7]);
        assert!(tester.is_full());
        tester.push_back(8);
        assert_eq!(tester, [5, 6, 7, 8]);
    }

    #[test]
    fn at_and_remove() {
        let mut tester: GrowableBuffer<_> =
            GrowableBuffer::from(["Yes", "I'm", "DELETED", "man"]);
        assert_eq!(tester.remove(2), Ok("DELETED"));
        assert_eq!(tester.at(2), Ok(&"man"));
        assert_eq!(tester.at(3), Err(Error::OutOfRange { index: 3, len: 3 }));
        tester.clear();
        assert_eq!(tester.remove(0), Err(Error::Empty));
        assert_eq!(tester.at(0), Err(Error::Empty));
    }

    #[test]
    fn growth_moves_without_cloning_or_dropping() {
        let marker = Rc::new(());
        {
            let mut tester: GrowableBuffer<_> = GrowableBuffer::with_capacity(1);
            for _ in 0..10 {
                tester.push_back(marker.clone());
            }
            assert_eq!(Rc::strong_count(&marker), 11);
            tester.insert_n(5, 10, marker.clone()).unwrap();
            assert_eq!(Rc::strong_count(&marker), 21);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
