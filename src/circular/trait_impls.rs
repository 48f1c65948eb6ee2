use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter;
use core::ops::{Index, IndexMut};

use super::CircularBuffer;
use crate::error::{or_panic, Error};
use crate::growable::GrowableBuffer;
use crate::iter::{IntoIter, Iter, IterMut};
use crate::raw::slices_eq;
use crate::storage::{Heap, Storage};
use crate::RingBuffer;

impl<T: Clone, S: Storage<Item = T>> Clone for CircularBuffer<T, S> {
    /// Deep copy with the same capacity.
    ///
    /// # Panics
    ///
    /// Panics if the storage for the copy cannot be allocated.
    fn clone(&self) -> Self {
        CircularBuffer { ring: or_panic(self.ring.duplicate()) }
    }
}

impl<T, S: Storage<Item = T>> Default for CircularBuffer<T, S> {
    #[inline]
    fn default() -> Self {
        CircularBuffer::new()
    }
}

impl<T, U, S, S2> PartialEq<CircularBuffer<U, S2>> for CircularBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>,
          S2: Storage<Item = U>
{
    fn eq(&self, other: &CircularBuffer<U, S2>) -> bool {
        slices_eq(self.as_slices(), other.as_slices())
    }
}

impl<T, U, S, S2> PartialEq<GrowableBuffer<U, S2>> for CircularBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>,
          S2: Storage<Item = U>
{
    fn eq(&self, other: &GrowableBuffer<U, S2>) -> bool {
        slices_eq(self.as_slices(), other.as_slices())
    }
}

impl<T, U, S> PartialEq<Vec<U>> for CircularBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>
{
    fn eq(&self, other: &Vec<U>) -> bool {
        slices_eq(self.as_slices(), (&other[..], Default::default()))
    }
}

impl<T, U, S> PartialEq<&[U]> for CircularBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>
{
    fn eq(&self, other: &&[U]) -> bool {
        slices_eq(self.as_slices(), (*other, Default::default()))
    }
}

impl<T, U, S, const N: usize> PartialEq<[U; N]> for CircularBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>
{
    fn eq(&self, other: &[U; N]) -> bool {
        slices_eq(self.as_slices(), (&other[..], Default::default()))
    }
}

impl<T: Eq, S: Storage<Item = T>> Eq for CircularBuffer<T, S> {}

impl<T: PartialOrd, S: Storage<Item = T>> PartialOrd for CircularBuffer<T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, S: Storage<Item = T>> Ord for CircularBuffer<T, S> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, S: Storage<Item = T>> Hash for CircularBuffer<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        let (a, b) = self.as_slices();
        Hash::hash_slice(a, state);
        Hash::hash_slice(b, state);
    }
}

impl<T, S: Storage<Item = T>> Index<usize> for CircularBuffer<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(elem) => elem,
            None => {
                panic!("index out of bounds: the len is {} but the index is {}",
                       self.len(),
                       index)
            }
        }
    }
}

impl<T, S: Storage<Item = T>> IndexMut<usize> for CircularBuffer<T, S> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(elem) => elem,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

/// Collects into a full buffer whose capacity is the number of elements.
impl<T, S: Storage<Item = T>> iter::FromIterator<T> for CircularBuffer<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let mut buf = CircularBuffer::with_capacity(values.len());
        buf.extend(values);
        buf
    }
}

impl<T> From<Vec<T>> for CircularBuffer<T, Heap<T>> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for CircularBuffer<T, Heap<T>> {
    fn from(values: [T; N]) -> Self {
        let mut buf = CircularBuffer::with_capacity(N);
        buf.extend(values);
        buf
    }
}

impl<T, S: Storage<Item = T>> IntoIterator for CircularBuffer<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> IntoIter<T, S> {
        IntoIter::new(self.ring)
    }
}

impl<'a, T, S: Storage<Item = T>> IntoIterator for &'a CircularBuffer<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, S: Storage<Item = T>> IntoIterator for &'a mut CircularBuffer<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

/// Extend the `CircularBuffer` with an iterator.
///
/// Every element is pushed onto the back, so once the buffer is full the
/// oldest elements are evicted and only the last `capacity()` elements of
/// the iterator remain.
impl<T, S: Storage<Item = T>> Extend<T> for CircularBuffer<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

impl<'a, T: 'a + Copy, S: Storage<Item = T>> Extend<&'a T> for CircularBuffer<T, S> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T: fmt::Debug, S: Storage<Item = T>> fmt::Debug for CircularBuffer<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T, S: Storage<Item = T>> RingBuffer for CircularBuffer<T, S> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        self.ring.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.ring.get(index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.ring.get_mut(index)
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.ring.swap(i, j)
    }

    #[inline]
    fn push_back(&mut self, element: T) -> Result<Option<T>, Error> {
        Ok(CircularBuffer::push_back(self, element))
    }

    #[inline]
    fn push_front(&mut self, element: T) -> Result<Option<T>, Error> {
        Ok(CircularBuffer::push_front(self, element))
    }

    #[inline]
    fn pop_front(&mut self) -> Result<T, Error> {
        CircularBuffer::pop_front(self)
    }

    #[inline]
    fn pop_back(&mut self) -> Result<T, Error> {
        CircularBuffer::pop_back(self)
    }

    #[inline]
    fn insert(&mut self, index: usize, element: T) -> Result<Option<T>, Error> {
        CircularBuffer::insert(self, index, element)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Result<T, Error> {
        CircularBuffer::remove(self, index)
    }
}
