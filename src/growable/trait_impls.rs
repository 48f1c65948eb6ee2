use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter;
use core::ops::{Index, IndexMut};

use super::GrowableBuffer;
use crate::circular::CircularBuffer;
use crate::error::{or_panic, Error};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::raw::slices_eq;
use crate::storage::{Heap, Storage};
use crate::RingBuffer;

impl<T: Clone, S: Storage<Item = T>> Clone for GrowableBuffer<T, S> {
    fn clone(&self) -> Self {
        GrowableBuffer { ring: or_panic(self.ring.duplicate()) }
    }
}

impl<T, S: Storage<Item = T>> Default for GrowableBuffer<T, S> {
    #[inline]
    fn default() -> Self {
        GrowableBuffer::new()
    }
}

impl<T, U, S, S2> PartialEq<GrowableBuffer<U, S2>> for GrowableBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>,
          S2: Storage<Item = U>
{
    fn eq(&self, other: &GrowableBuffer<U, S2>) -> bool {
        slices_eq(self.as_slices(), other.as_slices())
    }
}

impl<T, U, S, S2> PartialEq<CircularBuffer<U, S2>> for GrowableBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>,
          S2: Storage<Item = U>
{
    fn eq(&self, other: &CircularBuffer<U, S2>) -> bool {
        slices_eq(self.as_slices(), other.as_slices())
    }
}

impl<T, U, S> PartialEq<Vec<U>> for GrowableBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>
{
    fn eq(&self, other: &Vec<U>) -> bool {
        slices_eq(self.as_slices(), (&other[..], Default::default()))
    }
}

impl<T, U, S> PartialEq<&[U]> for GrowableBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>
{
    fn eq(&self, other: &&[U]) -> bool {
        slices_eq(self.as_slices(), (*other, Default::default()))
    }
}

impl<T, U, S, const N: usize> PartialEq<[U; N]> for GrowableBuffer<T, S>
    where T: PartialEq<U>,
          S: Storage<Item = T>
{
    fn eq(&self, other: &[U; N]) -> bool {
        slices_eq(self.as_slices(), (&other[..], Default::default()))
    }
}

impl<T: Eq, S: Storage<Item = T>> Eq for GrowableBuffer<T, S> {}

impl<T: PartialOrd, S: Storage<Item = T>> PartialOrd for GrowableBuffer<T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, S: Storage<Item = T>> Ord for GrowableBuffer<T, S> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, S: Storage<Item = T>> Hash for GrowableBuffer<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        let (a, b) = self.as_slices();
        Hash::hash_slice(a, state);
        Hash::hash_slice(b, state);
    }
}

impl<T, S: Storage<Item = T>> Index<usize> for GrowableBuffer<T, S> {
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

impl<T, S: Storage<Item = T>> IndexMut<usize> for GrowableBuffer<T, S> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(elem) => elem,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T, S: Storage<Item = T>> iter::FromIterator<T> for GrowableBuffer<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let mut buf = GrowableBuffer::with_capacity(values.len());
        buf.extend(values);
        buf
    }
}

impl<T> From<Vec<T>> for GrowableBuffer<T, Heap<T>> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for GrowableBuffer<T, Heap<T>> {
    fn from(values: [T; N]) -> Self {
        let mut buf = GrowableBuffer::with_capacity(N);
        buf.extend(values);
        buf
    }
}

impl<T, S: Storage<Item = T>> IntoIterator for GrowableBuffer<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> IntoIter<T, S> {
        IntoIter::new(self.ring)
    }
}

impl<'a, T, S: Storage<Item = T>> IntoIterator for &'a GrowableBuffer<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, S: Storage<Item = T>> IntoIterator for &'a mut GrowableBuffer<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

/// Extend the `GrowableBuffer` with an iterator, growing as needed.
///
/// # Panics
///
/// Panics if the grown storage cannot be allocated.
impl<T, S: Storage<Item = T>> Extend<T> for GrowableBuffer<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        or_panic(self.grow_for(lower));
        for elt in iter {
            self.push_back(elt);
        }
    }
}

impl<'a, T: 'a + Copy, S: Storage<Item = T>> Extend<&'a T> for GrowableBuffer<T, S> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T: fmt::Debug, S: Storage<Item = T>> fmt::Debug for GrowableBuffer<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

/// Pushes and inserts never evict, so they return `Ok(None)` unless the
/// storage cannot grow.
impl<T, S: Storage<Item = T>> RingBuffer for GrowableBuffer<T, S> {
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
        self.try_push_back(element).map(|()| None)
    }

    #[inline]
    fn push_front(&mut self, element: T) -> Result<Option<T>, Error> {
        self.try_push_front(element).map(|()| None)
    }

    #[inline]
    fn pop_front(&mut self) -> Result<T, Error> {
        GrowableBuffer::pop_front(self)
    }

    #[inline]
    fn pop_back(&mut self) -> Result<T, Error> {
        GrowableBuffer::pop_back(self)
    }

    #[inline]
    fn insert(&mut self, index: usize, element: T) -> Result<Option<T>, Error> {
        GrowableBuffer::insert(self, index, element).map(|()| None)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Result<T, Error> {
        GrowableBuffer::remove(self, index)
    }
}
