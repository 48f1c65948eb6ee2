//! Slot bookkeeping shared by both buffer types.
//!
//! `RawRing` owns the storage and knows which slots are live. It never
//! decides what happens on overflow: the `*_unchecked` operations expect a
//! free slot and the owning buffer either evicts or grows before calling them.

use core::marker::PhantomData;
use core::ptr;
use core::slice;

use crate::error::Error;
use crate::storage::Storage;

/// Ring state over a storage of `slots` slots.
///
/// `tail` is the physical slot of the first element and `head` is one past
/// the last one, so `tail == head` means empty and at most `slots - 1`
/// elements are live at any time.
pub(crate) struct RawRing<T, S: Storage<Item = T>> {
    buf: S,
    tail: usize,
    head: usize,
    marker: PhantomData<T>,
}

#[inline]
fn count(tail: usize, head: usize, slots: usize) -> usize {
    debug_assert!(head < slots);
    debug_assert!(tail < slots);
    if head >= tail {
        head - tail
    } else {
        slots + head - tail
    }
}

/// Number of slots needed to hold `capacity` elements.
#[inline]
pub(crate) fn slots_for(capacity: usize) -> Result<usize, Error> {
    capacity.checked_add(1).ok_or(Error::CapacityOverflow)
}

impl<T, S: Storage<Item = T>> RawRing<T, S> {
    /// Allocates an empty ring able to hold `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let slots = slots_for(capacity)?;
        Ok(RawRing::from_storage(S::allocate(slots)?))
    }

    #[inline]
    fn from_storage(buf: S) -> Self {
        debug_assert!(buf.slots() > 0);
        RawRing {
            buf,
            tail: 0,
            head: 0,
            marker: PhantomData,
        }
    }

    #[inline]
    pub fn slots(&self) -> usize {
        self.buf.slots()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        count(self.tail, self.head, self.slots())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tail == self.head
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    #[inline]
    fn is_contiguous(&self) -> bool {
        self.tail <= self.head
    }

    #[inline]
    fn wrap_add(&self, index: usize, addend: usize) -> usize {
        debug_assert!(addend <= self.slots());
        (index + addend) % self.slots()
    }

    #[inline]
    fn wrap_sub(&self, index: usize, subtrahend: usize) -> usize {
        debug_assert!(subtrahend <= self.slots());
        (index + self.slots() - subtrahend) % self.slots()
    }

    /// Physical slot of the element at logical `index`.
    #[inline]
    pub fn physical(&self, index: usize) -> usize {
        self.wrap_add(self.tail, index)
    }

    #[inline]
    unsafe fn buffer_read(&mut self, offset: usize) -> T {
        self.buf.take(offset)
    }

    #[inline]
    unsafe fn buffer_write(&mut self, offset: usize, element: T) {
        self.buf.construct(offset, element);
    }

    /// Copies a contiguous block of memory len long from src to dst
    #[inline]
    unsafe fn copy(&mut self, dst: usize, src: usize, len: usize) {
        debug_assert!(dst + len <= self.slots(),
                      "cpy dst={} src={} len={} slots={}",
                      dst,
                      src,
                      len,
                      self.slots());
        debug_assert!(src + len <= self.slots(),
                      "cpy dst={} src={} len={} slots={}",
                      dst,
                      src,
                      len,
                      self.slots());
        let ptr = self.buf.as_mut_ptr();
        ptr::copy(ptr.add(src), ptr.add(dst), len);
    }

    /// Moves the `len` elements starting at physical slot `start` one slot
    /// toward the back, wrapping past the end of the storage. The slot after
    /// the block must be free.
    unsafe fn shift_back(&mut self, start: usize, len: usize) {
        let slots = self.slots();
        debug_assert!(len < slots, "shb start={} len={} slots={}", start, len, slots);
        let end = start + len;
        if end < slots {
            //        S . .
            // 1 [_ _ A B C _ _]
            // 2 [_ _ A A B C _]
            self.copy(start + 1, start, len);
            return;
        }
        //    . .       S . .
        // 1 [D E _ _ _ A B C]
        // 2 [D D E _ _ A B C]
        // 3 [C D E _ _ A B C]
        // 4 [C D E _ _ A A B]
        self.copy(1, 0, end - slots);
        self.copy(0, slots - 1, 1);
        self.copy(start + 1, start, slots - 1 - start);
    }

    /// Moves the `len` elements following physical slot `dst` one slot
    /// toward the front, so the first of them lands in `dst`.
    unsafe fn shift_front(&mut self, dst: usize, len: usize) {
        let slots = self.slots();
        debug_assert!(len < slots, "shf dst={} len={} slots={}", dst, len, slots);
        if dst + len < slots {
            //        D . . .
            // 1 [_ _ _ A B C _]
            // 2 [_ _ A B C C _]
            self.copy(dst, dst + 1, len);
            return;
        }
        //    . .       D . .
        // 1 [D E _ _ _ _ A B]
        // 2 [D E _ _ _ A B B]
        // 3 [D E _ _ _ A B D]
        // 4 [E E _ _ _ A B D]
        self.copy(dst, dst + 1, slots - 1 - dst);
        self.copy(slots - 1, 0, 1);
        self.copy(0, 1, dst + len - slots);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            let idx = self.physical(index);
            unsafe { Some(&*self.buf.as_ptr().add(idx)) }
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            let idx = self.physical(index);
            unsafe { Some(&mut *self.buf.as_mut_ptr().add(idx)) }
        } else {
            None
        }
    }

    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(i < self.len());
        assert!(j < self.len());
        let ri = self.physical(i);
        let rj = self.physical(j);
        unsafe {
            let ptr = self.buf.as_mut_ptr();
            ptr::swap(ptr.add(ri), ptr.add(rj))
        }
    }

    pub fn as_slices(&self) -> (&[T], &[T]) {
        let ptr = self.buf.as_ptr();
        unsafe {
            if self.is_contiguous() {
                (slice::from_raw_parts(ptr.add(self.tail), self.head - self.tail), Default::default())
            } else {
                (slice::from_raw_parts(ptr.add(self.tail), self.slots() - self.tail),
                 slice::from_raw_parts(ptr, self.head))
            }
        }
    }

    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (tail, head, slots) = (self.tail, self.head, self.slots());
        let ptr = self.buf.as_mut_ptr();
        unsafe {
            if tail <= head {
                (slice::from_raw_parts_mut(ptr.add(tail), head - tail), Default::default())
            } else {
                (slice::from_raw_parts_mut(ptr.add(tail), slots - tail),
                 slice::from_raw_parts_mut(ptr, head))
            }
        }
    }

    /// Appends `element`; the ring must not be full.
    #[inline]
    pub fn push_back_unchecked(&mut self, element: T) {
        debug_assert!(!self.is_full());
        let head = self.head;
        unsafe { self.buffer_write(head, element) };
        self.head = self.wrap_add(head, 1);
    }

    /// Prepends `element`; the ring must not be full.
    #[inline]
    pub fn push_front_unchecked(&mut self, element: T) {
        debug_assert!(!self.is_full());
        let tail = self.wrap_sub(self.tail, 1);
        unsafe { self.buffer_write(tail, element) };
        self.tail = tail;
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let tail = self.tail;
        self.tail = self.wrap_add(tail, 1);
        unsafe { Some(self.buffer_read(tail)) }
    }

    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let head = self.wrap_sub(self.head, 1);
        self.head = head;
        unsafe { Some(self.buffer_read(head)) }
    }

    /// Inserts `element` at logical `index`, shifting the elements from
    /// `index` on one slot toward the back. The ring must not be full and
    /// `index <= len`.
    pub fn insert_unchecked(&mut self, index: usize, element: T) {
        let len = self.len();
        debug_assert!(index <= len);
        debug_assert!(!self.is_full());

        //       T   I         H
        // 1 [. . o o A B C o . . .]
        // 2 [. . o o _ A B C o . .]
        //              M M M M
        let idx = self.physical(index);
        unsafe {
            self.shift_back(idx, len - index);
            self.buffer_write(idx, element);
        }
        self.head = self.wrap_add(self.head, 1);
    }

    /// Removes the element at logical `index`, shifting the following
    /// elements one slot toward the front.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }

        //       T   R         H
        // 1 [. . o o x A B C . . .]
        // 2 [. . o o A B C . . . .]
        //            M M M
        let idx = self.physical(index);
        let elem = unsafe { self.buffer_read(idx) };
        unsafe { self.shift_front(idx, len - index - 1) };
        self.head = self.wrap_sub(self.head, 1);
        Some(elem)
    }

    /// Destroys every live element through the storage and resets both
    /// offsets to zero.
    pub fn clear(&mut self) {
        let (tail, len) = (self.tail, self.len());
        // reset first so a panicking destructor cannot cause a double drop
        self.tail = 0;
        self.head = 0;
        for i in 0..len {
            let slot = self.wrap_add(tail, i);
            unsafe { self.buf.destroy(slot) };
        }
    }

    /// Moves every element, in logical order, to the front of `buf` and
    /// makes it the new storage. The old storage is released.
    pub fn relocate(&mut self, mut buf: S) {
        let len = self.len();
        assert!(buf.slots() > len, "relocation target is too small");
        {
            let (front, back) = self.as_slices();
            let dst = buf.as_mut_ptr();
            unsafe {
                ptr::copy_nonoverlapping(front.as_ptr(), dst, front.len());
                ptr::copy_nonoverlapping(back.as_ptr(), dst.add(front.len()), back.len());
            }
        }
        // the elements now live in `buf`; dropping the old block only frees it
        self.buf = buf;
        self.tail = 0;
        self.head = len;
    }

    /// Deep copy into a store of the same size, keeping the physical offsets.
    pub fn duplicate(&self) -> Result<Self, Error>
        where T: Clone
    {
        let mut copy = RawRing::from_storage(S::allocate(self.slots())?);
        copy.tail = self.tail;
        copy.head = self.tail;
        let (front, back) = self.as_slices();
        for elem in front.iter().chain(back) {
            copy.push_back_unchecked(elem.clone());
        }
        debug_assert_eq!(copy.head, self.head);
        Ok(copy)
    }
}

/// Compares two rings given as `as_slices()` pairs, without assuming the
/// wrap points line up.
pub(crate) fn slices_eq<A, B>((sa, sb): (&[A], &[A]), (oa, ob): (&[B], &[B])) -> bool
    where A: PartialEq<B>
{
    if sa.len() + sb.len() != oa.len() + ob.len() {
        return false;
    }
    if sa.len() == oa.len() {
        sa == oa && sb == ob
    } else if sa.len() < oa.len() {
        // Always divisible in three sections, for example:
        // self:  [a b c|d e f]
        // other: [0 1 2 3|4 5]
        // front = 3, mid = 1,
        // [a b c] == [0 1 2] && [d] == [3] && [e f] == [4 5]
        let front = sa.len();
        let mid = oa.len() - front;

        let (oa_front, oa_mid) = oa.split_at(front);
        let (sb_mid, sb_back) = sb.split_at(mid);
        sa == oa_front && sb_mid == oa_mid && sb_back == ob
    } else {
        let front = oa.len();
        let mid = sa.len() - front;

        let (sa_front, sa_mid) = sa.split_at(front);
        let (ob_mid, ob_back) = ob.split_at(mid);
        sa_front == oa && sa_mid == ob_mid && sb == ob_back
    }
}

impl<T, S: Storage<Item = T>> Drop for RawRing<T, S> {
    fn drop(&mut self) {
        self.clear();
    }
}
