//! Raw storage strategies backing the ring buffers.

use alloc::vec::Vec;
use core::mem::MaybeUninit;
use core::ptr;

use crate::error::Error;

/// Trait for the raw slot storage of a ring buffer.
///
/// A storage is a contiguous block of `slots()` slots of `Self::Item`. It
/// only hands out memory: the buffer decides which slots are live, writes
/// values with [`construct`], moves them out with [`take`] and drops them in
/// place with [`destroy`]. Dropping the storage releases the memory and must
/// **not** drop any item, whatever the state of the slots.
///
/// # Safety
///
/// `allocate(n)` must return a storage with exactly `n` slots, and
/// `as_ptr`/`as_mut_ptr` must point to the first of `slots()` properly
/// aligned, contiguous `Self::Item` slots that stay put for as long as the
/// storage is not moved out of or dropped.
///
/// [`construct`]: #method.construct
/// [`take`]: #method.take
/// [`destroy`]: #method.destroy
pub unsafe trait Storage: Sized {
    /// The element type
    type Item;

    /// Allocates a storage of `slots` uninitialized slots.
    fn allocate(slots: usize) -> Result<Self, Error>;

    /// Returns the number of slots.
    fn slots(&self) -> usize;

    /// Returns a raw pointer to the first slot.
    fn as_ptr(&self) -> *const Self::Item;

    /// Returns an unsafe mutable pointer to the first slot.
    fn as_mut_ptr(&mut self) -> *mut Self::Item;

    /// Writes `value` into `slot` without reading or dropping the old content.
    ///
    /// # Safety
    ///
    /// `slot < self.slots()`; the slot's previous value, if any, is leaked.
    #[inline]
    unsafe fn construct(&mut self, slot: usize, value: Self::Item) {
        debug_assert!(slot < self.slots());
        ptr::write(self.as_mut_ptr().add(slot), value);
    }

    /// Moves the value out of `slot`, leaving the slot logically uninitialized.
    ///
    /// # Safety
    ///
    /// `slot < self.slots()` and the slot holds an initialized value.
    #[inline]
    unsafe fn take(&mut self, slot: usize) -> Self::Item {
        debug_assert!(slot < self.slots());
        ptr::read(self.as_ptr().add(slot))
    }

    /// Drops the value in `slot` in place.
    ///
    /// # Safety
    ///
    /// `slot < self.slots()` and the slot holds an initialized value.
    #[inline]
    unsafe fn destroy(&mut self, slot: usize) {
        debug_assert!(slot < self.slots());
        ptr::drop_in_place(self.as_mut_ptr().add(slot));
    }
}

/// The default storage: a heap allocated block of uninitialized slots.
pub struct Heap<T> {
    xs: Vec<MaybeUninit<T>>,
}

unsafe impl<T> Storage for Heap<T> {
    type Item = T;

    fn allocate(slots: usize) -> Result<Self, Error> {
        let mut xs = Vec::new();
        xs.try_reserve_exact(slots)
            .map_err(|_| Error::AllocFailed { slots })?;
        xs.resize_with(slots, MaybeUninit::uninit);
        Ok(Heap { xs })
    }

    #[inline(always)]
    fn slots(&self) -> usize {
        self.xs.len()
    }

    #[inline(always)]
    fn as_ptr(&self) -> *const T {
        self.xs.as_ptr() as *const T
    }

    #[inline(always)]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.xs.as_mut_ptr() as *mut T
    }
}
