//! Generic algorithms over any [`RingBuffer`](../trait.RingBuffer.html).
//!
//! Sorting only uses `len`, `get` and `swap`, so it works in place on either
//! buffer type without making the storage contiguous. It is an unstable heap
//! sort: `O(n log n)` comparisons, no allocation.
//!
//! The searching functions take a range of [cursors](../cursor/index.html)
//! and expect it to be partitioned (sorted, for the `Ord` variants).
//!
//! ```
//! use ringdeque::{algo, CircularBuffer};
//!
//! let mut buf = CircularBuffer::from(["ABC", "CBA", "BAC"]);
//! algo::sort(&mut buf);
//! assert_eq!(buf, ["ABC", "BAC", "CBA"]);
//!
//! let pos = algo::lower_bound(buf.begin(), buf.end(), &"BAC");
//! assert_eq!(pos.index(), 1);
//! ```

use core::cmp::Ordering;

use crate::cursor::Cursor;
use crate::error::Error;
use crate::{RangeArgument, RingBuffer};

/// Sorts the buffer in ascending order.
#[inline]
pub fn sort<R>(ring: &mut R)
    where R: RingBuffer + ?Sized,
          R::Item: Ord
{
    sort_by(ring, |a, b| a.cmp(b))
}

/// Sorts the buffer with a comparator function.
pub fn sort_by<R, F>(ring: &mut R, mut compare: F)
    where R: RingBuffer + ?Sized,
          F: FnMut(&R::Item, &R::Item) -> Ordering
{
    let len = ring.len();
    heap_sort(ring, 0, len, &mut |a, b| compare(a, b) == Ordering::Less);
}

/// Sorts the buffer with a key extraction function.
///
/// ```
/// use ringdeque::{algo, GrowableBuffer};
///
/// let mut buf: GrowableBuffer<i32> = GrowableBuffer::from([-5, 4, 1, -3, 2]);
/// algo::sort_by_key(&mut buf, |k| k.abs());
/// assert_eq!(buf, [1, 2, -3, 4, -5]);
/// ```
pub fn sort_by_key<R, K, F>(ring: &mut R, mut f: F)
    where R: RingBuffer + ?Sized,
          K: Ord,
          F: FnMut(&R::Item) -> K
{
    sort_by(ring, |a, b| f(a).cmp(&f(b)))
}

/// Sorts the elements in `range` with a comparator, leaving the rest alone.
///
/// Fails with `Error::OutOfRange` if the range does not lie inside the
/// buffer; nothing is moved in that case.
///
/// ```
/// use ringdeque::{algo, CircularBuffer};
///
/// let mut buf = CircularBuffer::from([9, 3, 2, 1, 0]);
/// algo::sort_range_by(&mut buf, 1..4, |a, b| a.cmp(b)).unwrap();
/// assert_eq!(buf, [9, 1, 2, 3, 0]);
/// assert!(algo::sort_range_by(&mut buf, 3..6, |a, b| a.cmp(b)).is_err());
/// ```
pub fn sort_range_by<R, G, F>(ring: &mut R, range: G, mut compare: F) -> Result<(), Error>
    where R: RingBuffer + ?Sized,
          G: RangeArgument<usize>,
          F: FnMut(&R::Item, &R::Item) -> Ordering
{
    let len = ring.len();
    let start = range.start().unwrap_or(0);
    let end = range.end().unwrap_or(len);
    if end > len {
        return Err(Error::OutOfRange { index: end, len });
    }
    if start > end {
        return Err(Error::OutOfRange { index: start, len });
    }
    heap_sort(ring, start, end, &mut |a, b| compare(a, b) == Ordering::Less);
    Ok(())
}

/// Checks if the elements are sorted according to `compare`, which should
/// return true when its arguments are in order.
pub fn is_sorted_by<R, F>(ring: &R, mut compare: F) -> bool
    where R: RingBuffer + ?Sized,
          F: FnMut(&R::Item, &R::Item) -> bool
{
    let mut prev = match ring.get(0) {
        Some(first) => first,
        None => return true,
    };
    for index in 1..ring.len() {
        match ring.get(index) {
            Some(next) if compare(prev, next) => prev = next,
            _ => return false,
        }
    }
    true
}

/// Checks if the elements are in ascending order.
#[inline]
pub fn is_sorted<R>(ring: &R) -> bool
    where R: RingBuffer + ?Sized,
          R::Item: PartialOrd
{
    is_sorted_by(ring, |a, b| a <= b)
}

/// Binary searches a sorted buffer with a comparator function.
///
/// Returns `Ok(index)` of a matching element or `Err(index)` of the position
/// where a matching element could be inserted, like
/// [`slice::binary_search_by`].
pub fn binary_search_by<R, F>(ring: &R, mut f: F) -> Result<usize, usize>
    where R: RingBuffer + ?Sized,
          F: FnMut(&R::Item) -> Ordering
{
    let mut low = 0;
    let mut high = ring.len();
    while low < high {
        let mid = low + (high - low) / 2;
        match ring.get(mid).map(&mut f) {
            Some(Ordering::Less) => low = mid + 1,
            Some(Ordering::Greater) => high = mid,
            Some(Ordering::Equal) => return Ok(mid),
            None => break,
        }
    }
    Err(low)
}

/// Binary searches a sorted buffer for `x`.
///
/// ```
/// use ringdeque::{algo, GrowableBuffer};
///
/// let buf: GrowableBuffer<_> = GrowableBuffer::from([1, 3, 5, 7]);
/// assert_eq!(algo::binary_search(&buf, &5), Ok(2));
/// assert_eq!(algo::binary_search(&buf, &4), Err(2));
/// ```
#[inline]
pub fn binary_search<R>(ring: &R, x: &R::Item) -> Result<usize, usize>
    where R: RingBuffer + ?Sized,
          R::Item: Ord
{
    binary_search_by(ring, |elem| elem.cmp(x))
}

/// Returns the first cursor in `[first, last)` for which `pred` is false,
/// or `last` if there is none.
///
/// The range must be partitioned: every element for which `pred` holds comes
/// before every element for which it does not. Cursor positions past the end
/// of the buffer are treated as `end()`.
pub fn partition_point<'a, R, P>(first: Cursor<'a, R>,
                                 last: Cursor<'a, R>,
                                 mut pred: P)
                                 -> Cursor<'a, R>
    where R: RingBuffer + ?Sized,
          P: FnMut(&R::Item) -> bool
{
    let ring = first.ring();
    let mut high = core::cmp::min(last.index(), ring.len());
    let mut low = core::cmp::min(first.index(), high);
    while low < high {
        let mid = low + (high - low) / 2;
        match ring.get(mid) {
            Some(elem) if pred(elem) => low = mid + 1,
            _ => high = mid,
        }
    }
    ring.cursor(low)
}

/// Returns the first cursor in `[first, last)` whose element is not less
/// than `value`.
#[inline]
pub fn lower_bound<'a, R>(first: Cursor<'a, R>,
                          last: Cursor<'a, R>,
                          value: &R::Item)
                          -> Cursor<'a, R>
    where R: RingBuffer + ?Sized,
          R::Item: Ord
{
    partition_point(first, last, |elem| elem < value)
}

/// Returns the first cursor in `[first, last)` whose element is greater
/// than `value`.
///
/// ```
/// use ringdeque::{algo, CircularBuffer};
///
/// let buf = CircularBuffer::from([1, 2, 2, 2, 3]);
/// let lo = algo::lower_bound(buf.begin(), buf.end(), &2);
/// let hi = algo::upper_bound(buf.begin(), buf.end(), &2);
/// assert_eq!(hi - lo, 3);
/// ```
#[inline]
pub fn upper_bound<'a, R>(first: Cursor<'a, R>,
                          last: Cursor<'a, R>,
                          value: &R::Item)
                          -> Cursor<'a, R>
    where R: RingBuffer + ?Sized,
          R::Item: Ord
{
    partition_point(first, last, |elem| elem <= value)
}

#[inline]
fn less_at<R, F>(ring: &R, i: usize, j: usize, is_less: &mut F) -> bool
    where R: RingBuffer + ?Sized,
          F: FnMut(&R::Item, &R::Item) -> bool
{
    match (ring.get(i), ring.get(j)) {
        (Some(a), Some(b)) => is_less(a, b),
        _ => false,
    }
}

/// Moves the element at heap position `node` away from the root until it is
/// not less than its children. Heap positions are offsets from `base`.
fn sift_down<R, F>(ring: &mut R, base: usize, len: usize, mut node: usize, is_less: &mut F)
    where R: RingBuffer + ?Sized,
          F: FnMut(&R::Item, &R::Item) -> bool
{
    loop {
        let mut child = 2 * node + 1;
        if child >= len {
            return;
        }
        if child + 1 < len && less_at(ring, base + child, base + child + 1, is_less) {
            child += 1;
        }
        if !less_at(ring, base + node, base + child, is_less) {
            return;
        }
        ring.swap(base + node, base + child);
        node = child;
    }
}

fn heap_sort<R, F>(ring: &mut R, start: usize, end: usize, is_less: &mut F)
    where R: RingBuffer + ?Sized,
          F: FnMut(&R::Item, &R::Item) -> bool
{
    let len = end - start;
    if len < 2 {
        return;
    }
    for node in (0..len / 2).rev() {
        sift_down(ring, start, len, node, is_less);
    }
    for last in (1..len).rev() {
        ring.swap(start, start + last);
        sift_down(ring, start, last, 0, is_less);
    }
}
