//! Contiguous growable array.
//!
//! Elements live in one heap buffer of `capacity` slots; slots
//! `[0, len)` are initialized, `[len, capacity)` are not. The buffer grows by
//! a fixed increment (see [`Growth`]) when an insertion finds it full, and
//! never shrinks.
//!
//! # Cursor validity
//!
//! A cursor is an offset into the buffer plus the identity of the array.
//! Inserting or erasing at offset `i` shifts every element at or after `i`,
//! so a cursor at or after `i` now denotes a different element (or, past the
//! new end, is rejected as [`Error::Stale`]). Cursors before `i` keep
//! denoting the same element.
//!
//! ```
//! use linear_collections::{ArrayList, Sequence};
//!
//! let mut array = ArrayList::from(["a", "b", "c"]);
//! let c = array.cbegin().next(&array).unwrap().next(&array).unwrap();
//! assert_eq!(c.current(&array), Ok(&"c"));
//!
//! array.pop_first().unwrap();
//!
//! // Same offset, shifted contents.
//! assert_eq!(c, array.cend());
//! ```
//!
//! # Example
//!
//! ```
//! use linear_collections::{ArrayList, Sequence};
//!
//! let mut array = ArrayList::new();
//! array.append("a");
//! array.append("b");
//! array.prepend("c");
//! assert_eq!(array.as_slice(), ["c", "a", "b"]);
//!
//! let second = array.begin().next(&array).unwrap();
//! assert_eq!(array.erase(second), Ok("a"));
//! assert_eq!(array.pop_last(), Ok("b"));
//! assert_eq!(array.as_slice(), ["c"]);
//! ```

use core::fmt;
use core::mem::{self, MaybeUninit};
use core::ptr;
use core::slice;

use crate::cursor::Owner;
use crate::{Error, Growth, Result, Sequence};

/// A position inside an [`ArrayList`]: owning array plus element offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayPosition {
    owner: Owner,
    offset: usize,
}

impl ArrayPosition {
    /// Offset of the element this position denotes.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// A contiguous, growable array with linear capacity growth.
pub struct ArrayList<T> {
    /// Slots `[0, len)` are initialized.
    buf: Box<[MaybeUninit<T>]>,
    len: usize,
    growth: Growth,
    owner: Owner,
}

impl<T> ArrayList<T> {
    /// Creates an empty array with the default growth policy.
    pub fn new() -> Self {
        Self::with_growth(Growth::default())
    }

    /// Creates an empty array that allocates and grows according to `growth`.
    ///
    /// # Example
    ///
    /// ```
    /// use linear_collections::{ArrayList, Growth, Sequence};
    ///
    /// let mut array = ArrayList::with_growth(Growth::fixed(2));
    /// assert_eq!(array.capacity(), 2);
    ///
    /// array.extend([1, 2, 3]);
    /// assert_eq!(array.capacity(), 4);
    /// ```
    pub fn with_growth(growth: Growth) -> Self {
        Self {
            buf: alloc_slots(growth.initial_capacity()),
            len: 0,
            growth,
            owner: Owner::fresh(),
        }
    }

    /// Number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The growth policy this array was built with.
    #[inline]
    pub const fn growth(&self) -> Growth {
        self.growth
    }

    /// The elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: slots [0, len) are initialized
        unsafe { slice::from_raw_parts(self.buf.as_ptr().cast::<T>(), self.len) }
    }

    /// The elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: slots [0, len) are initialized
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr().cast::<T>(), self.len) }
    }

    /// Iterator over references, front to back.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterator over mutable references, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        let len = self.len;
        // Set first so a panicking destructor cannot cause a double drop.
        self.len = 0;
        // Safety: slots [0, len) were initialized and are no longer tracked
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.base(), len));
        }
    }

    /// Moves the contents out, leaving `self` empty with no buffer.
    ///
    /// `self` stays usable; its next insertion allocates one increment.
    ///
    /// ```
    /// use linear_collections::{ArrayList, Sequence};
    ///
    /// let mut source = ArrayList::from([1, 2, 3]);
    /// let moved = source.take();
    ///
    /// assert_eq!(source.len(), 0);
    /// assert_eq!(source.capacity(), 0);
    /// assert_eq!(moved.as_slice(), &[1, 2, 3]);
    /// ```
    pub fn take(&mut self) -> Self {
        tracing::trace!(len = self.len, capacity = self.capacity(), "array list moved out");
        let unallocated = Self {
            buf: alloc_slots(0),
            len: 0,
            growth: self.growth,
            owner: Owner::fresh(),
        };
        mem::replace(self, unallocated)
    }

    /// Converts into a `Vec` without cloning.
    pub fn into_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        // Safety: [0, len) is initialized; ownership moves to `out` and
        // `len` is reset so drop does not touch those slots again.
        unsafe {
            ptr::copy_nonoverlapping(self.base(), out.as_mut_ptr(), self.len);
            out.set_len(self.len);
        }
        self.len = 0;
        out
    }

    // ========================================================================
    // Buffer mechanics
    // ========================================================================

    #[inline]
    fn base(&mut self) -> *mut T {
        self.buf.as_mut_ptr().cast::<T>()
    }

    #[inline]
    fn position(&self, offset: usize) -> ArrayPosition {
        ArrayPosition {
            owner: self.owner,
            offset,
        }
    }

    /// Validates `pos` against this array and returns its offset.
    #[inline]
    fn locate(&self, pos: ArrayPosition) -> Result<usize> {
        if pos.owner != self.owner {
            return Err(Error::Foreign);
        }
        if pos.offset > self.len {
            return Err(Error::Stale);
        }
        Ok(pos.offset)
    }

    /// Makes room for one more element, reallocating if full.
    fn reserve_one(&mut self) {
        let capacity = self.capacity();
        let next = self.growth.next_capacity(self.len, capacity);
        if next == capacity {
            return;
        }

        let mut grown = alloc_slots::<T>(next);
        // Safety: the new buffer holds at least `len` slots and does not
        // overlap the old one. The old slots are MaybeUninit, so dropping
        // the old box does not drop the moved elements.
        unsafe {
            ptr::copy_nonoverlapping(self.base(), grown.as_mut_ptr().cast::<T>(), self.len);
        }
        self.buf = grown;

        tracing::trace!(from = capacity, to = next, len = self.len, "array list grew");
    }

    /// Shifts `[offset, len)` right by one and writes `item` at `offset`.
    fn insert_slot(&mut self, offset: usize, item: T) {
        debug_assert!(offset <= self.len);
        self.reserve_one();

        // Safety: reserve_one guarantees capacity > len, so the shifted
        // range [offset + 1, len + 1) is in bounds.
        unsafe {
            let at = self.base().add(offset);
            ptr::copy(at, at.add(1), self.len - offset);
            at.write(item);
        }
        self.len += 1;
    }

    /// Reads the element at `offset` and shifts `(offset, len)` left by one.
    fn remove_slot(&mut self, offset: usize) -> T {
        debug_assert!(offset < self.len);

        // Safety: offset < len, so the slot is initialized; after the read
        // its bytes are overwritten by the shift or fall outside [0, len).
        unsafe {
            let at = self.base().add(offset);
            let item = at.read();
            ptr::copy(at.add(1), at, self.len - offset - 1);
            self.len -= 1;
            item
        }
    }

    /// Drops `[start, end)` and closes the gap in one shift.
    fn remove_span(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.len);
        let tail = self.len - end;

        // A panicking destructor leaks the tail instead of dropping twice.
        self.len = start;
        // Safety: [start, end) is initialized and no longer tracked by len;
        // [end, end + tail) is initialized and moved down into the gap.
        unsafe {
            let base = self.base();
            ptr::drop_in_place(slice::from_raw_parts_mut(base.add(start), end - start));
            ptr::copy(base.add(end), base.add(start), tail);
        }
        self.len = start + tail;
    }
}

fn alloc_slots<T>(capacity: usize) -> Box<[MaybeUninit<T>]> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, MaybeUninit::uninit);
    slots.into_boxed_slice()
}

impl<T> Sequence for ArrayList<T> {
    type Item = T;
    type Position = ArrayPosition;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn first_position(&self) -> ArrayPosition {
        self.position(0)
    }

    #[inline]
    fn end_position(&self) -> ArrayPosition {
        self.position(self.len)
    }

    #[inline]
    fn step_forward(&self, pos: ArrayPosition) -> Result<ArrayPosition> {
        self.jump_forward(pos, 1)
    }

    #[inline]
    fn step_back(&self, pos: ArrayPosition) -> Result<ArrayPosition> {
        self.jump_back(pos, 1)
    }

    #[inline]
    fn jump_forward(&self, pos: ArrayPosition, n: usize) -> Result<ArrayPosition> {
        let offset = self.locate(pos)?;
        match offset.checked_add(n) {
            Some(target) if target <= self.len => Ok(self.position(target)),
            _ => Err(Error::PastEnd),
        }
    }

    #[inline]
    fn jump_back(&self, pos: ArrayPosition, n: usize) -> Result<ArrayPosition> {
        let offset = self.locate(pos)?;
        offset
            .checked_sub(n)
            .map(|target| self.position(target))
            .ok_or(Error::BeforeBegin)
    }

    #[inline]
    fn value(&self, pos: ArrayPosition) -> Result<&T> {
        let offset = self.locate(pos)?;
        self.as_slice().get(offset).ok_or(Error::DerefEnd)
    }

    #[inline]
    fn value_mut(&mut self, pos: ArrayPosition) -> Result<&mut T> {
        let offset = self.locate(pos)?;
        self.as_mut_slice().get_mut(offset).ok_or(Error::DerefEnd)
    }

    fn insert_at(&mut self, pos: ArrayPosition, item: T) -> Result<ArrayPosition> {
        let offset = self.locate(pos)?;
        self.insert_slot(offset, item);
        Ok(self.position(offset))
    }

    fn erase_at(&mut self, pos: ArrayPosition) -> Result<T> {
        let offset = self.locate(pos)?;
        if offset == self.len {
            return Err(Error::EraseEnd);
        }
        Ok(self.remove_slot(offset))
    }

    fn erase_span(&mut self, first: ArrayPosition, last: ArrayPosition) -> Result<usize> {
        let start = self.locate(first)?;
        let end = self.locate(last)?;
        if start > end {
            return Err(Error::InvertedRange);
        }
        if start == end {
            return Ok(0);
        }

        self.remove_span(start, end);
        tracing::trace!(start, removed = end - start, len = self.len, "array list range erased");
        Ok(end - start)
    }

    #[inline]
    fn append(&mut self, item: T) {
        self.insert_slot(self.len, item);
    }

    #[inline]
    fn prepend(&mut self, item: T) {
        self.insert_slot(0, item);
    }
}

impl<T> Drop for ArrayList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ArrayList<T> {
    /// Deep copy: a fresh array receiving each element by `append`.
    fn clone(&self) -> Self {
        let mut copy = Self::with_growth(self.growth);
        copy.extend(self.iter().cloned());
        copy
    }

    /// Releases the current buffer, allocates one with `source`'s capacity
    /// and appends each element of `source`.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.buf = alloc_slots(source.capacity());
        self.growth = source.growth;
        self.extend(source.iter().cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ArrayList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ArrayList<T> {}

impl<T> Extend<T> for ArrayList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T, const N: usize> From<[T; N]> for ArrayList<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for ArrayList<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T> IntoIterator for ArrayList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArrayList<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn new_is_empty() {
        let array: ArrayList<u64> = ArrayList::new();
        assert!(array.is_empty());
        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), 10);
        assert_eq!(array.cbegin(), array.cend());
    }

    #[test]
    fn append_and_prepend() {
        let mut array = ArrayList::new();
        array.append(2);
        array.append(3);
        array.prepend(1);
        assert_eq!(array.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn insert_middle_shifts_right() {
        let mut array = ArrayList::from([1, 2, 4, 5]);
        let at = array.cbegin().next(&array).unwrap().next(&array).unwrap();

        let inserted = array.insert(at, 3).unwrap();

        assert_eq!(inserted.position().offset(), 2);
        assert_eq!(inserted.current(&array), Ok(&3));
        assert_eq!(array.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn grows_by_fixed_increment() {
        let mut array = ArrayList::with_growth(Growth::fixed(3));
        let mut capacities = Vec::new();
        for i in 0..10 {
            array.append(i);
            capacities.push(array.capacity());
        }
        assert_eq!(capacities, vec![3, 3, 3, 6, 6, 6, 9, 9, 9, 12]);
        assert_eq!(array.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn growth_preserves_order_on_prepend() {
        let mut array = ArrayList::with_growth(Growth::fixed(2));
        for i in 0..7 {
            array.prepend(i);
        }
        assert_eq!(array.as_slice(), &[6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn erase_shifts_left() {
        let mut array = ArrayList::from(['a', 'b', 'c', 'd']);
        let b = array.cbegin().next(&array).unwrap();

        assert_eq!(array.erase(b), Ok('b'));
        assert_eq!(array.as_slice(), &['a', 'c', 'd']);
        // Same offset now denotes the shifted neighbour.
        assert_eq!(b.current(&array), Ok(&'c'));
    }

    #[test]
    fn erase_end_fails_without_mutation() {
        let mut array = ArrayList::from([1, 2]);
        assert_eq!(array.erase(array.cend()), Err(Error::EraseEnd));
        assert_eq!(array.as_slice(), &[1, 2]);
    }

    #[test]
    fn cursor_past_new_end_is_stale() {
        let mut array = ArrayList::from([1, 2, 3]);
        let end = array.cend();
        array.pop_last().unwrap();

        assert_eq!(end.current(&array), Err(Error::Stale));
        assert_eq!(array.erase(end), Err(Error::Stale));
        assert_eq!(array.insert(end, 9), Err(Error::Stale));
    }

    #[test]
    fn foreign_cursor_rejected() {
        let mut a = ArrayList::from([1, 2]);
        let b = ArrayList::from([1, 2]);

        assert_eq!(a.erase(b.cbegin()), Err(Error::Foreign));
        assert_eq!(a.insert(b.cbegin(), 0), Err(Error::Foreign));
        assert_eq!(b.cbegin().current(&a), Err(Error::Foreign));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn erase_range_middle() {
        let mut array: ArrayList<u32> = (0..10).collect();
        let first = array.cbegin().next(&array).unwrap();
        let mut last = first;
        last.advance(&array, 3).unwrap();

        assert_eq!(array.erase_range(first, last), Ok(3));
        assert_eq!(array.as_slice(), &[0, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn erase_range_everything() {
        let mut array: ArrayList<u32> = (0..25).collect();
        let capacity = array.capacity();
        assert_eq!(array.erase_range(array.cbegin(), array.cend()), Ok(25));
        assert!(array.is_empty());
        // No compaction.
        assert_eq!(array.capacity(), capacity);
    }

    #[test]
    fn erase_range_empty_is_noop() {
        let mut array = ArrayList::from([1, 2, 3]);
        let mid = array.cbegin().next(&array).unwrap();
        assert_eq!(array.erase_range(mid, mid), Ok(0));
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn erase_range_inverted() {
        let mut array = ArrayList::from([1, 2, 3]);
        assert_eq!(
            array.erase_range(array.cend(), array.cbegin()),
            Err(Error::InvertedRange)
        );
        assert_eq!(array.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn advance_is_bounds_checked() {
        let array = ArrayList::from([1, 2, 3]);
        let mut cursor = array.cbegin();

        cursor.advance(&array, 3).unwrap();
        assert_eq!(cursor, array.cend());
        assert_eq!(cursor.advance(&array, 1), Err(Error::PastEnd));
        assert_eq!(cursor.advance(&array, usize::MAX), Err(Error::PastEnd));

        cursor.retreat(&array, 2).unwrap();
        assert_eq!(cursor.current(&array), Ok(&2));
        assert_eq!(cursor.retreat(&array, 2), Err(Error::BeforeBegin));
    }

    #[test]
    fn drops_every_element_once() {
        let token = Rc::new(());
        {
            let mut array = ArrayList::with_growth(Growth::fixed(2));
            for _ in 0..9 {
                array.append(Rc::clone(&token));
            }
            assert_eq!(Rc::strong_count(&token), 10);

            drop(array.pop_first().unwrap());
            let first = array.cbegin().next(&array).unwrap();
            let mut last = first;
            last.advance(&array, 3).unwrap();
            array.erase_range(first, last).unwrap();
            assert_eq!(Rc::strong_count(&token), 6);
        }
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn into_vec_moves_elements() {
        let token = Rc::new(());
        let array = ArrayList::from([Rc::clone(&token), Rc::clone(&token)]);
        let vec = array.into_vec();
        assert_eq!(vec.len(), 2);
        assert_eq!(Rc::strong_count(&token), 3);
        drop(vec);
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn clone_is_deep() {
        let mut original = ArrayList::from([String::from("x"), String::from("y")]);
        let copy = original.clone();

        original.as_mut_slice()[0].push('!');
        assert_eq!(copy.as_slice(), ["x", "y"]);
        assert_ne!(copy.cbegin(), original.cbegin());
    }

    #[test]
    fn clone_from_takes_source_capacity() {
        let source: ArrayList<u8> = (0..25).collect();
        let mut target = ArrayList::from([9, 9]);

        target.clone_from(&source);

        assert_eq!(target, source);
        assert_eq!(target.capacity(), source.capacity());
    }

    #[test]
    fn take_leaves_unallocated_source() {
        let mut source = ArrayList::from([1, 2, 3]);
        let moved = source.take();

        assert_eq!(moved.as_slice(), &[1, 2, 3]);
        assert_eq!(source.capacity(), 0);
        assert!(source.is_empty());

        // Still usable.
        source.append(7);
        assert_eq!(source.capacity(), 10);
        assert_eq!(source.as_slice(), &[7]);
    }

    #[test]
    fn current_mut_writes_through() {
        let mut array = ArrayList::from([1, 2, 3]);
        let last = array.end().prev(&array).unwrap();
        *last.current_mut(&mut array).unwrap() *= 10;
        assert_eq!(array.as_slice(), &[1, 2, 30]);
        assert_eq!(array.end().current_mut(&mut array), Err(Error::DerefEnd));
    }

    #[test]
    fn iter_mut_and_into_iter() {
        let mut array = ArrayList::from([1, 2, 3]);
        for value in &mut array {
            *value += 1;
        }
        let collected: Vec<_> = array.into_iter().rev().collect();
        assert_eq!(collected, vec![4, 3, 2]);
    }

    #[test]
    fn zero_sized_elements() {
        let mut array = ArrayList::new();
        for _ in 0..15 {
            array.append(());
        }
        assert_eq!(array.len(), 15);
        assert_eq!(array.pop_first(), Ok(()));
        assert_eq!(array.len(), 14);
    }

    #[test]
    fn debug_format() {
        let array = ArrayList::from([1, 2]);
        assert_eq!(format!("{array:?}"), "[1, 2]");
    }
}
