//! The operation set shared by [`ArrayList`](crate::ArrayList) and
//! [`LinkedList`](crate::LinkedList).
//!
//! Implementors supply raw position primitives (`step_*`, `jump_*`, `value*`,
//! `*_at`). The cursor API callers normally use is provided on top of them,
//! so both containers share one definition of it.

use core::fmt;

use crate::cursor::{Access, Cursor, CursorMut};
use crate::{Error, Result};

/// A bidirectional sequence container addressed through [`Cursor`]s.
///
/// # Example
///
/// Code written against `Sequence` runs unchanged on either container:
///
/// ```
/// use linear_collections::{ArrayList, LinkedList, Sequence};
///
/// fn rotate_left<S: Sequence>(seq: &mut S) -> linear_collections::Result<()> {
///     let first = seq.pop_first()?;
///     seq.append(first);
///     Ok(())
/// }
///
/// let mut array = ArrayList::from([1, 2, 3]);
/// let mut list = LinkedList::from([1, 2, 3]);
/// rotate_left(&mut array).unwrap();
/// rotate_left(&mut list).unwrap();
///
/// assert!(array.iter().eq(list.iter()));
/// ```
pub trait Sequence {
    /// Element type.
    type Item;

    /// Raw position type wrapped by this container's cursors.
    type Position: Copy + Eq + fmt::Debug;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Position primitives
    // ========================================================================

    /// Position of the first element, or the end position if empty.
    fn first_position(&self) -> Self::Position;

    /// Position one past the last element.
    fn end_position(&self) -> Self::Position;

    /// Position following `pos`.
    fn step_forward(&self, pos: Self::Position) -> Result<Self::Position>;

    /// Position preceding `pos`.
    fn step_back(&self, pos: Self::Position) -> Result<Self::Position>;

    /// Position `n` steps after `pos`.
    ///
    /// The default walks one step at a time; containers with random access
    /// override it.
    fn jump_forward(&self, pos: Self::Position, n: usize) -> Result<Self::Position> {
        let mut target = pos;
        for _ in 0..n {
            target = self.step_forward(target)?;
        }
        Ok(target)
    }

    /// Position `n` steps before `pos`.
    fn jump_back(&self, pos: Self::Position, n: usize) -> Result<Self::Position> {
        let mut target = pos;
        for _ in 0..n {
            target = self.step_back(target)?;
        }
        Ok(target)
    }

    /// Element at `pos`.
    fn value(&self, pos: Self::Position) -> Result<&Self::Item>;

    /// Mutable element at `pos`.
    fn value_mut(&mut self, pos: Self::Position) -> Result<&mut Self::Item>;

    // ========================================================================
    // Structural primitives
    // ========================================================================

    /// Inserts `item` before `pos`, returning the position of the new element.
    fn insert_at(&mut self, pos: Self::Position, item: Self::Item) -> Result<Self::Position>;

    /// Removes and returns the element at `pos`.
    fn erase_at(&mut self, pos: Self::Position) -> Result<Self::Item>;

    /// Removes `[first, last)`, returning the number of elements removed.
    fn erase_span(&mut self, first: Self::Position, last: Self::Position) -> Result<usize>;

    /// Inserts `item` after the last element.
    ///
    /// Same effect as `insert(end(), item)`, which cannot fail.
    fn append(&mut self, item: Self::Item);

    /// Inserts `item` before the first element.
    ///
    /// Same effect as `insert(begin(), item)`, which cannot fail.
    fn prepend(&mut self, item: Self::Item);

    // ========================================================================
    // Cursor API
    // ========================================================================

    /// Writable cursor at the first element.
    #[inline]
    fn begin(&self) -> CursorMut<Self::Position> {
        Cursor::new(self.first_position())
    }

    /// Writable cursor at the end position.
    #[inline]
    fn end(&self) -> CursorMut<Self::Position> {
        Cursor::new(self.end_position())
    }

    /// Read-only cursor at the first element.
    #[inline]
    fn cbegin(&self) -> Cursor<Self::Position> {
        Cursor::new(self.first_position())
    }

    /// Read-only cursor at the end position.
    #[inline]
    fn cend(&self) -> Cursor<Self::Position> {
        Cursor::new(self.end_position())
    }

    /// Inserts `item` immediately before `at`.
    ///
    /// Returns a cursor to the inserted element.
    ///
    /// # Errors
    ///
    /// [`Error::Foreign`] or [`Error::Stale`] if `at` does not denote a
    /// position of this container.
    #[inline]
    fn insert<A: Access>(
        &mut self,
        at: Cursor<Self::Position, A>,
        item: Self::Item,
    ) -> Result<CursorMut<Self::Position>> {
        self.insert_at(at.position(), item).map(Cursor::new)
    }

    /// Removes and returns the element at `at`.
    ///
    /// # Errors
    ///
    /// [`Error::EraseEnd`] if `at` is the end position.
    #[inline]
    fn erase<A: Access>(&mut self, at: Cursor<Self::Position, A>) -> Result<Self::Item> {
        self.erase_at(at.position())
    }

    /// Removes the half-open range `[first, last)`.
    ///
    /// Returns the number of elements removed. Nothing is removed when the
    /// range is rejected.
    ///
    /// # Errors
    ///
    /// [`Error::InvertedRange`] if `last` precedes `first`.
    #[inline]
    fn erase_range<A: Access, B: Access>(
        &mut self,
        first: Cursor<Self::Position, A>,
        last: Cursor<Self::Position, B>,
    ) -> Result<usize> {
        self.erase_span(first.position(), last.position())
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if there are no elements.
    #[inline]
    fn pop_first(&mut self) -> Result<Self::Item> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let first = self.first_position();
        self.erase_at(first)
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if there are no elements.
    #[inline]
    fn pop_last(&mut self) -> Result<Self::Item> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let last = self.step_back(self.end_position())?;
        self.erase_at(last)
    }
}
