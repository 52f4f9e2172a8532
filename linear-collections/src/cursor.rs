//! Position handles shared by both containers.
//!
//! A [`Cursor`] is a detached, `Copy` handle to a position inside one
//! container instance, in the range `[begin, end]`. It borrows nothing, so a
//! cursor can be handed back to the container that produced it for
//! `insert`/`erase` while the caller keeps other cursors around.
//!
//! Every read or movement takes the container as an argument, the same way a
//! slab key is paired with its slab:
//!
//! ```
//! use linear_collections::{LinkedList, Sequence};
//!
//! let list = LinkedList::from(["a", "b", "c"]);
//!
//! let mut cursor = list.cbegin();
//! cursor.move_next(&list).unwrap();
//! assert_eq!(cursor.current(&list), Ok(&"b"));
//!
//! cursor.advance(&list, 2).unwrap();
//! assert_eq!(cursor, list.cend());
//! ```
//!
//! # Capabilities
//!
//! The access marker decides whether the cursor can hand out `&mut T`.
//! [`begin`](crate::Sequence::begin)/[`end`](crate::Sequence::end) return
//! [`CursorMut`]; [`cbegin`](crate::Sequence::cbegin)/
//! [`cend`](crate::Sequence::cend) return read-only cursors. Both share all
//! positioning logic below; only [`Cursor::current_mut`] is gated.
//!
//! ```
//! use linear_collections::{ArrayList, Sequence};
//!
//! let mut array = ArrayList::from([1, 2, 3]);
//!
//! let cursor = array.begin();
//! *cursor.current_mut(&mut array).unwrap() = 10;
//! assert_eq!(array.as_slice(), &[10, 2, 3]);
//! ```
//!
//! ```compile_fail
//! use linear_collections::{ArrayList, Sequence};
//!
//! let mut array = ArrayList::from([1, 2, 3]);
//! let cursor = array.cbegin();
//! *cursor.current_mut(&mut array).unwrap() = 10; // read-only cursor
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::{Result, Sequence};

mod sealed {
    pub trait Sealed {}
}

/// Access capability carried by a [`Cursor`].
pub trait Access: sealed::Sealed + 'static {
    /// Whether cursors with this capability yield `&mut T`.
    const WRITABLE: bool;
}

/// Capability of cursors that can only read.
#[derive(Debug)]
pub enum ReadOnly {}

/// Capability of cursors that can also write.
#[derive(Debug)]
pub enum Writable {}

impl sealed::Sealed for ReadOnly {}
impl sealed::Sealed for Writable {}

impl Access for ReadOnly {
    const WRITABLE: bool = false;
}

impl Access for Writable {
    const WRITABLE: bool = true;
}

/// A cursor that can also write through to the element it denotes.
pub type CursorMut<P> = Cursor<P, Writable>;

/// Identity of a container instance, embedded in its positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Owner(u64);

impl Owner {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Owner(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A bidirectional position handle into a [`Sequence`].
///
/// `P` is the container's position type and `A` its access capability.
/// Cursors compare equal when they denote the same position of the same
/// container, regardless of capability.
pub struct Cursor<P, A: Access = ReadOnly> {
    pos: P,
    _access: PhantomData<A>,
}

impl<P: Copy, A: Access> Cursor<P, A> {
    #[inline]
    pub(crate) const fn new(pos: P) -> Self {
        Self {
            pos,
            _access: PhantomData,
        }
    }

    /// Returns the raw position this cursor denotes.
    #[inline]
    pub fn position(&self) -> P {
        self.pos
    }

    /// Drops the write capability.
    #[inline]
    pub fn read_only(self) -> Cursor<P, ReadOnly> {
        Cursor::new(self.pos)
    }

    /// Moves one position towards the end.
    ///
    /// # Errors
    ///
    /// [`Error::PastEnd`](crate::Error::PastEnd) if already at the end. The
    /// cursor is left where it was.
    #[inline]
    pub fn move_next<S>(&mut self, seq: &S) -> Result<()>
    where
        S: Sequence<Position = P> + ?Sized,
    {
        self.pos = seq.step_forward(self.pos)?;
        Ok(())
    }

    /// Moves one position towards the beginning.
    ///
    /// # Errors
    ///
    /// [`Error::BeforeBegin`](crate::Error::BeforeBegin) if already at the
    /// first position.
    #[inline]
    pub fn move_prev<S>(&mut self, seq: &S) -> Result<()>
    where
        S: Sequence<Position = P> + ?Sized,
    {
        self.pos = seq.step_back(self.pos)?;
        Ok(())
    }

    /// Moves `n` positions towards the end.
    ///
    /// Fails without moving if fewer than `n` positions remain.
    #[inline]
    pub fn advance<S>(&mut self, seq: &S, n: usize) -> Result<()>
    where
        S: Sequence<Position = P> + ?Sized,
    {
        self.pos = seq.jump_forward(self.pos, n)?;
        Ok(())
    }

    /// Moves `n` positions towards the beginning.
    ///
    /// Fails without moving if fewer than `n` positions precede the cursor.
    #[inline]
    pub fn retreat<S>(&mut self, seq: &S, n: usize) -> Result<()>
    where
        S: Sequence<Position = P> + ?Sized,
    {
        self.pos = seq.jump_back(self.pos, n)?;
        Ok(())
    }

    /// Returns the cursor one position further on.
    #[inline]
    pub fn next<S>(mut self, seq: &S) -> Result<Self>
    where
        S: Sequence<Position = P> + ?Sized,
    {
        self.move_next(seq)?;
        Ok(self)
    }

    /// Returns the cursor one position back.
    #[inline]
    pub fn prev<S>(mut self, seq: &S) -> Result<Self>
    where
        S: Sequence<Position = P> + ?Sized,
    {
        self.move_prev(seq)?;
        Ok(self)
    }

    /// Returns a reference to the element at the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::DerefEnd`](crate::Error::DerefEnd) at the end position, or
    /// an invalid-position error if the cursor no longer fits `seq`.
    #[inline]
    pub fn current<'a, S>(&self, seq: &'a S) -> Result<&'a S::Item>
    where
        S: Sequence<Position = P> + ?Sized,
    {
        seq.value(self.pos)
    }
}

impl<P: Copy> Cursor<P, Writable> {
    /// Returns a mutable reference to the element at the cursor.
    ///
    /// Fails under the same conditions as [`current`](Cursor::current).
    #[inline]
    pub fn current_mut<'a, S>(&self, seq: &'a mut S) -> Result<&'a mut S::Item>
    where
        S: Sequence<Position = P> + ?Sized,
    {
        seq.value_mut(self.pos)
    }
}

impl<P: Copy> From<CursorMut<P>> for Cursor<P, ReadOnly> {
    #[inline]
    fn from(cursor: CursorMut<P>) -> Self {
        cursor.read_only()
    }
}

impl<P: Copy, A: Access> Clone for Cursor<P, A> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Copy, A: Access> Copy for Cursor<P, A> {}

impl<P: PartialEq, A: Access, B: Access> PartialEq<Cursor<P, B>> for Cursor<P, A> {
    #[inline]
    fn eq(&self, other: &Cursor<P, B>) -> bool {
        self.pos == other.pos
    }
}

impl<P: Eq, A: Access> Eq for Cursor<P, A> {}

impl<P: Hash, A: Access> Hash for Cursor<P, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl<P: fmt::Debug, A: Access> fmt::Debug for Cursor<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.pos)
            .field("writable", &A::WRITABLE)
            .finish()
    }
}
