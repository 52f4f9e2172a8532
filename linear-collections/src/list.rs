//! Doubly-linked list over an arena of nodes.
//!
//! Nodes live in a [`slab::Slab`] owned by the list and link to each other
//! by slab key. One extra node, the sentinel, is allocated at construction
//! and never removed: it carries no value, its `prev` is the last element,
//! and [`end`](crate::Sequence::end) always denotes it.
//!
//! ```text
//! head ──► [c] ◄──► [a] ◄──► [b] ◄──► [sentinel]
//!                                      prev = b
//! ```
//!
//! # Cursor validity
//!
//! A cursor records the node key and the node's stamp. Inserting or erasing
//! relinks at most two neighbours and never moves a node, so every cursor
//! except the one to an erased node stays valid. A cursor to an erased node
//! is rejected with [`Error::Stale`], even after the slab reuses the slot.
//!
//! ```
//! use linear_collections::{Error, LinkedList, Sequence};
//!
//! let mut list = LinkedList::from(["a", "b", "c"]);
//! let first = list.cbegin();
//! let c = first.next(&list).unwrap().next(&list).unwrap();
//!
//! list.erase(first).unwrap();
//!
//! assert_eq!(c.current(&list), Ok(&"c"));
//! assert_eq!(first.current(&list), Err(Error::Stale));
//! ```

use core::fmt;
use core::iter::FusedIterator;
use core::mem;

use slab::Slab;

use crate::cursor::Owner;
use crate::{Error, Result, Sequence};

/// Link value meaning "no node".
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<T> {
    /// `None` only for the sentinel.
    value: Option<T>,
    prev: usize,
    next: usize,
    stamp: u64,
}

/// A position inside a [`LinkedList`]: a node plus the stamp it carried
/// when the position was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListPosition {
    owner: Owner,
    key: usize,
    stamp: u64,
}

/// A doubly-linked list with a permanent end sentinel.
///
/// # Example
///
/// ```
/// use linear_collections::{LinkedList, Sequence};
///
/// let mut list = LinkedList::new();
/// list.append("a");
/// list.append("b");
/// list.prepend("c");
///
/// // O(1) insertion before any cursor.
/// let b = list.cend().prev(&list).unwrap();
/// list.insert(b, "d").unwrap();
///
/// assert!(list.iter().eq(&["c", "a", "d", "b"]));
/// ```
pub struct LinkedList<T> {
    nodes: Slab<Node<T>>,
    /// First real node, or the sentinel when empty.
    head: usize,
    sentinel: usize,
    len: usize,
    next_stamp: u64,
    owner: Owner,
}

impl<T> LinkedList<T> {
    /// Creates an empty list holding only the sentinel.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list whose arena has room for `capacity` elements
    /// before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Slab::with_capacity(capacity + 1);
        let sentinel = nodes.insert(Node {
            value: None,
            prev: NIL,
            next: NIL,
            stamp: 0,
        });

        Self {
            nodes,
            head: sentinel,
            sentinel,
            len: 0,
            next_stamp: 1,
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

    /// Iterator over references, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.nodes[self.sentinel].prev,
            remaining: self.len,
        }
    }

    /// Iterator over mutable references, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let back = self.nodes[self.sentinel].prev;
        IterMut {
            nodes: &mut self.nodes,
            front: self.head,
            back,
            remaining: self.len,
        }
    }

    /// Removes every element, front to back. The sentinel stays.
    pub fn clear(&mut self) {
        let mut key = self.head;
        while key != self.sentinel {
            let next = self.nodes[key].next;
            self.nodes.remove(key);
            key = next;
        }

        self.head = self.sentinel;
        self.nodes[self.sentinel].prev = NIL;
        self.len = 0;
    }

    /// Moves the contents out, leaving `self` as a fresh empty list.
    ///
    /// ```
    /// use linear_collections::{LinkedList, Sequence};
    ///
    /// let mut source = LinkedList::from([1, 2, 3]);
    /// let moved = source.take();
    ///
    /// assert!(source.is_empty());
    /// assert_eq!(source.cbegin(), source.cend());
    /// assert!(moved.iter().eq(&[1, 2, 3]));
    /// ```
    pub fn take(&mut self) -> Self {
        tracing::trace!(len = self.len, "linked list moved out");
        mem::replace(self, Self::new())
    }

    // ========================================================================
    // Node mechanics
    // ========================================================================

    #[inline]
    fn position(&self, key: usize) -> ListPosition {
        ListPosition {
            owner: self.owner,
            key,
            stamp: self.nodes[key].stamp,
        }
    }

    /// Validates `pos` against this list and returns its node key.
    #[inline]
    fn locate(&self, pos: ListPosition) -> Result<usize> {
        if pos.owner != self.owner {
            return Err(Error::Foreign);
        }
        match self.nodes.get(pos.key) {
            Some(node) if node.stamp == pos.stamp => Ok(pos.key),
            _ => Err(Error::Stale),
        }
    }

    /// Allocates a node for `value` and splices it in before `at`.
    fn link_before(&mut self, at: usize, value: T) -> usize {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        let prev = self.nodes[at].prev;
        let key = self.nodes.insert(Node {
            value: Some(value),
            prev,
            next: at,
            stamp,
        });

        self.nodes[at].prev = key;
        if prev == NIL {
            self.head = key;
        } else {
            self.nodes[prev].next = key;
        }

        self.len += 1;
        key
    }

    /// Unlinks and frees a real (non-sentinel) node.
    fn unlink(&mut self, key: usize) -> Option<T> {
        debug_assert_ne!(key, self.sentinel);
        let node = self.nodes.remove(key);

        if node.prev == NIL {
            self.head = node.next;
        } else {
            self.nodes[node.prev].next = node.next;
        }
        self.nodes[node.next].prev = node.prev;

        self.len -= 1;
        node.value
    }
}

impl<T> Sequence for LinkedList<T> {
    type Item = T;
    type Position = ListPosition;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn first_position(&self) -> ListPosition {
        self.position(self.head)
    }

    #[inline]
    fn end_position(&self) -> ListPosition {
        self.position(self.sentinel)
    }

    #[inline]
    fn step_forward(&self, pos: ListPosition) -> Result<ListPosition> {
        let key = self.locate(pos)?;
        if key == self.sentinel {
            return Err(Error::PastEnd);
        }
        Ok(self.position(self.nodes[key].next))
    }

    #[inline]
    fn step_back(&self, pos: ListPosition) -> Result<ListPosition> {
        let key = self.locate(pos)?;
        if key == self.head {
            return Err(Error::BeforeBegin);
        }
        Ok(self.position(self.nodes[key].prev))
    }

    #[inline]
    fn value(&self, pos: ListPosition) -> Result<&T> {
        let key = self.locate(pos)?;
        self.nodes[key].value.as_ref().ok_or(Error::DerefEnd)
    }

    #[inline]
    fn value_mut(&mut self, pos: ListPosition) -> Result<&mut T> {
        let key = self.locate(pos)?;
        self.nodes[key].value.as_mut().ok_or(Error::DerefEnd)
    }

    fn insert_at(&mut self, pos: ListPosition, item: T) -> Result<ListPosition> {
        let at = self.locate(pos)?;
        let key = self.link_before(at, item);
        Ok(self.position(key))
    }

    fn erase_at(&mut self, pos: ListPosition) -> Result<T> {
        let key = self.locate(pos)?;
        if key == self.sentinel {
            return Err(Error::EraseEnd);
        }
        self.unlink(key).ok_or(Error::EraseEnd)
    }

    fn erase_span(&mut self, first: ListPosition, last: ListPosition) -> Result<usize> {
        let start = self.locate(first)?;
        let stop = self.locate(last)?;

        // Measure before freeing anything so a bad range leaves the list intact.
        let mut count = 0;
        let mut key = start;
        while key != stop {
            if key == self.sentinel {
                return Err(Error::InvertedRange);
            }
            key = self.nodes[key].next;
            count += 1;
        }

        let mut key = start;
        for _ in 0..count {
            let next = self.nodes[key].next;
            self.unlink(key);
            key = next;
        }

        if count > 0 {
            tracing::trace!(removed = count, len = self.len, "linked list range erased");
        }
        Ok(count)
    }

    #[inline]
    fn append(&mut self, item: T) {
        self.link_before(self.sentinel, item);
    }

    #[inline]
    fn prepend(&mut self, item: T) {
        self.link_before(self.head, item);
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    /// Deep copy: a fresh list receiving each element by `append`.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        copy.extend(self.iter().cloned());
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(items: [T; N]) -> Self {
        let mut list = Self::with_capacity(N);
        list.extend(items);
        list
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T> {
    nodes: &'a Slab<Node<T>>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T> {
    nodes: &'a mut Slab<Node<T>>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &mut self.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        // Extend lifetime - safe because we visit each node exactly once
        node.value
            .as_mut()
            .map(|value| unsafe { &mut *(value as *mut T) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &mut self.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        // Extend lifetime - safe because we visit each node exactly once
        node.value
            .as_mut()
            .map(|value| unsafe { &mut *(value as *mut T) })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that pops elements off the list.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_first().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_last().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}


#[cfg(test)]
mod bench_cursor_ops {
    use super::*;
    use crate::ArrayList;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:6} cycles | p99: {:6} cycles | p999: {:7} cycles | min: {:6} | max: {:7}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const ITERATIONS: usize = 20_000;

    fn prepend_latency<S: Sequence<Item = u64> + Default>() -> Histogram<u64> {
        let mut seq = S::default();
        let mut hist = Histogram::<u64>::new(3).unwrap();
        for i in 0..ITERATIONS {
            let start = rdtscp();
            seq.prepend(i as u64);
            hist.record(rdtscp() - start).unwrap();
        }
        hist
    }

    fn erase_second_latency<S: Sequence<Item = u64> + Default>() -> Histogram<u64> {
        let mut seq = S::default();
        for i in 0..=ITERATIONS {
            seq.append(i as u64);
        }
        let mut hist = Histogram::<u64>::new(3).unwrap();
        for _ in 0..ITERATIONS {
            let start = rdtscp();
            let second = seq.begin().next(&seq).unwrap();
            seq.erase(second).unwrap();
            hist.record(rdtscp() - start).unwrap();
        }
        hist
    }

    #[test]
    #[ignore]
    fn bench_prepend() {
        print_histogram("list prepend", &prepend_latency::<LinkedList<u64>>());
        print_histogram("array prepend", &prepend_latency::<ArrayList<u64>>());
    }

    #[test]
    #[ignore]
    fn bench_erase_second() {
        print_histogram("list erase second", &erase_second_latency::<LinkedList<u64>>());
        print_histogram("array erase second", &erase_second_latency::<ArrayList<u64>>());
    }
}
