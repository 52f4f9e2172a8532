//! Capacity growth policy for [`ArrayList`](crate::ArrayList).
//!
//! Growth is linear: a full buffer gains a fixed number of slots. Appending
//! `n` elements therefore costs `O(n²)` element moves in total, which is the
//! schedule the container is meant to exhibit.

/// Slots allocated up front and added on every growth by default.
pub const DEFAULT_INCREMENT: usize = 10;

/// Fixed-increment growth policy.
///
/// # Example
///
/// ```
/// use linear_collections::Growth;
///
/// let growth = Growth::fixed(4);
/// assert_eq!(growth.initial_capacity(), 4);
///
/// // Room left: nothing to do.
/// assert_eq!(growth.next_capacity(3, 4), 4);
/// // Full: grow by one increment.
/// assert_eq!(growth.next_capacity(4, 4), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Growth {
    initial: usize,
    increment: usize,
}

impl Growth {
    /// Creates a policy that starts with `increment` slots and adds
    /// `increment` slots whenever the buffer is full.
    ///
    /// # Panics
    ///
    /// Panics if `increment` is 0.
    pub const fn fixed(increment: usize) -> Self {
        assert!(increment > 0, "growth increment must be > 0");
        Self {
            initial: increment,
            increment,
        }
    }

    /// Overrides the capacity allocated at construction.
    ///
    /// # Panics
    ///
    /// Panics if `initial` is 0.
    pub const fn with_initial(self, initial: usize) -> Self {
        assert!(initial > 0, "initial capacity must be > 0");
        Self { initial, ..self }
    }

    /// Capacity allocated when a container is constructed.
    #[inline]
    pub const fn initial_capacity(&self) -> usize {
        self.initial
    }

    /// Slots added per growth event.
    #[inline]
    pub const fn increment(&self) -> usize {
        self.increment
    }

    /// Capacity required to insert one more element into a buffer holding
    /// `len` elements in `capacity` slots.
    ///
    /// Returns `capacity` unchanged while there is room.
    #[inline]
    pub const fn next_capacity(&self, len: usize, capacity: usize) -> usize {
        if len < capacity {
            capacity
        } else {
            capacity + self.increment
        }
    }
}

impl Default for Growth {
    fn default() -> Self {
        Self::fixed(DEFAULT_INCREMENT)
    }
}
