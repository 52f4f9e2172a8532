//! Two linear sequence containers behind one cursor contract.
//!
//! [`ArrayList`] keeps its elements in one contiguous buffer that grows by a
//! fixed increment. [`LinkedList`] keeps each element in its own node, linked
//! in both directions, with a permanent sentinel at the end. Both implement
//! [`Sequence`], so code written against the trait runs on either and the two
//! storage strategies can be compared directly.
//!
//! # Cursors
//!
//! Positions are addressed with [`Cursor`]s: `Copy` handles that borrow
//! nothing and are passed back to the container for every read, move or
//! edit. A cursor lies in `[begin, end]`; `end` is one past the last element
//! and cannot be dereferenced.
//!
//! ```
//! use linear_collections::{LinkedList, Sequence};
//!
//! let mut list = LinkedList::new();
//! list.append("a");
//! list.append("b");
//! list.prepend("c");
//!
//! let mut cursor = list.cbegin();
//! let mut seen = Vec::new();
//! while cursor != list.cend() {
//!     seen.push(*cursor.current(&list).unwrap());
//!     cursor.move_next(&list).unwrap();
//! }
//! assert_eq!(seen, ["c", "a", "b"]);
//! ```
//!
//! # Cost model
//!
//! | Operation | [`ArrayList`] | [`LinkedList`] |
//! |-----------|---------------|----------------|
//! | `append` | amortized O(n) (linear growth) | O(1) |
//! | `prepend` | O(n) | O(1) |
//! | `insert` / `erase` at a cursor | O(n) | O(1) |
//! | `advance(n)` | O(1) | O(n) |
//!
//! # Invalid cursors
//!
//! Operations never trust a cursor blindly. A cursor from another container
//! is rejected with [`Error::Foreign`]; a cursor whose position no longer
//! exists is rejected with [`Error::Stale`]. Checks run before any mutation.
//!
//! ```
//! use linear_collections::{ArrayList, Error, Sequence};
//!
//! let mut a = ArrayList::from([1, 2, 3]);
//! let b = ArrayList::from([1, 2, 3]);
//!
//! assert_eq!(a.erase(b.cbegin()), Err(Error::Foreign));
//! assert_eq!(a.erase(a.cend()), Err(Error::EraseEnd));
//! assert_eq!(a.len(), 3);
//! ```

#![warn(missing_docs)]

pub mod array;
pub mod cursor;
pub mod error;
pub mod growth;
pub mod list;
pub mod sequence;

pub use array::{ArrayList, ArrayPosition};
pub use cursor::{Access, Cursor, CursorMut, ReadOnly, Writable};
pub use error::{Error, ErrorKind, Result};
pub use growth::{Growth, DEFAULT_INCREMENT};
pub use list::{LinkedList, ListPosition};
pub use sequence::Sequence;
