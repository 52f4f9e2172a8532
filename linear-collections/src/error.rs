//! Error types for container and cursor operations.
//!
//! Every failure is reported to the immediate caller. Checks run before any
//! mutation, so a container is unchanged after an operation returns `Err`.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A failed container or cursor operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// `pop_first`/`pop_last` on a container with no elements.
    #[error("empty collection")]
    Empty,

    /// Erase was asked to remove the end position.
    #[error("cannot erase the end position")]
    EraseEnd,

    /// The cursor sits at the end position and has no element.
    #[error("cannot dereference the end position")]
    DerefEnd,

    /// The cursor is already at the end position.
    #[error("cannot advance past the end position")]
    PastEnd,

    /// The cursor is already at the first position.
    #[error("cannot retreat before the first position")]
    BeforeBegin,

    /// The cursor's position no longer exists in the container.
    #[error("cursor was invalidated by a structural mutation")]
    Stale,

    /// The cursor was obtained from a different container instance.
    #[error("cursor belongs to a different container")]
    Foreign,

    /// The end of a range precedes its start.
    #[error("range end precedes range start")]
    InvertedRange,
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Removal from a container with no elements.
    EmptyCollection,
    /// Erasure of the end position.
    OutOfRange,
    /// Dereferencing or moving a cursor outside `[begin, end]`, or using a
    /// cursor whose position was removed.
    InvalidPosition,
    /// Arguments that can never be valid together (foreign cursors,
    /// inverted ranges).
    Precondition,
}

impl Error {
    /// Returns the class of condition this error signals.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Empty => ErrorKind::EmptyCollection,
            Error::EraseEnd => ErrorKind::OutOfRange,
            Error::DerefEnd | Error::PastEnd | Error::BeforeBegin | Error::Stale => {
                ErrorKind::InvalidPosition
            }
            Error::Foreign | Error::InvertedRange => ErrorKind::Precondition,
        }
    }
}
