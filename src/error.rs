use std::collections::TryReserveError;

use thiserror::Error;

/// Errors produced while building or growing a [`HashTable`](crate::HashTable).
///
/// A missing key is not an error: lookups report it with `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The table was configured with zero slots.
    #[error("bucket count must be greater than zero")]
    ZeroBuckets,

    /// A copied key mode was requested with a zero byte width.
    #[error("copied keys need a width of at least one byte")]
    ZeroKeyWidth,

    /// A key handed to a copying table is shorter than the configured width.
    #[error("key is {actual} bytes long but the table copies {expected} bytes")]
    KeyTooShort { expected: usize, actual: usize },

    /// `insert_copied` was called on a table that borrows its keys.
    #[error("table borrows its keys and cannot take a short-lived key")]
    KeysNotCopied,

    /// The allocator refused to grow one of the table's buffers.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;
