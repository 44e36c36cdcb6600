//! A fixed-size, separately chained hash table whose keys can carry several values.
//!
//! See [`table`] for the container and [`strategy`] for the hash and equality functions it
//! ships with.

pub mod error;
pub mod strategy;
pub mod table;

pub use error::{Error, Result};
pub use strategy::{
    bytes_equality, bytes_hash, string_equality, string_hash, EqualityFn, HashFn,
};
pub use table::{Chain, HashTable, HashTableBuilder, KeyMode, Lookup, TableStats};
