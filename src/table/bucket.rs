use std::num::NonZeroUsize;

use crate::error::{Error, Result};

/// Index of a bucket in the table's arena.
pub(crate) type BucketId = usize;

/// How a table stores the keys handed to it. Chosen once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// The table keeps the caller's reference and never copies or frees it.
    Borrowed,
    /// The table copies exactly this many leading bytes of each new key into a buffer it owns.
    Copied(NonZeroUsize),
}

impl KeyMode {
    /// A copying mode of `width` bytes.
    pub fn copied(width: usize) -> Result<Self> {
        NonZeroUsize::new(width)
            .map(KeyMode::Copied)
            .ok_or(Error::ZeroKeyWidth)
    }

    /// Maps a key size to a mode: `0` borrows keys, anything else copies that many bytes.
    pub fn from_key_size(key_size: usize) -> Self {
        NonZeroUsize::new(key_size).map_or(KeyMode::Borrowed, KeyMode::Copied)
    }

    /// The number of bytes copied per key, `0` for borrowed keys.
    pub fn key_size(&self) -> usize {
        match self {
            KeyMode::Borrowed => 0,
            KeyMode::Copied(width) => width.get(),
        }
    }
}

/// A bucket's key: either the caller's reference or the table's own copy.
#[derive(Debug)]
pub(crate) enum StoredKey<'k> {
    Borrowed(&'k [u8]),
    Owned(Box<[u8]>),
}

/// The leading `width` bytes of `key`, which a copying table hashes, compares and stores.
pub(crate) fn key_prefix(key: &[u8], width: usize) -> Result<&[u8]> {
    key.get(..width).ok_or(Error::KeyTooShort {
        expected: width,
        actual: key.len(),
    })
}

impl<'k> StoredKey<'k> {
    /// Copies `key` into a buffer owned by the table.
    pub(crate) fn copy(key: &[u8]) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(key.len())?;
        buf.extend_from_slice(key);
        Ok(StoredKey::Owned(buf.into_boxed_slice()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        match self {
            StoredKey::Borrowed(key) => *key,
            StoredKey::Owned(key) => &key[..],
        }
    }
}

/// One chain node: a distinct key and every value inserted under it, oldest first.
#[derive(Debug)]
pub(crate) struct Bucket<'k, V> {
    pub(crate) key: StoredKey<'k>,
    pub(crate) values: Vec<V>,
    pub(crate) next: Option<BucketId>,
}
