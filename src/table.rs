//! # Multi-Valued Chained Hash Table
//!
//! This module implements a **fixed-size hash table** using **separate chaining**, where every key
//! may collect **several values** over repeated insertions.
//! It supports:
//! - **Pluggable** hash and equality strategies (plain `fn` pointers, see [`crate::strategy`]).
//! - **Borrowed or copied keys**, selected once per table with [`KeyMode`].
//! - **Optional value ownership**: a table either releases its values when destroyed, or hands
//!   them back to the caller.
//! - **Insert**, **lookup** and **contains** with expected **O(1)** cost for well-spread hashes.
//!
//! The slot count is fixed at creation and the table never rehashes, so long chains stay long.
//! Keys and values are only ever added; there is no removal.
//!
//! ## Example
//! ```rust
//! use multitable::HashTableBuilder;
//!
//! let mut table = HashTableBuilder::new().with_bucket_count(16).build().unwrap();
//! table.insert(b"a", "1").unwrap();
//! table.insert(b"b", "2").unwrap();
//! table.insert(b"a", "3").unwrap();
//!
//! let hit = table.lookup(b"a").unwrap();
//! assert_eq!(hit.values(), &["1", "3"]);
//! assert!(!table.contains(b"c"));
//! ```

mod bucket;

use std::fmt;

use crate::error::{Error, Result};
use crate::strategy::{string_equality, string_hash, EqualityFn, HashFn};

use bucket::{key_prefix, Bucket, BucketId, StoredKey};
pub use bucket::KeyMode;

/// Default number of slots if none specified.
const DEFAULT_BUCKET_COUNT: usize = 16;

/// A separately chained hash table mapping byte keys to one or more values.
///
/// Borrowed keys must outlive the table (`'k`). Chains live in an arena of buckets; each slot
/// holds the index of its most recently created bucket.
#[derive(Debug)]
pub struct HashTable<'k, V> {
    slots: Vec<Option<BucketId>>,
    buckets: Vec<Bucket<'k, V>>,
    value_count: usize,
    key_mode: KeyMode,
    owns_values: bool,
    hash_fn: HashFn,
    equality_fn: EqualityFn,
}

/// A successful lookup: the stored key and a view of its values in insertion order.
#[derive(Debug)]
pub struct Lookup<'a, V> {
    key: &'a [u8],
    values: &'a [V],
}

impl<'a, V> Lookup<'a, V> {
    /// The table's own key instance: the copy in [`KeyMode::Copied`] tables, the reference
    /// passed to the first matching insert in [`KeyMode::Borrowed`] tables.
    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    /// Values stored under the key, oldest first. Never empty.
    pub fn values(&self) -> &'a [V] {
        self.values
    }

    /// Number of values stored under the key.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

/// Iterator over the stored keys of one slot, returned by [`HashTable::chain`].
#[derive(Debug)]
pub struct Chain<'a, 'k, V> {
    buckets: &'a [Bucket<'k, V>],
    cursor: Option<BucketId>,
}

impl<'a, 'k, V> Iterator for Chain<'a, 'k, V> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = &self.buckets[self.cursor?];
        self.cursor = bucket.next;
        Some(bucket.key.as_bytes())
    }
}

/// Occupancy figures for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Number of distinct keys.
    pub keys: usize,
    /// Number of values across all keys.
    pub values: usize,
    /// Number of slots.
    pub bucket_count: usize,
    /// Slots holding at least one bucket.
    pub occupied_slots: usize,
    /// Buckets in the longest chain.
    pub longest_chain: usize,
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} keys, {} values, {}/{} slots used, longest chain {}",
            self.keys, self.values, self.occupied_slots, self.bucket_count, self.longest_chain
        )
    }
}

/// A builder for [`HashTable`].
/// Typically you'll call `.with_bucket_count(...)`, `.with_key_size(...)`, etc., then `.build()`.
#[derive(Debug, Clone)]
pub struct HashTableBuilder {
    bucket_count: usize,
    key_mode: KeyMode,
    owns_values: bool,
    hash_fn: HashFn,
    equality_fn: EqualityFn,
}

impl Default for HashTableBuilder {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            key_mode: KeyMode::Borrowed,
            owns_values: false,
            hash_fn: string_hash,
            equality_fn: string_equality,
        }
    }
}

impl HashTableBuilder {
    /// Creates a builder for a 16-slot table of borrowed text keys whose values stay with the caller.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the number of slots. It never changes afterwards.
    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    /// Sets how keys are stored.
    pub fn with_key_mode(mut self, key_mode: KeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    /// Sets the key mode from a byte width: `0` borrows keys, a positive width copies them.
    pub fn with_key_size(self, key_size: usize) -> Self {
        self.with_key_mode(KeyMode::from_key_size(key_size))
    }

    /// If set, the table releases its values when destroyed instead of returning them.
    pub fn with_owned_values(mut self, owns_values: bool) -> Self {
        self.owns_values = owns_values;
        self
    }

    /// Sets the hash strategy.
    pub fn with_hash_fn(mut self, hash_fn: HashFn) -> Self {
        self.hash_fn = hash_fn;
        self
    }

    /// Sets the equality strategy. It must return `0` for equal keys.
    pub fn with_equality_fn(mut self, equality_fn: EqualityFn) -> Self {
        self.equality_fn = equality_fn;
        self
    }

    /// Build the final `HashTable`.
    pub fn build<'k, V>(self) -> Result<HashTable<'k, V>> {
        HashTable::new(
            self.bucket_count,
            self.key_mode,
            self.owns_values,
            self.hash_fn,
            self.equality_fn,
        )
    }
}

impl<'k, V> HashTable<'k, V> {
    /// Creates an empty table with `bucket_count` empty slots.
    pub fn new(
        bucket_count: usize,
        key_mode: KeyMode,
        owns_values: bool,
        hash_fn: HashFn,
        equality_fn: EqualityFn,
    ) -> Result<Self> {
        if bucket_count == 0 {
            return Err(Error::ZeroBuckets);
        }
        let mut slots = Vec::new();
        slots.try_reserve_exact(bucket_count)?;
        slots.resize(bucket_count, None);

        log::debug!(
            "created hash table: {} slots, key size {}, owns values: {}",
            bucket_count,
            key_mode.key_size(),
            owns_values
        );

        Ok(HashTable {
            slots,
            buckets: Vec::new(),
            value_count: 0,
            key_mode,
            owns_values,
            hash_fn,
            equality_fn,
        })
    }

    /// Returns a builder with default settings.
    pub fn builder() -> HashTableBuilder {
        HashTableBuilder::new()
    }

    /// Adds `value` under `key`.
    ///
    /// An equal key already in the table gains another value; nothing is overwritten.
    /// A new key is stored as given ([`KeyMode::Borrowed`]) or copied ([`KeyMode::Copied`]).
    /// A copying table hashes, compares and stores only the first `width` bytes of the key.
    /// On error the table is unchanged and `value` is dropped.
    pub fn insert(&mut self, key: &'k [u8], value: V) -> Result<()> {
        let key_mode = self.key_mode;
        self.insert_with(key, value, |table_key| match key_mode {
            KeyMode::Borrowed => Ok(StoredKey::Borrowed(key)),
            KeyMode::Copied(_) => StoredKey::copy(table_key),
        })
    }

    /// Adds `value` under a key the caller may reuse or free right after the call.
    ///
    /// Only copying tables accept this; a borrowing table returns [`Error::KeysNotCopied`].
    pub fn insert_copied(&mut self, key: &[u8], value: V) -> Result<()> {
        match self.key_mode {
            KeyMode::Borrowed => Err(Error::KeysNotCopied),
            KeyMode::Copied(_) => self.insert_with(key, value, StoredKey::copy),
        }
    }

    fn insert_with<F>(&mut self, key: &[u8], value: V, store_key: F) -> Result<()>
    where
        F: FnOnce(&[u8]) -> Result<StoredKey<'k>>,
    {
        let key = match self.key_mode {
            KeyMode::Borrowed => key,
            KeyMode::Copied(width) => key_prefix(key, width.get())?,
        };

        let slot = self.slot_of(key);
        match self.find_in_slot(slot, key) {
            Some(id) => {
                let values = &mut self.buckets[id].values;
                values.try_reserve(1)?;
                values.push(value);
            }
            None => {
                self.buckets.try_reserve(1)?;
                let mut values = Vec::new();
                values.try_reserve(1)?;
                let stored = store_key(key)?;
                values.push(value);

                let id = self.buckets.len();
                log::trace!("slot {slot}: new bucket {id}");
                self.buckets.push(Bucket {
                    key: stored,
                    values,
                    next: self.slots[slot],
                });
                self.slots[slot] = Some(id);
            }
        }
        self.value_count += 1;
        Ok(())
    }

    /// Returns true if a key equal to `key` has been inserted.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.find(key).is_some()
    }

    /// Returns the stored key and every value inserted under keys equal to `key`,
    /// or `None` if there are none.
    ///
    /// The values are a view into the table, not a copy.
    pub fn lookup(&self, key: &[u8]) -> Option<Lookup<'_, V>> {
        self.find(key).map(|id| {
            let bucket = &self.buckets[id];
            Lookup {
                key: bucket.key.as_bytes(),
                values: &bucket.values,
            }
        })
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the number of values across all keys.
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    /// Returns the number of slots, fixed at creation.
    pub fn bucket_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns how this table stores its keys.
    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    /// Returns true if the table releases its values when destroyed.
    pub fn owns_values(&self) -> bool {
        self.owns_values
    }

    /// Returns the stored keys of one slot in chain order, most recently created first.
    /// An out-of-range slot yields nothing.
    pub fn chain(&self, slot: usize) -> Chain<'_, 'k, V> {
        Chain {
            buckets: &self.buckets,
            cursor: self.slots.get(slot).copied().flatten(),
        }
    }

    /// Computes occupancy figures by walking every chain.
    pub fn stats(&self) -> TableStats {
        let mut occupied_slots = 0;
        let mut longest_chain = 0;
        for slot in 0..self.slots.len() {
            let length = self.chain(slot).count();
            if length > 0 {
                occupied_slots += 1;
            }
            longest_chain = longest_chain.max(length);
        }
        TableStats {
            keys: self.len(),
            values: self.value_count,
            bucket_count: self.bucket_count(),
            occupied_slots,
            longest_chain,
        }
    }

    /// Tears the table down.
    ///
    /// Copied keys and every bucket are released. If the table owns its values they are
    /// released too and the result is empty; otherwise the values are returned, grouped by key
    /// in key creation order and oldest first within a key.
    pub fn destroy(self) -> Vec<V> {
        log::debug!("destroying hash table: {}", self.stats());
        if self.owns_values {
            return Vec::new();
        }
        let mut released = Vec::with_capacity(self.value_count);
        for bucket in self.buckets {
            released.extend(bucket.values);
        }
        released
    }

    /// Internal function computing the slot for a given key.
    fn slot_of(&self, key: &[u8]) -> usize {
        (self.hash_fn)(key) as usize % self.slots.len()
    }

    /// Probes of a copying table are cut to the key width; shorter probes are compared as given.
    fn find(&self, key: &[u8]) -> Option<BucketId> {
        let key = match self.key_mode {
            KeyMode::Borrowed => key,
            KeyMode::Copied(width) => key.get(..width.get()).unwrap_or(key),
        };
        self.find_in_slot(self.slot_of(key), key)
    }

    /// Walks a chain while the comparator reports a mismatch (non-zero).
    fn find_in_slot(&self, slot: usize, key: &[u8]) -> Option<BucketId> {
        let mut cursor = self.slots[slot];
        while let Some(id) = cursor {
            let bucket = &self.buckets[id];
            if (self.equality_fn)(bucket.key.as_bytes(), key) == 0 {
                return Some(id);
            }
            cursor = bucket.next;
        }
        None
    }
}
