//! # Key Strategies
//!
//! A [`HashTable`](crate::HashTable) never looks at key bytes itself. It hashes them with a
//! [`HashFn`] to pick a slot and compares them with an [`EqualityFn`] to walk the slot's chain.
//!
//! The comparator follows the **three-way compare** convention: it returns `0` when the two keys
//! are equal and any other value when they differ (negative / positive for ordered comparators).
//! It is **not** a boolean "is equal" predicate; returning `1` for a match will make every
//! insertion create a new bucket.
//!
//! ## Provided strategies
//! - [`string_hash`] / [`string_equality`]: treat keys as C text (bytes up to the first NUL).
//!   The hash is a fast, low-quality mixer of length, byte sum and byte XOR, meant for small tables.
//! - [`bytes_hash`] / [`bytes_equality`]: use every byte of the key, for fixed-width binary keys
//!   where a zero byte is data rather than a terminator.
//!
//! **Note**: none of these hashes resist adversarial collisions.

use std::cmp::Ordering;

/// Maps a key to an unsigned hash. Must return the same value for equal keys.
pub type HashFn = fn(&[u8]) -> u32;

/// Compares two keys, returning `0` when they are equal.
pub type EqualityFn = fn(&[u8], &[u8]) -> i32;

const FNV32_OFFSET_BASIS: u32 = 0x811c9dc5;
const FNV32_PRIME: u32 = 16777619;

/// The text part of a key: everything before the first NUL, or the whole slice.
fn c_text(key: &[u8]) -> &[u8] {
    match key.iter().position(|&b| b == 0) {
        Some(end) => &key[..end],
        None => key,
    }
}

fn ordering_to_int(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Hashes a text key as `(len << 16) + (sum << 8) + xor`.
///
/// The running sum and XOR use signed 8-bit arithmetic and the length is kept in 16 bits,
/// so texts with high bytes or more than 32767 bytes wrap the same way on every platform.
pub fn string_hash(key: &[u8]) -> u32 {
    let text = c_text(key);
    let len = text.len() as i16;

    let mut sum: i8 = 0;
    let mut xor: i8 = 0;
    for &byte in text.iter().take(len.max(0) as usize) {
        let c = byte as i8;
        xor ^= c;
        sum = sum.wrapping_add(c);
    }

    ((len as i32 as u32) << 16)
        .wrapping_add((sum as i32 as u32) << 8)
        .wrapping_add(xor as i32 as u32)
}

/// Compares two text keys byte-wise, like `strcmp`.
pub fn string_equality(a: &[u8], b: &[u8]) -> i32 {
    ordering_to_int(c_text(a).cmp(c_text(b)))
}

/// FNV-1a (32-bit) over every byte of the key.
pub fn bytes_hash(key: &[u8]) -> u32 {
    key.iter().fold(FNV32_OFFSET_BASIS, |hash, &byte| {
        (hash ^ byte as u32).wrapping_mul(FNV32_PRIME)
    })
}

/// Compares two keys over their full length, like `memcmp` on equal-width buffers.
pub fn bytes_equality(a: &[u8], b: &[u8]) -> i32 {
    ordering_to_int(a.cmp(b))
}
