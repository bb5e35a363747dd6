//! A string-keyed associative container, bucketed by hash with chained
//! collision resolution.
//!
//! `Dict` backs object-kind values in the tree. Keys are hashed with a
//! polynomial rolling hash into a fixed number of buckets; each bucket is an
//! independently growable sequence of entries. The container keeps an owned
//! copy of every key it stores, and it never removes entries (short of
//! [`clear`](Dict::clear)) — it only grows.
//!
//! Enumeration order (ordinal access and iteration) is bucket-index order,
//! then append order within each bucket. It is stable while the map is not
//! mutated, but it is **not** insertion order.

use crate::dynarray::DynArray;
use std::cell::Cell;

/// Number of hash buckets per dictionary.
const BUCKET_COUNT: usize = 64;
/// Minimum growth chunk for each bucket's entry list.
const BUCKET_CHUNK: usize = 64;

/// Polynomial rolling hash over the key bytes: `h = h*129 ^ byte`.
///
/// Bucket placement only — not security-sensitive.
pub fn hash_key(key: &str) -> u64 {
    key.bytes()
        .fold(0u64, |h, b| h.wrapping_mul(129) ^ u64::from(b))
}

#[derive(Debug, Clone)]
struct Entry<T> {
    hash: u64,
    key: String,
    value: T,
}

/// A string-keyed map with 64 hash buckets and chained collisions.
///
/// Lookups check a single-slot "last accessed" cache before scanning the
/// target bucket; the cache is a pure optimization local to this instance
/// and is never required for correctness.
#[derive(Debug, Clone)]
pub struct Dict<T> {
    len: usize,
    /// (bucket, slot) of the most recently touched entry.
    last_access: Cell<Option<(usize, usize)>>,
    buckets: [DynArray<Entry<T>, BUCKET_CHUNK>; BUCKET_COUNT],
}

impl<T> Dict<T> {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Dict {
            len: 0,
            last_access: Cell::new(None),
            buckets: std::array::from_fn(|_| DynArray::new()),
        }
    }

    /// Number of key:value pairs in the dictionary.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove all entries and reset the last-access cache.
    pub fn clear(&mut self) {
        self.len = 0;
        self.last_access.set(None);
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Locate `key`, checking the last-access cache before scanning the
    /// target bucket (hash comparison first, then full key equality).
    fn find(&self, key: &str) -> Option<(usize, usize)> {
        let h = hash_key(key);
        if let Some((b, i)) = self.last_access.get() {
            if let Some(entry) = self.buckets[b].get(i) {
                if entry.hash == h && entry.key == key {
                    return Some((b, i));
                }
            }
        }
        let b = (h % BUCKET_COUNT as u64) as usize;
        for (i, entry) in self.buckets[b].iter().enumerate() {
            if entry.hash == h && entry.key == key {
                self.last_access.set(Some((b, i)));
                return Some((b, i));
            }
        }
        None
    }

    /// Look up `key` without creating it.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.find(key).map(|(b, i)| &self.buckets[b][i].value)
    }

    /// Look up `key` mutably without creating it.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.find(key).map(|(b, i)| &mut self.buckets[b][i].value)
    }

    /// Read-only existence check.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Get the value for `key`, creating a default-constructed entry if the
    /// key is absent.
    ///
    /// On a miss this duplicates the key into an owned `String`, appends a
    /// new entry to the target bucket, and bumps the length.
    pub fn entry(&mut self, key: &str) -> &mut T
    where
        T: Default,
    {
        if let Some((b, i)) = self.find(key) {
            return &mut self.buckets[b][i].value;
        }
        let h = hash_key(key);
        let b = (h % BUCKET_COUNT as u64) as usize;
        let slot = self.buckets[b].len();
        self.buckets[b].append(Entry {
            hash: h,
            key: key.to_owned(),
            value: T::default(),
        });
        self.len += 1;
        self.last_access.set(Some((b, slot)));
        &mut self.buckets[b][slot].value
    }

    /// Insert `value` under `key`, overwriting in place if the key exists.
    ///
    /// Re-inserting an existing key never creates a duplicate entry or
    /// changes the length.
    pub fn insert(&mut self, key: &str, value: T) -> &mut T
    where
        T: Default,
    {
        let slot = self.entry(key);
        *slot = value;
        slot
    }

    /// The i-th entry in bucket-grouped enumeration order.
    fn entry_at(&self, mut i: usize) -> Option<&Entry<T>> {
        if i >= self.len {
            return None;
        }
        for bucket in &self.buckets {
            if i < bucket.len() {
                return bucket.get(i);
            }
            i -= bucket.len();
        }
        None
    }

    /// The i-th key in enumeration order.
    pub fn key_at(&self, i: usize) -> Option<&str> {
        self.entry_at(i).map(|entry| entry.key.as_str())
    }

    /// The i-th value in enumeration order.
    pub fn value_at(&self, i: usize) -> Option<&T> {
        self.entry_at(i).map(|entry| &entry.value)
    }

    /// The i-th value in enumeration order, mutably.
    pub fn value_at_mut(&mut self, mut i: usize) -> Option<&mut T> {
        if i >= self.len {
            return None;
        }
        for bucket in &mut self.buckets {
            if i < bucket.len() {
                return bucket.get_mut(i).map(|entry| &mut entry.value);
            }
            i -= bucket.len();
        }
        None
    }

    /// The i-th (key, value) pair in enumeration order.
    pub fn pair_at(&self, i: usize) -> Option<(&str, &T)> {
        self.entry_at(i).map(|entry| (entry.key.as_str(), &entry.value))
    }

    /// Iterate over (key, value) pairs in the same bucket-grouped order as
    /// ordinal access.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut buckets = self.buckets.iter();
        let current = buckets.next().map(|b| b.iter()).unwrap_or_default();
        Iter { buckets, current }
    }
}

impl<T> Default for Dict<T> {
    fn default() -> Self {
        Dict::new()
    }
}

/// Equality is by contents: same length and every key mapped to an equal
/// value. The last-access cache and bucket layout do not participate.
impl<T: PartialEq> PartialEq for Dict<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

/// Iterator over a dictionary's entries in bucket-grouped order.
pub struct Iter<'a, T> {
    buckets: std::slice::Iter<'a, DynArray<Entry<T>, BUCKET_CHUNK>>,
    current: std::slice::Iter<'a, Entry<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a str, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                return Some((entry.key.as_str(), &entry.value));
            }
            self.current = self.buckets.next()?.iter();
        }
    }
}

impl<'a, T> IntoIterator for &'a Dict<T> {
    type Item = (&'a str, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
