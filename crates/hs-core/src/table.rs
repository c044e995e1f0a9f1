//! `AssociativeTable` — a chained hash table with power-of-two bucket counts.
//!
//! # Layout
//!
//! ```text
//! buckets: [ [(k, v), (k, v)], [], [(k, v)], [] ]     bucket_count = 4
//!            ^ index = hash(k) & (bucket_count - 1)
//! ```
//!
//! Every bucket is a short `Vec` of key/value pairs.  Lookups hash the key,
//! mask it down to a bucket index and scan that bucket linearly.
//!
//! # Resize policy
//!
//! | Trigger                        | New bucket count                   |
//! |--------------------------------|------------------------------------|
//! | `len > bucket_count` (put)     | `len.next_power_of_two()`          |
//! | `len < bucket_count / 2` (remove) | `max(1, len.next_power_of_two())` |
//!
//! A resize builds a fresh bucket array, moves every pair into it and only
//! then replaces the old array.  It runs inside the `&mut self` call that
//! triggered it, so no caller can observe a half-moved table.
//!
//! The default hasher is `rustc_hash::FxBuildHasher`: unseeded, so bucket
//! placement (and iteration order) is identical from run to run.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

use crate::{CoreError, CoreResult};

/// Generic key → value map with separate chaining.
#[derive(Clone)]
pub struct AssociativeTable<K, V, S = FxBuildHasher> {
    buckets: Vec<Vec<(K, V)>>,
    len:     usize,
    hasher:  S,
}

impl<K, V> AssociativeTable<K, V, FxBuildHasher> {
    /// An empty table with a single bucket.
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(1, FxBuildHasher)
    }

    /// An empty table sized so `capacity` items fit without growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

impl<K, V, S> AssociativeTable<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(1, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let bucket_count = capacity.max(1).next_power_of_two();
        Self {
            buckets: empty_buckets(bucket_count),
            len: 0,
            hasher,
        }
    }

    /// Number of stored key/value pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.  Always a power of two.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Stored items per bucket.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Iterate over all pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets.iter().flatten().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.buckets.iter_mut().flatten().map(|(_, v)| v)
    }
}

impl<K, V, S> AssociativeTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// `true` if `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket(key).iter().any(|(k, _)| k.borrow() == key)
    }

    /// Borrow the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> CoreResult<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket(key)
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
            .ok_or(CoreError::KeyNotFound)
    }

    /// Mutably borrow the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> CoreResult<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter_mut()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
            .ok_or(CoreError::KeyNotFound)
    }

    /// Insert or overwrite.  Returns the displaced value when `key` was
    /// already present.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.bucket_index(&key);
        let bucket = &mut self.buckets[idx];
        if let Some(slot) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        bucket.push((key, value));
        self.len += 1;

        if self.len > self.buckets.len() {
            self.resize(self.len.next_power_of_two());
        }
        None
    }

    /// Remove `key` and return its value.
    pub fn remove<Q>(&mut self, key: &Q) -> CoreResult<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];
        let pos = bucket
            .iter()
            .position(|(k, _)| k.borrow() == key)
            .ok_or(CoreError::KeyNotFound)?;
        let (_, value) = bucket.swap_remove(pos);
        self.len -= 1;

        if self.len < self.buckets.len() / 2 {
            self.resize(self.len.next_power_of_two());
        }
        Ok(value)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    #[inline]
    fn bucket_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        mask(self.hasher.hash_one(key), self.buckets.len())
    }

    #[inline]
    fn bucket<Q: Hash + ?Sized>(&self, key: &Q) -> &[(K, V)] {
        &self.buckets[self.bucket_index(key)]
    }

    /// Rehash every pair into `bucket_count` fresh buckets.
    fn resize(&mut self, bucket_count: usize) {
        debug_assert!(bucket_count.is_power_of_two());
        let mut fresh = empty_buckets(bucket_count);
        for (k, v) in self.buckets.drain(..).flatten() {
            let idx = mask(self.hasher.hash_one(&k), bucket_count);
            fresh[idx].push((k, v));
        }
        self.buckets = fresh;
    }
}

// ── Trait impls ───────────────────────────────────────────────────────────────

impl<K, V, S: Default> Default for AssociativeTable<K, V, S> {
    fn default() -> Self {
        Self::with_capacity_and_hasher(1, S::default())
    }
}

impl<K, V, S> FromIterator<(K, V)> for AssociativeTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K, V, S> Extend<(K, V)> for AssociativeTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for AssociativeTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn empty_buckets<K, V>(n: usize) -> Vec<Vec<(K, V)>> {
    (0..n).map(|_| Vec::new()).collect()
}

#[inline]
fn mask(hash: u64, bucket_count: usize) -> usize {
    (hash as usize) & (bucket_count - 1)
}
