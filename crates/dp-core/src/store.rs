//! `AssociativeStore` — a chained hash map that doubles its bucket array to
//! keep the load factor bounded.
//!
//! # Layout
//!
//! ```text
//! buckets: Vec< Vec<(K, V)> >     bucket = key.store_hash() % buckets.len()
//! ```
//!
//! Each bucket is a small owned `Vec` of key/value pairs kept in insertion
//! order.  Growing allocates a fresh bucket array at the new size, moves every
//! pair across, and drops the old array as a unit.
//!
//! # Hashing
//!
//! Keys opt in through the [`StoreKey`] trait, so each key type carries its
//! own hash function and dispatch is resolved statically.  The provided impls
//! mix bytes with `rustc-hash`'s `FxHasher`.
//!
//! # Growth policy
//!
//! The store starts with [`INITIAL_BUCKET_COUNT`] buckets.  Whenever a *new*
//! key would push `entries / buckets` above the configured maximum load
//! factor, the bucket count doubles (repeatedly, for very small factors)
//! before the key is placed.  Overwriting an existing key never resizes.

use std::hash::Hasher;

use log::trace;
use rustc_hash::FxHasher;

use crate::geo::Coordinate;
use crate::{CoreError, CoreResult};

/// Bucket count of a fresh or [`reset`](AssociativeStore::reset) store.
pub const INITIAL_BUCKET_COUNT: usize = 8;

/// Default upper bound on `entries / buckets`.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.5;

/// Smallest accepted maximum load factor (at most 100 buckets per entry).
pub const MIN_MAX_LOAD_FACTOR: f64 = 0.01;

// ── Hashing capability ────────────────────────────────────────────────────────

/// A key type usable in an [`AssociativeStore`].
///
/// Equal keys must produce equal hashes.
pub trait StoreKey: Eq {
    fn store_hash(&self) -> u64;
}

#[inline]
fn fx_text(text: &str) -> u64 {
    let mut h = FxHasher::default();
    h.write(text.as_bytes());
    h.finish()
}

impl StoreKey for String {
    #[inline]
    fn store_hash(&self) -> u64 {
        fx_text(self)
    }
}

impl StoreKey for Box<str> {
    #[inline]
    fn store_hash(&self) -> u64 {
        fx_text(self)
    }
}

impl StoreKey for Coordinate {
    /// Hashes the exact latitude and longitude texts, never the parsed floats.
    #[inline]
    fn store_hash(&self) -> u64 {
        let mut h = FxHasher::default();
        h.write(self.lat_text().as_bytes());
        // Separator so ("1.2", "34") and ("1.23", "4") hash differently.
        h.write_u8(0xff);
        h.write(self.lon_text().as_bytes());
        h.finish()
    }
}

// ── StoreConfig ───────────────────────────────────────────────────────────────

/// Tuning knobs for an [`AssociativeStore`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoreConfig {
    /// Resize once `entries / buckets` would exceed this.  Default: 0.5.
    pub max_load_factor: f64,
}

impl StoreConfig {
    /// Reject non-finite load factors and any below [`MIN_MAX_LOAD_FACTOR`].
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_load_factor.is_finite() && self.max_load_factor >= MIN_MAX_LOAD_FACTOR {
            Ok(())
        } else {
            Err(CoreError::Config(format!(
                "max_load_factor must be finite and >= {MIN_MAX_LOAD_FACTOR}, got {}",
                self.max_load_factor
            )))
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_load_factor: DEFAULT_MAX_LOAD_FACTOR }
    }
}

// ── AssociativeStore ──────────────────────────────────────────────────────────

/// Key-unique map with amortised O(1) `associate` and `find`.
///
/// # Example
///
/// ```
/// use dp_core::AssociativeStore;
///
/// let mut store: AssociativeStore<String, u32> = AssociativeStore::new();
/// store.associate("main st".to_string(), 1);
/// store.associate("main st".to_string(), 2); // overwrite
/// assert_eq!(store.size(), 1);
/// assert_eq!(store.find(&"main st".to_string()), Some(&2));
/// assert_eq!(store.find(&"elm st".to_string()), None);
/// ```
#[derive(Clone, Debug)]
pub struct AssociativeStore<K, V> {
    buckets:         Vec<Vec<(K, V)>>,
    len:             usize,
    max_load_factor: f64,
}

impl<K: StoreKey, V> AssociativeStore<K, V> {
    /// Empty store with the default maximum load factor.
    pub fn new() -> Self {
        Self {
            buckets:         empty_buckets(INITIAL_BUCKET_COUNT),
            len:             0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }

    /// Empty store with a validated custom configuration.
    pub fn with_config(config: StoreConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            buckets:         empty_buckets(INITIAL_BUCKET_COUNT),
            len:             0,
            max_load_factor: config.max_load_factor,
        })
    }

    /// Insert `key → value`, or overwrite the value if `key` is present.
    pub fn associate(&mut self, key: K, value: V) {
        let b = self.bucket_of(&key);
        if let Some((_, v)) = self.buckets[b].iter_mut().find(|(k, _)| *k == key) {
            *v = value;
            return;
        }
        self.insert_new(key, value);
    }

    /// Return the value stored under `key`, inserting `default()` first if
    /// the key is absent.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let b = self.bucket_of(&key);
        let (b, i) = match self.buckets[b].iter().position(|(k, _)| *k == key) {
            Some(i) => (b, i),
            None => self.insert_new(key, default()),
        };
        &mut self.buckets[b][i].1
    }

    /// Look up `key`.  Absence is a normal outcome, not an error.
    pub fn find(&self, key: &K) -> Option<&V> {
        let b = self.bucket_of(key);
        self.buckets[b].iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let b = self.bucket_of(key);
        self.buckets[b].iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Number of distinct keys.
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every entry and shrink back to [`INITIAL_BUCKET_COUNT`] buckets.
    /// The configured load factor is kept.
    pub fn reset(&mut self) {
        self.buckets = empty_buckets(INITIAL_BUCKET_COUNT);
        self.len = 0;
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    #[inline]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// All entries, bucket by bucket.  No ordering guarantee across buckets.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets.iter().flatten().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    #[inline]
    fn bucket_of(&self, key: &K) -> usize {
        (key.store_hash() % self.buckets.len() as u64) as usize
    }

    /// Place a key known to be absent; returns `(bucket, index)` of the pair.
    ///
    /// Growth happens *before* the pair is placed so the returned position
    /// stays valid.  The resulting table is the same as inserting first and
    /// resizing afterwards.
    fn insert_new(&mut self, key: K, value: V) -> (usize, usize) {
        let target = self.target_bucket_count(self.len + 1);
        if target != self.buckets.len() {
            self.rehash(target);
        }
        let b = self.bucket_of(&key);
        self.buckets[b].push((key, value));
        self.len += 1;
        (b, self.buckets[b].len() - 1)
    }

    /// Smallest power-of-two multiple of the current bucket count that keeps
    /// `entries / buckets` at or under the maximum load factor.  Saturates at
    /// the largest power of two that fits in `usize`.
    fn target_bucket_count(&self, entries: usize) -> usize {
        let mut count = self.buckets.len();
        while entries as f64 / count as f64 > self.max_load_factor {
            match count.checked_mul(2) {
                Some(next) => count = next,
                None => break,
            }
        }
        count
    }

    fn rehash(&mut self, new_count: usize) {
        let old_count = self.buckets.len();
        let mut fresh = empty_buckets(new_count);
        for (k, v) in std::mem::take(&mut self.buckets).into_iter().flatten() {
            let b = (k.store_hash() % new_count as u64) as usize;
            fresh[b].push((k, v));
        }
        self.buckets = fresh;
        trace!("store resized {old_count} -> {new_count} buckets ({} entries)", self.len);
    }
}

impl<K: StoreKey, V> Default for AssociativeStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_buckets<K, V>(count: usize) -> Vec<Vec<(K, V)>> {
    (0..count).map(|_| Vec::new()).collect()
}
