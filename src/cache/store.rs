//! Cache Store Module
//!
//! Bounded cache combining a hash index with an arena-backed recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::cache::lru::{self, RecencyList};
use crate::cache::{CacheStats, Handle, DEFAULT_CAPACITY};
use crate::config::Config;
use crate::error::Result;

// == Bounded Recency Cache ==
/// Fixed-capacity map that evicts its least recently used entry.
///
/// `get` and `set` promote the touched key to most recently used; `has`,
/// `delete` and `keys` leave the order of other entries alone. Once
/// `size() == capacity()`, inserting a new key evicts exactly one entry.
///
/// The cache does no internal locking. Owners that share it across threads
/// must serialize every call, e.g. behind a single `Mutex`.
#[derive(Debug)]
pub struct BoundedRecencyCache<K, V> {
    /// Key to arena handle
    index: HashMap<K, Handle>,
    /// Entries from least to most recently used
    order: RecencyList<K, V>,
    /// Diagnostic counters
    stats: CacheStats,
    /// Maximum number of entries retained
    capacity: usize,
}

impl<K, V> BoundedRecencyCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructors ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is allowed: such a cache never retains anything.
    /// Storage grows with the entries actually held, not with `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    /// Creates an empty cache from a signed capacity.
    ///
    /// Fails with [`CacheError::InvalidCapacity`](crate::CacheError) when
    /// `capacity` is negative.
    pub fn try_with_capacity(capacity: i64) -> Result<Self> {
        let config = Config::with_capacity(capacity)?;
        Ok(Self::from_config(&config))
    }

    /// Creates an empty cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_capacity(config.capacity)
    }

    // == Get ==
    /// Returns the value stored for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and changes nothing.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = match self.index.get(key) {
            Some(&handle) => handle,
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        self.stats.record_hit();
        self.order.move_to_back(handle);
        self.order.get(handle).map(|entry| &entry.value)
    }

    // == Set ==
    /// Stores a value, making `key` the most recently used entry.
    ///
    /// Replacing an existing key never evicts. Inserting a new key into a
    /// full cache evicts the least recently used entry first.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(&handle) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(handle) {
                entry.value = value;
            }
            self.order.move_to_back(handle);
            return;
        }

        if self.capacity == 0 {
            // Inserted and evicted in the same step
            self.stats.record_eviction();
            debug!("Zero-capacity cache discarded new entry");
            return;
        }

        if self.order.len() >= self.capacity {
            self.evict_lru();
        }

        self.insert_unbounded(key, value);
    }

    // == Has ==
    /// Checks membership without touching the recency order.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Delete ==
    /// Removes `key`, returning whether it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.remove(key) {
            Some(handle) => {
                self.order.remove(handle);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes all entries. Capacity and statistics are kept.
    pub fn clear(&mut self) {
        let dropped = self.order.len();
        self.index.clear();
        self.order.clear();
        debug!(dropped, "Cache cleared");
    }

    // == Cleanup ==
    /// Overflow safeguard for a cache that grew past its bound.
    ///
    /// If the size exceeds 1.5x the capacity, keeps only the
    /// `capacity / 2` most recently used entries; otherwise does nothing.
    /// Never called by the cache itself. Returns the number of entries
    /// discarded.
    pub fn cleanup(&mut self) -> usize {
        let size = self.order.len();
        // size > capacity * 1.5
        if size.saturating_mul(2) <= self.capacity.saturating_mul(3) {
            return 0;
        }

        let keep = self.capacity / 2;
        let mut discarded = 0;
        while self.order.len() > keep {
            match self.order.pop_front() {
                Some((key, _)) => {
                    self.index.remove(&key);
                    discarded += 1;
                }
                None => break,
            }
        }

        self.stats.record_cleanup(discarded);
        warn!(
            size,
            capacity = self.capacity,
            discarded,
            "Cache exceeded its bound, safeguard cleanup discarded entries"
        );
        discarded
    }

    /// Appends an entry at the most recently used end with no capacity check.
    ///
    /// Callers must ensure `key` is not already indexed.
    pub(crate) fn insert_unbounded(&mut self, key: K, value: V) {
        let handle = self.order.push_back(key.clone(), value);
        self.index.insert(key, handle);
    }

    fn evict_lru(&mut self) {
        if let Some((key, _)) = self.order.pop_front() {
            self.index.remove(&key);
            self.stats.record_eviction();
            debug!(size = self.order.len(), "Evicted least recently used entry");
        }
    }
}

impl<K, V> BoundedRecencyCache<K, V> {
    // == Size ==
    /// Returns the current number of entries.
    pub fn size(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Capacity ==
    /// Returns the capacity fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Keys ==
    /// Iterates live keys from least to most recently used.
    ///
    /// This is a live view: the iterator borrows the cache, so it cannot be
    /// mutated until the iterator is dropped.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.order.iter(),
        }
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.order.len());
        stats
    }
}

impl<K, V> Default for BoundedRecencyCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

// == Keys Iterator ==
/// Iterator over cache keys, least recently used first.
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    inner: lru::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}
