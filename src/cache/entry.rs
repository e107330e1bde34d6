//! Cache Entry Module
//!
//! Defines the arena node holding one key-value pair and its recency links,
//! plus the generation-tagged handle used to address it.

// == Handle ==
/// Stable reference to a node in the recency arena.
///
/// The generation is bumped every time a slot is freed, so a handle kept
/// past removal of its node no longer resolves even if the slot is reused.
/// The counter is 64 bits wide; wrapping it would take 2^64 reuses of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

// == Cache Entry ==
/// A single key-value pair linked into the recency order.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The entry key
    pub key: K,
    /// The stored value
    pub value: V,
    /// Slot index of the next less recently used entry
    pub(crate) prev: Option<usize>,
    /// Slot index of the next more recently used entry
    pub(crate) next: Option<usize>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    // == Into Pair ==
    /// Consumes the entry, returning its key and value.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

// == Slot ==
/// Arena slot: an optional entry plus the generation of its current tenant.
#[derive(Debug, Clone)]
pub(crate) struct Slot<K, V> {
    pub(crate) generation: u64,
    pub(crate) entry: Option<CacheEntry<K, V>>,
}

impl<K, V> Slot<K, V> {
    pub(crate) fn occupied(entry: CacheEntry<K, V>) -> Self {
        Self {
            generation: 0,
            entry: Some(entry),
        }
    }

    /// Resolves the entry only if `generation` still matches.
    pub(crate) fn get(&self, generation: u64) -> Option<&CacheEntry<K, V>> {
        if self.generation == generation {
            self.entry.as_ref()
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, generation: u64) -> Option<&mut CacheEntry<K, V>> {
        if self.generation == generation {
            self.entry.as_mut()
        } else {
            None
        }
    }

    /// Empties the slot and invalidates outstanding handles.
    pub(crate) fn vacate(&mut self) -> Option<CacheEntry<K, V>> {
        let entry = self.entry.take();
        if entry.is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
        entry
    }
}
