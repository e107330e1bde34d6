//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a simple vector model of the
//! recency order.

use proptest::prelude::*;

use crate::cache::BoundedRecencyCache;

// == Test Configuration ==
const TEST_CAPACITY: usize = 8;

// == Strategies ==
/// Small key space so that sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..16
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: u8, value: i32 },
    Get { key: u8 },
    Has { key: u8 },
    Delete { key: u8 },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), any::<i32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Has { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::Clear),
    ]
}

// == Reference Model ==
/// Entries ordered least recently used first.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(u8, i32)>,
    capacity: usize,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn get(&mut self, key: u8) -> Option<i32> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        self.entries.push(entry);
        Some(entry.1)
    }

    fn set(&mut self, key: u8, value: i32) {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
        } else if self.entries.len() >= self.capacity && !self.entries.is_empty() {
            self.entries.remove(0);
        }
        self.entries.push((key, value));
        if self.capacity == 0 {
            self.entries.clear();
        }
    }

    fn delete(&mut self, key: u8) -> bool {
        match self.position(key) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    fn keys(&self) -> Vec<u8> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every operation sequence leaves the cache in the same state as the model,
    // with keys reported least recently used first.
    #[test]
    fn prop_matches_reference_model(
        capacity in 0usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut cache = BoundedRecencyCache::with_capacity(capacity);
        let mut model = Model::new(capacity);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key, value);
                    model.set(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                }
                CacheOp::Has { key } => {
                    prop_assert_eq!(cache.has(&key), model.position(key).is_some());
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(cache.delete(&key), model.delete(key));
                }
                CacheOp::Clear => {
                    cache.clear();
                    model.entries.clear();
                }
            }

            prop_assert_eq!(cache.size(), model.entries.len());
            prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), model.keys());
        }
    }

    // For any sequence of inserts, size never exceeds capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((any::<u16>(), any::<i32>()), 1..200)
    ) {
        let mut cache = BoundedRecencyCache::with_capacity(TEST_CAPACITY);

        for (key, value) in entries {
            cache.set(key, value);
            prop_assert!(
                cache.size() <= TEST_CAPACITY,
                "Cache size {} exceeds capacity {}",
                cache.size(),
                TEST_CAPACITY
            );
        }
    }

    // Setting a present key keeps the size and evicts nothing.
    #[test]
    fn prop_overwrite_never_evicts(
        keys in prop::collection::vec(key_strategy(), 1..TEST_CAPACITY),
        pick in any::<prop::sample::Index>(),
        value in any::<i32>()
    ) {
        let mut cache = BoundedRecencyCache::with_capacity(TEST_CAPACITY);
        for &key in &keys {
            cache.set(key, 0);
        }
        let size_before = cache.size();
        let evictions_before = cache.stats().evictions;

        let key = keys[pick.index(keys.len())];
        cache.set(key, value);

        prop_assert_eq!(cache.size(), size_before);
        prop_assert_eq!(cache.stats().evictions, evictions_before);
        prop_assert_eq!(cache.get(&key), Some(&value));
    }

    // A read key survives the next eviction while older keys remain, and
    // `has` checks in between do not change the victim.
    #[test]
    fn prop_get_promotes_has_does_not(
        capacity in 2usize..10,
        probes in prop::collection::vec(any::<prop::sample::Index>(), 0..10)
    ) {
        let mut cache = BoundedRecencyCache::with_capacity(capacity);
        for key in 0..capacity {
            cache.set(key, key);
        }

        for probe in probes {
            prop_assert!(cache.has(&probe.index(capacity)));
        }

        // Key 0 is least recently used until read
        prop_assert_eq!(cache.get(&0), Some(&0));
        cache.set(capacity, capacity);

        prop_assert!(cache.has(&0));
        prop_assert!(!cache.has(&1));
        prop_assert_eq!(cache.size(), capacity);
    }

    // Cleanup on an overgrown cache keeps exactly the capacity / 2 most
    // recently used entries.
    #[test]
    fn prop_cleanup_keeps_most_recent_half(
        capacity in 0usize..20,
        extra in 1usize..20
    ) {
        let mut cache = BoundedRecencyCache::with_capacity(capacity);
        let overgrown = capacity + capacity / 2 + extra;
        for key in 0..overgrown {
            cache.insert_unbounded(key, key);
        }

        let discarded = cache.cleanup();
        let keep = capacity / 2;

        prop_assert_eq!(cache.size(), keep);
        prop_assert_eq!(discarded, overgrown - keep);
        let expected: Vec<usize> = (overgrown - keep..overgrown).collect();
        prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), expected);
    }

    // Cleanup within the 1.5x bound changes nothing.
    #[test]
    fn prop_cleanup_noop_within_bound(
        capacity in 0usize..20,
        ops in prop::collection::vec((any::<u8>(), any::<i32>()), 0..60)
    ) {
        let mut cache = BoundedRecencyCache::with_capacity(capacity);
        for (key, value) in ops {
            cache.set(key, value);
        }
        let before: Vec<u8> = cache.keys().copied().collect();

        prop_assert_eq!(cache.cleanup(), 0);
        prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), before);
    }
}
