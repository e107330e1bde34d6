//! Recency List Module
//!
//! Arena-backed doubly-linked list that keeps entries in recency order.
//! Promotion, removal and eviction of the least recently used entry are O(1).

use std::iter::FusedIterator;

use crate::cache::entry::{CacheEntry, Handle, Slot};

// == Recency List ==
/// Entries ordered by access time.
///
/// - Front (head) = least recently used
/// - Back (tail) = most recently used
///
/// Nodes live in a vector of slots; freed slots are recycled through a free
/// list and addressed by generation-tagged [`Handle`]s.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends a new entry at the most recently used end.
    pub fn push_back(&mut self, key: K, value: V) -> Handle {
        let entry = CacheEntry::new(key, value);
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].entry = Some(entry);
                index
            }
            None => {
                self.slots.push(Slot::occupied(entry));
                self.slots.len() - 1
            }
        };

        self.link_back(index);
        self.len += 1;

        Handle {
            index,
            generation: self.slots[index].generation,
        }
    }

    // == Get ==
    /// Returns the entry behind `handle`, if it is still live.
    pub fn get(&self, handle: Handle) -> Option<&CacheEntry<K, V>> {
        self.slots
            .get(handle.index)
            .and_then(|slot| slot.get(handle.generation))
    }

    /// Returns the entry behind `handle` mutably, if it is still live.
    ///
    /// Only the value should be changed through this; keys are indexed.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut CacheEntry<K, V>> {
        self.slots
            .get_mut(handle.index)
            .and_then(|slot| slot.get_mut(handle.generation))
    }

    // == Move To Back ==
    /// Marks an entry as most recently used.
    ///
    /// Returns false if the handle is stale.
    pub fn move_to_back(&mut self, handle: Handle) -> bool {
        if self.get(handle).is_none() {
            return false;
        }
        if self.tail != Some(handle.index) {
            self.unlink(handle.index);
            self.link_back(handle.index);
        }
        true
    }

    // == Remove ==
    /// Removes an entry, returning its key and value.
    pub fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        self.get(handle)?;
        Some(self.release(handle.index)?.into_pair())
    }

    // == Pop Front ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let index = self.head?;
        Some(self.release(index)?.into_pair())
    }

    // == Peek Front ==
    /// Returns the least recently used entry without removing it.
    #[allow(dead_code)]
    pub fn front(&self) -> Option<&CacheEntry<K, V>> {
        self.head.and_then(|index| self.slots[index].entry.as_ref())
    }

    /// Returns the most recently used entry without removing it.
    #[allow(dead_code)]
    pub fn back(&self) -> Option<&CacheEntry<K, V>> {
        self.tail.and_then(|index| self.slots[index].entry.as_ref())
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry. Outstanding handles stop resolving.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.vacate();
            self.free.push(index);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iter ==
    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Unlinks, vacates and recycles the slot at `index`.
    fn release(&mut self, index: usize) -> Option<CacheEntry<K, V>> {
        self.unlink(index);
        let entry = self.slots[index].vacate()?;
        self.free.push(index);
        self.len -= 1;
        Some(entry)
    }

    fn link_back(&mut self, index: usize) {
        let old_tail = self.tail;
        if let Some(entry) = self.slots[index].entry.as_mut() {
            entry.prev = old_tail;
            entry.next = None;
        }

        match old_tail {
            Some(tail_index) => {
                if let Some(tail) = self.slots[tail_index].entry.as_mut() {
                    tail.next = Some(index);
                }
            }
            None => self.head = Some(index),
        }

        self.tail = Some(index);
    }

    fn unlink(&mut self, index: usize) {
        let (prev, next) = match self.slots[index].entry.as_mut() {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev_index) => {
                if let Some(prev_entry) = self.slots[prev_index].entry.as_mut() {
                    prev_entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_index) => {
                if let Some(next_entry) = self.slots[next_index].entry.as_mut() {
                    next_entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Borrowing iterator over a [`RecencyList`], least recently used first.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    slots: &'a [Slot<K, V>],
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a CacheEntry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let entry = self.slots[index].entry.as_ref()?;
        self.next = entry.next;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
