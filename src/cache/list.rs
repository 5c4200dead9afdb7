//! Recency List Module
//!
//! Tracks access order for LRU eviction with O(1) operations.

use std::collections::HashMap;
use std::hash::Hash;

/// Sentinel value for null links in the doubly-linked list.
const NIL: usize = usize::MAX;

/// A node in the arena-based doubly-linked list.
///
/// The key is taken out when a slot is released to the free list.
#[derive(Debug)]
struct Node<K> {
    key: Option<K>,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Tracks access order for the LRU eviction strategy.
///
/// Keys live in an arena-backed doubly-linked list with a key-to-slot map,
/// so promotion, removal, and eviction are all O(1) amortized. Slots freed
/// by removals are recycled through a free list. Index-based links, no
/// unsafe code.
///
/// List orientation:
/// - Head = most recently used
/// - Tail = least recently used
#[derive(Debug)]
pub struct RecencyList<K> {
    /// Key to arena slot mapping
    index: HashMap<K, usize>,
    /// Arena of linked nodes
    arena: Vec<Node<K>>,
    /// Slot of the most recently used key
    head: usize,
    /// Slot of the least recently used key
    tail: usize,
    /// Head of the free-slot chain
    free: usize,
}

impl<K: Hash + Eq + Clone> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone> RecencyList<K> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            arena: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
        }
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// If the key is already tracked it is unlinked from its current
    /// position first; either way it ends up at the head.
    pub fn touch(&mut self, key: &K) {
        if let Some(&slot) = self.index.get(key) {
            if self.head == slot {
                return;
            }
            self.unlink(slot);
            self.link_front(slot);
        } else {
            let slot = self.allocate(key.clone());
            self.index.insert(key.clone(), slot);
            self.link_front(slot);
        }
    }

    // == Remove ==
    /// Removes a key from the tracker. No-op if the key is not tracked.
    pub fn remove(&mut self, key: &K) {
        if let Some(slot) = self.index.remove(key) {
            self.unlink(slot);
            self.release(slot);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        if self.tail == NIL {
            return None;
        }
        let slot = self.tail;
        self.unlink(slot);
        let key = self.arena[slot].key.take();
        self.push_free(slot);
        let key = key?;
        self.index.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        if self.tail == NIL {
            return None;
        }
        self.arena[self.tail].key.as_ref()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == Keys Oldest First ==
    /// Keys in eviction order, least recently used first.
    pub fn keys_oldest_first(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut slot = self.tail;
        while slot != NIL {
            if let Some(key) = &self.arena[slot].key {
                keys.push(key.clone());
            }
            slot = self.arena[slot].prev;
        }
        keys
    }

    // == Internal: slot allocation ==
    /// Takes a slot from the free chain or grows the arena.
    fn allocate(&mut self, key: K) -> usize {
        if self.free != NIL {
            let slot = self.free;
            self.free = self.arena[slot].next;
            self.arena[slot].key = Some(key);
            self.arena[slot].prev = NIL;
            self.arena[slot].next = NIL;
            slot
        } else {
            self.arena.push(Node {
                key: Some(key),
                prev: NIL,
                next: NIL,
            });
            self.arena.len() - 1
        }
    }

    /// Drops the slot's key and chains the slot onto the free list.
    fn release(&mut self, slot: usize) {
        self.arena[slot].key = None;
        self.push_free(slot);
    }

    fn push_free(&mut self, slot: usize) {
        self.arena[slot].prev = NIL;
        self.arena[slot].next = self.free;
        self.free = slot;
    }

    // == Internal: list surgery ==
    /// Detaches a slot from the list, fixing up head/tail and neighbors.
    fn unlink(&mut self, slot: usize) {
        let prev = self.arena[slot].prev;
        let next = self.arena[slot].next;

        if prev != NIL {
            self.arena[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.arena[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.arena[slot].prev = NIL;
        self.arena[slot].next = NIL;
    }

    /// Attaches a detached slot at the head (most recently used).
    fn link_front(&mut self, slot: usize) {
        self.arena[slot].prev = NIL;
        self.arena[slot].next = self.head;
        if self.head != NIL {
            self.arena[self.head].prev = slot;
        }
        self.head = slot;
        if self.tail == NIL {
            self.tail = slot;
        }
    }
}
