//! Recency List Module
//!
//! Doubly-linked list of cache entries ordered by recency of use.

use crate::cache::CacheEntry;

#[derive(Debug)]
struct Node<V> {
    key: String,
    entry: CacheEntry<V>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Entries ordered from least to most recently used.
///
/// Nodes live in a slab and link to each other by slot index, so unlinking,
/// moving to the back and popping the front are all O(1). Freed slots are
/// reused by later insertions.
///
/// - Front (head) = least recently used
/// - Back (tail) = most recently used
#[derive(Debug)]
pub struct RecencyList<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<V>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    // == Push Back ==
    /// Appends an entry at the most recently used position.
    ///
    /// Returns the slot index that identifies the node until it is removed.
    pub fn push_back(&mut self, key: String, entry: CacheEntry<V>) -> usize {
        let node = Node {
            key,
            entry,
            prev: self.tail,
            next: None,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(tail_node) = self.node_mut(tail) {
                    tail_node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
        idx
    }

    // Detaches a node from its neighbours without freeing its slot.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next) => {
                if let Some(next_node) = self.node_mut(next) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    // == Move To Back ==
    /// Marks a node as most recently used.
    pub fn move_to_back(&mut self, idx: usize) {
        if self.tail == Some(idx) || self.node(idx).is_none() {
            return;
        }

        self.unlink(idx);
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(idx) {
            node.prev = old_tail;
        }
        match old_tail {
            Some(tail) => {
                if let Some(tail_node) = self.node_mut(tail) {
                    tail_node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    // == Remove ==
    /// Removes a node and returns its key and entry.
    pub fn remove(&mut self, idx: usize) -> Option<(String, CacheEntry<V>)> {
        self.node(idx)?;
        self.unlink(idx);

        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        self.len -= 1;
        Some((node.key, node.entry))
    }

    // == Pop Front ==
    /// Removes and returns the least recently used entry.
    pub fn pop_front(&mut self) -> Option<(String, CacheEntry<V>)> {
        let head = self.head?;
        self.remove(head)
    }

    // == Accessors ==
    pub fn entry(&self, idx: usize) -> Option<&CacheEntry<V>> {
        self.node(idx).map(|node| &node.entry)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates from least to most recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Front-to-back iterator over `(slot, key, entry)`.
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (usize, &'a str, &'a CacheEntry<V>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.node(idx)?;
        self.cursor = node.next;
        Some((idx, node.key.as_str(), &node.entry))
    }
}
