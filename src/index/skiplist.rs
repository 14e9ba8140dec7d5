//! Arena-backed skip list over integer keys
//!
//! ```text
//! Level 2:  HEAD ──────────────────► 3 ──────────────────► NIL
//! Level 1:  HEAD ──► 1 ────────────► 3 ─────────► 5 ─────► NIL
//! Level 0:  HEAD ──► 1 ──► 2 ──────► 3 ──► 4 ───► 5 ─────► NIL
//! ```
//!
//! Nodes live in a slot vector and link to each other by slot index.
//! The sentinel head is a bare links array with no key. Deleted slots go
//! onto a free list and are handed out again by later inserts.
//!
//! # Invariants
//!
//! - At every level the chain of keys is strictly increasing
//! - Level 0 holds every live key exactly once
//! - `level` is the number of active levels, at least 1, and the top
//!   active level is non-empty whenever `level > 1`
//! - A node is fully allocated before any link is rewritten to reach it

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::errors::{IndexError, IndexResult};

/// Index key type
pub type Key = u64;

/// Slot index of the next node, `None` for end of chain
type Link = Option<usize>;

#[derive(Debug)]
struct Node<V> {
    key: Key,
    /// `None` only while the slot is on the free list
    value: Option<V>,
    /// One forward link per tower level
    forward: Vec<Link>,
}

/// A probabilistic ordered index mapping integer keys to payloads.
///
/// Search, insert and delete take expected O(log n). Page extraction is
/// linear in the page offset.
#[derive(Debug)]
pub struct SkipList<V> {
    /// Sentinel head links, one per possible level
    head: Vec<Link>,
    slots: Vec<Node<V>>,
    free: Vec<usize>,
    /// Number of active levels
    level: usize,
    len: usize,
    max_entries: usize,
    max_level: usize,
    rng: StdRng,
}

impl<V> SkipList<V> {
    /// Creates an empty skip list with an entropy-seeded level generator.
    ///
    /// `max_level` is clamped to at least 1.
    pub fn new(max_entries: usize, max_level: usize) -> Self {
        Self::with_rng(max_entries, max_level, StdRng::from_entropy())
    }

    /// Creates an empty skip list whose tower heights are reproducible.
    pub fn with_seed(max_entries: usize, max_level: usize, seed: u64) -> Self {
        Self::with_rng(max_entries, max_level, StdRng::seed_from_u64(seed))
    }

    fn with_rng(max_entries: usize, max_level: usize, rng: StdRng) -> Self {
        let max_level = max_level.max(1);
        Self {
            head: vec![None; max_level],
            slots: Vec::new(),
            free: Vec::new(),
            level: 1,
            len: 0,
            max_entries,
            max_level,
            rng,
        }
    }

    /// Returns the number of live entries. O(1).
    pub fn count(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of active levels
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the configured maximum tower height
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Returns the configured capacity ceiling
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Follows the level-`level` link out of `at` (`None` is the head).
    fn next(&self, at: Link, level: usize) -> Link {
        match at {
            None => self.head[level],
            Some(slot) => self.slots[slot].forward[level],
        }
    }

    fn set_next(&mut self, at: Link, level: usize, to: Link) {
        match at {
            None => self.head[level] = to,
            Some(slot) => self.slots[slot].forward[level] = to,
        }
    }

    /// Descends from the top active level and returns, for every level,
    /// the last node whose key is below `key`. Inactive levels keep the
    /// head as their predecessor.
    fn predecessors(&self, key: Key) -> Vec<Link> {
        let mut update = vec![None; self.max_level];
        let mut current: Link = None;

        for level in (0..self.level).rev() {
            while let Some(next) = self.next(current, level) {
                if self.slots[next].key >= key {
                    break;
                }
                current = Some(next);
            }
            update[level] = current;
        }

        update
    }

    /// Tower height: 1 plus the run of consecutive fair coin successes,
    /// capped at `max_level`.
    fn random_height(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_level && self.rng.gen_bool(0.5) {
            height += 1;
        }
        height
    }

    /// Places a node in a free slot or at the end of the arena.
    fn allocate(&mut self, node: Node<V>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = node;
                slot
            }
            None => {
                self.slots.push(node);
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> Option<V> {
        let node = &mut self.slots[slot];
        node.forward.clear();
        let value = node.value.take();
        self.free.push(slot);
        value
    }

    /// Looks up the payload stored under `key`.
    pub fn get(&self, key: Key) -> Option<&V> {
        let mut current: Link = None;

        for level in (0..self.level).rev() {
            while let Some(next) = self.next(current, level) {
                if self.slots[next].key >= key {
                    break;
                }
                current = Some(next);
            }
        }

        let candidate = self.next(current, 0)?;
        let node = &self.slots[candidate];
        if node.key == key {
            node.value.as_ref()
        } else {
            None
        }
    }

    /// Looks up the payload stored under `key`, reporting a miss as
    /// `SKIP_KEY_NOT_FOUND`.
    pub fn search(&self, key: Key) -> IndexResult<&V> {
        self.get(key).ok_or_else(|| IndexError::not_found(key))
    }

    /// Returns true if `key` is live
    pub fn contains(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `value` under `key`.
    ///
    /// Fails with `SKIP_CAPACITY_EXCEEDED` once `max_entries` entries are
    /// live. The caller guarantees `key` is not already present.
    pub fn insert(&mut self, key: Key, value: V) -> IndexResult<()> {
        if self.len >= self.max_entries {
            return Err(IndexError::capacity_exceeded(self.max_entries).with_key(key));
        }

        let update = self.predecessors(key);
        let height = self.random_height();
        let slot = self.allocate(Node {
            key,
            value: Some(value),
            forward: vec![None; height],
        });

        if height > self.level {
            self.level = height;
        }

        for (level, &pred) in update.iter().enumerate().take(height) {
            let next = self.next(pred, level);
            self.slots[slot].forward[level] = next;
            self.set_next(pred, level, Some(slot));
        }

        self.len += 1;
        Ok(())
    }

    /// Unlinks `key` and returns its payload, or `None` if it is absent.
    pub fn remove(&mut self, key: Key) -> Option<V> {
        let update = self.predecessors(key);
        let target = self.next(update[0], 0)?;
        if self.slots[target].key != key {
            return None;
        }

        for (level, &pred) in update.iter().enumerate().take(self.level) {
            if self.next(pred, level) != Some(target) {
                break;
            }
            let after = self.slots[target].forward[level];
            self.set_next(pred, level, after);
        }

        while self.level > 1 && self.head[self.level - 1].is_none() {
            self.level -= 1;
        }

        self.len -= 1;
        self.release(target)
    }

    /// Deletes `key`, returning whether it was present.
    pub fn delete(&mut self, key: Key) -> bool {
        self.remove(key).is_some()
    }

    /// Iterates live entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head[0],
        }
    }

    /// Returns page `page` (1-indexed) of `page_size` payloads in key order.
    ///
    /// A window that starts past the end yields an empty page. Zero inputs
    /// also yield an empty page.
    pub fn range_by_page(&self, page: usize, page_size: usize) -> Vec<&V> {
        if page == 0 || page_size == 0 {
            return Vec::new();
        }
        let Some(offset) = (page - 1).checked_mul(page_size) else {
            return Vec::new();
        };
        if offset >= self.len {
            return Vec::new();
        }

        self.iter()
            .skip(offset)
            .take(page_size)
            .map(|(_, value)| value)
            .collect()
    }

    /// Returns the keys linked at `level`, ascending. Inactive levels are
    /// empty.
    pub fn keys_at_level(&self, level: usize) -> Vec<Key> {
        let mut keys = Vec::new();
        if level >= self.level {
            return keys;
        }

        let mut cursor = self.head[level];
        while let Some(slot) = cursor {
            let node = &self.slots[slot];
            keys.push(node.key);
            cursor = node.forward[level];
        }
        keys
    }

    /// Walks every level and verifies the structural invariants.
    ///
    /// Any violation is a defect and reported as `SKIP_INVARIANT_VIOLATED`.
    pub fn check_invariants(&self) -> IndexResult<()> {
        if self.level == 0 || self.level > self.max_level {
            return Err(IndexError::invariant_violated(
                self.level,
                format!("active level count outside 1..={}", self.max_level),
            ));
        }
        if self.level > 1 && self.head[self.level - 1].is_none() {
            return Err(IndexError::invariant_violated(self.level - 1, "top active level is empty"));
        }

        let mut bottom: HashSet<usize> = HashSet::with_capacity(self.len);

        for level in 0..self.max_level {
            if level >= self.level {
                if self.head[level].is_some() {
                    return Err(IndexError::invariant_violated(level, "inactive level is linked"));
                }
                continue;
            }

            let mut cursor = self.head[level];
            let mut previous: Option<Key> = None;
            let mut steps = 0usize;

            while let Some(slot) = cursor {
                steps += 1;
                if steps > self.slots.len() {
                    return Err(IndexError::invariant_violated(level, "chain does not terminate"));
                }

                let node = &self.slots[slot];
                if node.value.is_none() {
                    return Err(IndexError::invariant_violated(level, "free slot is linked")
                        .with_key(node.key));
                }
                if node.forward.len() <= level {
                    return Err(IndexError::invariant_violated(level, "node linked above its height")
                        .with_key(node.key));
                }
                if previous.is_some_and(|prev| prev >= node.key) {
                    return Err(IndexError::invariant_violated(level, "keys not strictly increasing")
                        .with_key(node.key));
                }

                if level == 0 {
                    bottom.insert(slot);
                } else if !bottom.contains(&slot) {
                    return Err(IndexError::invariant_violated(level, "key missing from level 0")
                        .with_key(node.key));
                }

                previous = Some(node.key);
                cursor = node.forward[level];
            }

            if level == 0 && steps != self.len {
                return Err(IndexError::invariant_violated(
                    0,
                    format!("{} linked entries, count is {}", steps, self.len),
                ));
            }
        }

        Ok(())
    }
}

/// Ascending iterator over `(key, payload)` pairs at level 0
pub struct Iter<'a, V> {
    list: &'a SkipList<V>,
    cursor: Link,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let node = &self.list.slots[slot];
        self.cursor = node.forward[0];
        node.value.as_ref().map(|value| (node.key, value))
    }
}

impl<'a, V> IntoIterator for &'a SkipList<V> {
    type Item = (Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
