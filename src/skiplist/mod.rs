//! Indexed Skiplist
//!
//! An ordered set of keys that answers "which key is at position N" in
//! O(log n) expected time, alongside the usual O(log n) search, insert and
//! delete. This is what makes large-offset pagination cheap: `page(10_000, 20)`
//! costs the same as `page(0, 20)` plus the 20 steps of the page itself.
//!
//! # Width Semantics
//!
//! Every forward link at every level stores a width: how many level-0 nodes
//! you pass by following it.
//!
//! - `node.levels[i].width` = `rank(node.levels[i].next) - rank(node)`
//! - a link that ends the level has width `len - rank(node)`
//! - the head has rank 0, the first key rank 1
//!
//! So the widths along any path from the head add up to the rank of where the
//! path stops, and every level's widths add up to `len`.
//!
//! ```text
//! Level 2: HEAD -----------(2)----------> B -----------------(3)-------------> NULL
//! Level 1: HEAD -----------(2)----------> B ----(2)-----> D ------(1)--------> NULL
//! Level 0: HEAD --(1)--> A --(1)--> B --(1)--> C --(1)--> D --(1)--> E --(0)-> NULL
//! ```
//!
//! # Operations
//!
//! - `insert(key)`: O(log n) - rejects keys already present
//! - `delete(key)` / `remove(key)`: O(log n)
//! - `search(key)` / `contains(key)`: O(log n)
//! - `skip(offset)`: O(log n) - key at a 0-based position
//! - `rank(key)`: O(log n) - 0-based position of a key
//! - `page(offset, limit)`: O(log n + limit)
//! - `first()` / `last()` / `len()`: O(1)
//!
//! # Concurrency
//!
//! There is no internal locking. Mutations take `&mut self`, so sharing across
//! threads means wrapping the skiplist in a lock such as `RwLock`: any number
//! of readers, or one writer.

mod check;
mod iter;
mod node;

use std::borrow::Borrow;
use std::fmt;
use std::iter::{Rev, Take};

use tracing::{debug, trace};

use crate::config::{MAX_LEVEL, SkiplistConfig};
use crate::error::{Error, Result};
use crate::level::{Geometric, LevelGenerator};

pub use iter::Iter;
use node::{Arena, CAPACITY, HEAD, Idx, Link, NULL};

/// An ordered set of unique keys with O(log n) access by rank.
///
/// Keys are compared with [`Ord`]. Lookups accept any borrowed form of the
/// key, the way `BTreeSet` does, so an `IndexedSkiplist<String>` can be
/// searched with a `&str`.
///
/// ```
/// use rankskip::IndexedSkiplist;
///
/// let mut list = IndexedSkiplist::with_seed(7);
/// for key in ["b", "d", "a", "c"] {
///     list.insert(key).unwrap();
/// }
/// assert_eq!(list.skip(2), Some(&"c"));
/// assert_eq!(list.rank("d"), Some(3));
/// assert!(list.insert("a").is_err());
/// ```
pub struct IndexedSkiplist<K, G = Geometric> {
    /// Every node, the head sentinel at slot 0.
    arena: Arena<K>,
    /// Last node at level 0, or `NULL` when empty.
    tail: Idx,
    /// Highest level in use. Level 0 is always in use.
    top: usize,
    /// Number of keys.
    len: usize,
    /// Levels the head has. Nodes stop at `max_level - 1`.
    max_level: usize,
    generator: G,
}

/// Predecessors recorded while descending towards a key.
struct Path {
    /// `preds[i]`: last node at level `i` whose key is below the target.
    preds: [Idx; MAX_LEVEL],
    /// `ranks[i]`: 1-based rank of `preds[i]`, 0 for the head.
    ranks: [usize; MAX_LEVEL],
}

impl<K: Ord> IndexedSkiplist<K> {
    /// An empty skiplist with the default configuration and a generator
    /// seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_parts(MAX_LEVEL, Geometric::default())
    }

    /// An empty skiplist whose shape is fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_parts(MAX_LEVEL, Geometric::with_seed(seed))
    }

    pub fn with_config(config: SkiplistConfig) -> Result<Self> {
        let generator = Geometric::from_config(&config)?;
        debug!(
            promotion_probability = config.promotion_probability,
            seeded = config.seed.is_some(),
            "configured level generator"
        );
        Ok(Self::from_parts(config.max_level, generator))
    }
}

impl<K: Ord, G: LevelGenerator> IndexedSkiplist<K, G> {
    /// An empty skiplist drawing levels from `generator`. Only
    /// `config.max_level` is used; the probability and seed belong to the
    /// generator.
    pub fn with_generator(config: &SkiplistConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config.max_level, generator))
    }

    fn from_parts(max_level: usize, generator: G) -> Self {
        debug!(max_level, "created skiplist");
        IndexedSkiplist {
            arena: Arena::new(max_level),
            tail: NULL,
            top: 0,
            len: 0,
            max_level,
            generator,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels currently in use, at least 1.
    pub fn height(&self) -> usize {
        self.top + 1
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    // --- Node access helpers ---

    fn link(&self, idx: Idx, level: usize) -> Link {
        self.arena.node(idx).levels[level]
    }

    fn link_mut(&mut self, idx: Idx, level: usize) -> &mut Link {
        &mut self.arena.node_mut(idx).levels[level]
    }

    /// Key stored at `idx`; `None` for `NULL` and the head.
    fn key_at(&self, idx: Idx) -> Option<&K> {
        if idx == NULL {
            return None;
        }
        self.arena.node(idx).key.as_ref()
    }

    // --- Descent ---

    /// Walk down from the top level, advancing while the next key is below
    /// `key`. Returns the level-0 predecessor of `key` and its rank.
    fn lower_bound<Q>(&self, key: &Q) -> (Idx, usize)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut idx = HEAD;
        let mut rank = 0;
        for level in (0..=self.top).rev() {
            loop {
                let link = self.link(idx, level);
                match self.key_at(link.next) {
                    Some(next) if next.borrow() < key => {
                        rank += link.width as usize;
                        idx = link.next;
                    }
                    _ => break,
                }
            }
        }
        (idx, rank)
    }

    /// Same descent as `lower_bound`, remembering the predecessor at every
    /// level in use.
    fn find_path<Q>(&self, key: &Q) -> Path
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut path = Path {
            preds: [HEAD; MAX_LEVEL],
            ranks: [0; MAX_LEVEL],
        };
        let mut idx = HEAD;
        let mut rank = 0;
        for level in (0..=self.top).rev() {
            loop {
                let link = self.link(idx, level);
                match self.key_at(link.next) {
                    Some(next) if next.borrow() < key => {
                        rank += link.width as usize;
                        idx = link.next;
                    }
                    _ => break,
                }
            }
            path.preds[level] = idx;
            path.ranks[level] = rank;
        }
        path
    }

    /// Node at 0-based position `offset`.
    ///
    /// Advances across a link only when that does not overshoot the target,
    /// otherwise drops a level, so the walk costs O(log n) however large
    /// `offset` is.
    fn node_at(&self, offset: usize) -> Option<Idx> {
        if offset >= self.len {
            return None;
        }
        let target = offset + 1;
        let mut idx = HEAD;
        let mut traversed = 0;
        for level in (0..=self.top).rev() {
            loop {
                let link = self.link(idx, level);
                if link.next == NULL || traversed + link.width as usize > target {
                    break;
                }
                traversed += link.width as usize;
                idx = link.next;
            }
            if traversed == target {
                return Some(idx);
            }
        }
        None
    }

    // --- Queries ---

    /// The stored key equal to `key`, if any.
    pub fn search<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (pred, _) = self.lower_bound(key);
        match self.key_at(self.link(pred, 0).next) {
            Some(found) if found.borrow() == key => Some(found),
            _ => None,
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Key at 0-based position `offset`, or `None` if `offset >= len()`.
    pub fn skip(&self, offset: usize) -> Option<&K> {
        self.node_at(offset).and_then(|idx| self.key_at(idx))
    }

    /// 0-based position of `key`, or `None` if it is absent.
    pub fn rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (pred, rank) = self.lower_bound(key);
        match self.key_at(self.link(pred, 0).next) {
            Some(found) if found.borrow() == key => Some(rank),
            _ => None,
        }
    }

    pub fn first(&self) -> Option<&K> {
        self.key_at(self.link(HEAD, 0).next)
    }

    pub fn last(&self) -> Option<&K> {
        self.key_at(self.tail)
    }

    // --- Iteration ---

    /// All keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.arena, self.link(HEAD, 0).next, self.tail, self.len)
    }

    /// All keys in descending order, following `prev` links from the tail.
    pub fn iter_rev(&self) -> Rev<Iter<'_, K>> {
        self.iter().rev()
    }

    /// Keys from the first one `>= key` to the end, ascending.
    pub fn iter_from<Q>(&self, key: &Q) -> Iter<'_, K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (pred, rank) = self.lower_bound(key);
        Iter::new(
            &self.arena,
            self.link(pred, 0).next,
            self.tail,
            self.len - rank,
        )
    }

    /// Up to `limit` keys starting at 0-based position `offset`.
    pub fn page(&self, offset: usize, limit: usize) -> Take<Iter<'_, K>> {
        let iter = match self.node_at(offset) {
            Some(front) => Iter::new(&self.arena, front, self.tail, self.len - offset),
            None => Iter::empty(&self.arena),
        };
        iter.take(limit)
    }

    // --- Mutation ---

    /// Insert `key`.
    ///
    /// Fails with [`Error::DuplicateKey`] if an equal key is already stored;
    /// callers that need several entries per ordering value should make keys
    /// unique with a tiebreaker, e.g. `(score, id)`. Fails with
    /// [`Error::CapacityExceeded`] once every node index is in use. The
    /// skiplist is untouched on failure.
    pub fn insert(&mut self, key: K) -> Result<()> {
        let mut path = self.find_path(&key);
        let pred = path.preds[0];
        let succ = self.link(pred, 0).next;
        if self.key_at(succ) == Some(&key) {
            trace!(rank = path.ranks[0], "rejected duplicate key");
            return Err(Error::DuplicateKey);
        }
        if self.len >= CAPACITY {
            return Err(Error::CapacityExceeded { limit: CAPACITY });
        }

        // Grow by at most one level per insert.
        let cap = (self.top + 1).min(self.max_level - 1);
        let level = self.generator.random_level(cap).min(cap);

        if level > self.top {
            for i in (self.top + 1)..=level {
                path.preds[i] = HEAD;
                path.ranks[i] = 0;
                *self.link_mut(HEAD, i) = Link {
                    next: NULL,
                    width: self.len as u32,
                };
            }
            self.top = level;
            debug!(height = self.top + 1, len = self.len, "skiplist grew a level");
        }

        let new_idx = self.arena.alloc(key, level);
        let rank = path.ranks[0];

        // Split each predecessor's span at the new node.
        for i in 0..=level {
            let pred_idx = path.preds[i];
            let old = self.link(pred_idx, i);
            let before = (rank - path.ranks[i]) as u32;
            *self.link_mut(new_idx, i) = Link {
                next: old.next,
                width: old.width - before,
            };
            *self.link_mut(pred_idx, i) = Link {
                next: new_idx,
                width: before + 1,
            };
        }

        // Links above the new node's level now pass over one more node.
        for i in (level + 1)..=self.top {
            self.link_mut(path.preds[i], i).width += 1;
        }

        self.arena.node_mut(new_idx).prev = if pred == HEAD { NULL } else { pred };
        if succ == NULL {
            self.tail = new_idx;
        } else {
            self.arena.node_mut(succ).prev = new_idx;
        }

        self.len += 1;
        trace!(rank, level, "inserted key");
        self.debug_check();
        Ok(())
    }

    /// Delete `key`. Returns whether it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Delete `key`, handing the stored key back.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let path = self.find_path(key);
        let target = self.link(path.preds[0], 0).next;
        match self.key_at(target) {
            Some(found) if found.borrow() == key => {}
            _ => return None,
        }

        for i in 0..=self.top {
            let pred_idx = path.preds[i];
            let pred_link = self.link(pred_idx, i);
            if pred_link.next == target {
                // Absorb the target's span, minus the target itself.
                let target_link = self.link(target, i);
                *self.link_mut(pred_idx, i) = Link {
                    next: target_link.next,
                    width: pred_link.width + target_link.width - 1,
                };
            } else {
                self.link_mut(pred_idx, i).width -= 1;
            }
        }

        let (prev, next) = {
            let node = self.arena.node(target);
            (node.prev, node.levels[0].next)
        };
        if next == NULL {
            self.tail = prev;
        } else {
            self.arena.node_mut(next).prev = prev;
        }

        let old_top = self.top;
        while self.top > 0 && self.link(HEAD, self.top).next == NULL {
            *self.link_mut(HEAD, self.top) = Link::EMPTY;
            self.top -= 1;
        }
        if self.top != old_top {
            debug!(height = self.top + 1, len = self.len - 1, "skiplist shrank");
        }

        self.len -= 1;
        let removed = self.arena.release(target);
        trace!(rank = path.ranks[0], "deleted key");
        self.debug_check();
        removed
    }

    /// Remove every key. The generator keeps its state.
    pub fn clear(&mut self) {
        self.arena.clear(self.max_level);
        self.tail = NULL;
        self.top = 0;
        self.len = 0;
    }

    #[cfg(test)]
    fn debug_check(&self) {
        self.check_invariants();
    }

    #[cfg(not(test))]
    #[inline(always)]
    fn debug_check(&self) {}
}

impl<K: Ord> Default for IndexedSkiplist<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, G> fmt::Debug for IndexedSkiplist<K, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.arena.node(HEAD).levels[0].next;
        f.debug_set()
            .entries(Iter::new(&self.arena, first, self.tail, self.len))
            .finish()
    }
}

impl<'a, K: Ord, G: LevelGenerator> IntoIterator for &'a IndexedSkiplist<K, G> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
