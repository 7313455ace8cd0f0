//! Node storage for the skiplist.
//!
//! Nodes live in a single arena and point at each other by index, so the
//! arena owns every key and no node is aliased. Slot 0 is the head sentinel.
//! Deleted slots are pushed on a free list and handed out again by the next
//! insert.

use smallvec::{SmallVec, smallvec};

/// Node index type. u32 keeps links compact on 64-bit targets.
pub(crate) type Idx = u32;

/// Null index marker: the end of a level.
pub(crate) const NULL: Idx = Idx::MAX;

/// Index of the head sentinel.
pub(crate) const HEAD: Idx = 0;

/// Most keys a skiplist can hold. Every index except the head and `NULL`.
pub(crate) const CAPACITY: usize = (Idx::MAX - 1) as usize;

/// One forward link of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    /// Next node at this level, or `NULL`.
    pub next: Idx,
    /// Level-0 nodes passed by following this link: `rank(next) - rank(self)`,
    /// or `len - rank(self)` when `next` is `NULL`.
    pub width: u32,
}

impl Link {
    pub const EMPTY: Link = Link {
        next: NULL,
        width: 0,
    };
}

pub(crate) struct Node<K> {
    /// `None` for the head sentinel and for free slots.
    pub key: Option<K>,
    /// Links for levels `0..levels.len()`. Most nodes stop at level 0 or 1.
    pub levels: SmallVec<[Link; 4]>,
    /// Previous node at level 0, or `NULL` for the first node.
    pub prev: Idx,
}

impl<K> Node<K> {
    fn head(max_level: usize) -> Self {
        Node {
            key: None,
            levels: smallvec![Link::EMPTY; max_level],
            prev: NULL,
        }
    }

    fn new(key: K, level: usize) -> Self {
        Node {
            key: Some(key),
            levels: smallvec![Link::EMPTY; level + 1],
            prev: NULL,
        }
    }

    /// Number of levels this node participates in.
    pub fn height(&self) -> usize {
        self.levels.len()
    }
}

pub(crate) struct Arena<K> {
    nodes: Vec<Node<K>>,
    /// Free list for reusing removed node slots.
    free: Vec<Idx>,
}

impl<K> Arena<K> {
    pub fn new(max_level: usize) -> Self {
        Arena {
            nodes: vec![Node::head(max_level)],
            free: Vec::new(),
        }
    }

    pub fn node(&self, idx: Idx) -> &Node<K> {
        &self.nodes[idx as usize]
    }

    pub fn node_mut(&mut self, idx: Idx) -> &mut Node<K> {
        &mut self.nodes[idx as usize]
    }

    /// Store `key` in a node with links for levels `0..=level`, all empty.
    /// The caller checks `CAPACITY` first.
    pub fn alloc(&mut self, key: K, level: usize) -> Idx {
        if let Some(idx) = self.free.pop() {
            let node = self.node_mut(idx);
            node.key = Some(key);
            node.levels.clear();
            node.levels.resize(level + 1, Link::EMPTY);
            node.prev = NULL;
            idx
        } else {
            let idx = self.nodes.len() as Idx;
            self.nodes.push(Node::new(key, level));
            idx
        }
    }

    /// Free a slot that has already been unlinked, returning its key.
    pub fn release(&mut self, idx: Idx) -> Option<K> {
        debug_assert_ne!(idx, HEAD, "the head sentinel is never released");
        let node = self.node_mut(idx);
        let key = node.key.take();
        node.levels.clear();
        node.prev = NULL;
        self.free.push(idx);
        key
    }

    /// Drop every key and start over with a fresh head.
    pub fn clear(&mut self, max_level: usize) {
        self.nodes.clear();
        self.free.clear();
        self.nodes.push(Node::head(max_level));
    }

    /// Slots holding a key.
    pub fn live(&self) -> usize {
        self.nodes.len() - self.free.len() - 1
    }

    /// Total slots, including the head and free slots.
    pub fn slots(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_reuses_released_slots() {
        let mut arena = Arena::new(4);
        let a = arena.alloc("a", 0);
        let b = arena.alloc("b", 2);
        assert_eq!((a, b), (1, 2));
        assert_eq!(arena.node(b).height(), 3);
        assert_eq!(arena.live(), 2);

        assert_eq!(arena.release(a), Some("a"));
        assert_eq!(arena.live(), 1);
        assert!(arena.node(a).key.is_none());

        let c = arena.alloc("c", 1);
        assert_eq!(c, a);
        assert_eq!(arena.node(c).height(), 2);
        assert_eq!(arena.node(c).levels[1], Link::EMPTY);
        assert_eq!(arena.slots(), 3);
    }

    #[test]
    fn clear_keeps_head() {
        let mut arena = Arena::new(8);
        arena.alloc(1, 0);
        arena.alloc(2, 0);
        arena.clear(8);
        assert_eq!(arena.live(), 0);
        assert_eq!(arena.slots(), 1);
        assert_eq!(arena.node(HEAD).height(), 8);
    }
}
