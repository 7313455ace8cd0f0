use std::iter::FusedIterator;

use super::node::{Arena, Idx, NULL};

/// Iterator over a run of keys in ascending order.
///
/// Forward steps follow level-0 `next` links; backward steps (`next_back`)
/// follow the `prev` links, the only doubly linked level.
pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    /// Next node to yield from the front.
    front: Idx,
    /// Next node to yield from the back.
    back: Idx,
    /// Keys left between `front` and `back`, inclusive.
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(arena: &'a Arena<K>, front: Idx, back: Idx, remaining: usize) -> Self {
        Iter {
            arena,
            front,
            back,
            remaining,
        }
    }

    pub(crate) fn empty(arena: &'a Arena<K>) -> Self {
        Iter::new(arena, NULL, NULL, 0)
    }
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter::new(self.arena, self.front, self.back, self.remaining)
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.node(self.front);
        self.front = node.levels[0].next;
        self.remaining -= 1;
        node.key.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.node(self.back);
        self.back = node.prev;
        self.remaining -= 1;
        node.key.as_ref()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
