//! Structural invariant checking.

use super::IndexedSkiplist;
use super::node::{HEAD, Link, NULL};

impl<K: Ord, G> IndexedSkiplist<K, G> {
    /// Walk the whole structure and panic if any invariant is broken.
    ///
    /// Checks level-0 ordering and `prev` links, `len` and `tail`, node
    /// heights, and that every link at every level in use has the width its
    /// endpoints' ranks imply, so each level's widths sum to `len`. Costs
    /// O(n * height). This crate's unit tests run it after every mutation.
    pub fn check_invariants(&self) {
        let slots = self.arena.slots();
        assert!(
            self.top < self.max_level,
            "INVARIANT VIOLATED: top level {} >= max_level {}",
            self.top,
            self.max_level
        );

        // Level 0: ordering, back links, and the rank of every live node.
        let mut ranks = vec![usize::MAX; slots];
        ranks[HEAD as usize] = 0;
        let mut prev = NULL;
        let mut idx = self.arena.node(HEAD).levels[0].next;
        let mut rank = 0;
        while idx != NULL {
            let node = self.arena.node(idx);
            rank += 1;
            assert!(
                rank <= self.len,
                "INVARIANT VIOLATED: level 0 holds more than len()={} nodes",
                self.len
            );
            assert!(
                node.key.is_some(),
                "INVARIANT VIOLATED: node {} at rank {} has no key",
                idx,
                rank
            );
            assert_eq!(
                node.prev, prev,
                "INVARIANT VIOLATED: node {} has prev={} but follows {}",
                idx, node.prev, prev
            );
            assert!(
                node.height() >= 1 && node.height() <= self.top + 1,
                "INVARIANT VIOLATED: node {} has height {} with top level {}",
                idx,
                node.height(),
                self.top
            );
            if prev != NULL {
                assert!(
                    self.arena.node(prev).key < node.key,
                    "INVARIANT VIOLATED: keys out of order at rank {}",
                    rank
                );
            }
            ranks[idx as usize] = rank;
            prev = idx;
            idx = node.levels[0].next;
        }
        assert_eq!(
            rank, self.len,
            "INVARIANT VIOLATED: level 0 holds {} nodes != len()={}",
            rank, self.len
        );
        assert_eq!(
            self.tail, prev,
            "INVARIANT VIOLATED: tail={} but the last node is {}",
            self.tail, prev
        );
        assert_eq!(
            self.arena.live(),
            self.len,
            "INVARIANT VIOLATED: {} live slots != len()={}",
            self.arena.live(),
            self.len
        );

        // Every level in use: widths match ranks, and the level visits
        // exactly the nodes tall enough to be on it.
        for level in 0..=self.top {
            let mut idx = HEAD;
            let mut total = 0usize;
            let mut visited = 0usize;
            loop {
                let link = self.arena.node(idx).levels[level];
                let expected = if link.next == NULL {
                    self.len - ranks[idx as usize]
                } else {
                    let next_rank = ranks[link.next as usize];
                    assert!(
                        next_rank != usize::MAX,
                        "INVARIANT VIOLATED: level {} links to node {} which is not on level 0",
                        level,
                        link.next
                    );
                    assert!(
                        next_rank > ranks[idx as usize],
                        "INVARIANT VIOLATED: level {} goes backwards from node {} to {}",
                        level,
                        idx,
                        link.next
                    );
                    assert!(
                        self.arena.node(link.next).height() > level,
                        "INVARIANT VIOLATED: level {} links to node {} of height {}",
                        level,
                        link.next,
                        self.arena.node(link.next).height()
                    );
                    next_rank - ranks[idx as usize]
                };
                assert_eq!(
                    link.width as usize, expected,
                    "INVARIANT VIOLATED: level {} link from node {} has width {}, expected {}",
                    level, idx, link.width, expected
                );
                total += link.width as usize;
                if link.next == NULL {
                    break;
                }
                visited += 1;
                idx = link.next;
            }
            assert_eq!(
                total, self.len,
                "INVARIANT VIOLATED: level {} widths sum to {} != len()={}",
                level, total, self.len
            );

            let tall = (1..slots)
                .filter(|&i| ranks[i] != usize::MAX && self.arena.node(i as u32).height() > level)
                .count();
            assert_eq!(
                visited, tall,
                "INVARIANT VIOLATED: level {} visits {} nodes but {} nodes reach it",
                level, visited, tall
            );
        }

        // Head levels above the top are unused, and the top level is not empty.
        let head = self.arena.node(HEAD);
        assert_eq!(head.height(), self.max_level);
        for level in (self.top + 1)..self.max_level {
            assert_eq!(
                head.levels[level],
                Link::EMPTY,
                "INVARIANT VIOLATED: unused head level {} is not empty",
                level
            );
        }
        if self.top > 0 {
            assert_ne!(
                head.levels[self.top].next, NULL,
                "INVARIANT VIOLATED: top level {} is empty",
                self.top
            );
        }
    }
}
