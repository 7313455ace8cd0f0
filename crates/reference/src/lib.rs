//! Naive ordered indexes for cross-checking `rankskip`.
//!
//! These answer the same questions as `IndexedSkiplist` in the most obvious
//! way possible, so they are easy to trust:
//!
//! - Conformance testing: property tests replay random operation sequences
//!   against both and compare every answer
//! - Benchmarking: rank access here walks `offset` elements, which is the
//!   linear cost the width augmentation avoids
//!
//! # Example
//!
//! ```
//! use rankskip_reference::LinearIndex;
//!
//! let mut index = LinearIndex::new();
//! assert!(index.insert("b"));
//! assert!(index.insert("a"));
//! assert!(!index.insert("a"));
//!
//! assert_eq!(index.skip(0), Some(&"a"));
//! assert_eq!(index.rank(&"b"), Some(1));
//! ```

use std::collections::BTreeSet;

/// An ordered set whose rank queries walk the sequence from the start.
#[derive(Clone, Debug)]
pub struct LinearIndex<K> {
    keys: BTreeSet<K>,
}

impl<K: Ord> LinearIndex<K> {
    pub fn new() -> LinearIndex<K> {
        return LinearIndex {
            keys: BTreeSet::new(),
        };
    }

    /// Insert a key. Returns false if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        return self.keys.insert(key);
    }

    /// Delete a key. Returns whether it was present.
    pub fn delete(&mut self, key: &K) -> bool {
        return self.keys.remove(key);
    }

    pub fn search(&self, key: &K) -> Option<&K> {
        return self.keys.get(key);
    }

    /// Key at 0-based position `offset`, found by walking `offset` elements.
    pub fn skip(&self, offset: usize) -> Option<&K> {
        return self.keys.iter().nth(offset);
    }

    /// 0-based position of `key`, found by walking up to it.
    pub fn rank(&self, key: &K) -> Option<usize> {
        return self.keys.iter().position(|k| k == key);
    }

    /// Up to `limit` keys starting at position `offset`.
    pub fn page(&self, offset: usize, limit: usize) -> Vec<&K> {
        return self.keys.iter().skip(offset).take(limit).collect();
    }

    pub fn len(&self) -> usize {
        return self.keys.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.keys.is_empty();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &K> {
        return self.keys.iter();
    }
}

impl<K: Ord> Default for LinearIndex<K> {
    fn default() -> Self {
        return Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_and_skip_agree() {
        let mut index = LinearIndex::new();
        for key in [5, 1, 4, 2, 3] {
            assert!(index.insert(key));
        }
        for offset in 0..5 {
            let key = *index.skip(offset).unwrap();
            assert_eq!(key, offset as i32 + 1);
            assert_eq!(index.rank(&key), Some(offset));
        }
        assert_eq!(index.skip(5), None);
    }

    #[test]
    fn page_past_end() {
        let mut index = LinearIndex::new();
        for key in 0..10 {
            index.insert(key);
        }
        assert_eq!(index.page(8, 5), vec![&8, &9]);
        assert!(index.page(10, 5).is_empty());
    }
}
