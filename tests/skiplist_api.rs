//! Scenario tests for the public skiplist API.

use std::sync::{Arc, RwLock};
use std::thread;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use rankskip::{Error, IndexedSkiplist, SkiplistConfig};

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn letters_skip_and_delete() {
    let mut list = IndexedSkiplist::new();
    for key in ["a", "b", "c", "d", "e"] {
        list.insert(key.to_string()).unwrap();
    }

    assert_eq!(list.skip(0).map(String::as_str), Some("a"));
    assert_eq!(list.skip(4).map(String::as_str), Some("e"));
    assert_eq!(list.skip(5), None);

    assert!(list.delete("c"));
    assert_eq!(list.skip(2).map(String::as_str), Some("d"));
    assert_eq!(list.len(), 4);
    assert_eq!(list.search("c"), None);
    list.check_invariants();
}

#[test]
fn thousand_random_integers() {
    let mut rng = StdRng::seed_from_u64(0xfeed);
    let mut keys: Vec<i64> = (-5_000..5_000).collect();
    keys.shuffle(&mut rng);
    keys.truncate(1000);

    let mut list = IndexedSkiplist::with_seed(0xbeef);
    for &key in &keys {
        list.insert(key).unwrap();
    }

    let mut sorted = keys.clone();
    sorted.sort();

    let forward: Vec<i64> = list.iter().copied().collect();
    assert_eq!(forward, sorted);
    assert!(forward.windows(2).all(|w| w[0] < w[1]));

    for (i, key) in sorted.iter().enumerate() {
        assert_eq!(list.skip(i), Some(key), "skip({}) diverged", i);
    }
    list.check_invariants();
}

#[test]
fn round_trip() {
    let mut list = IndexedSkiplist::with_seed(9);
    list.insert(42u32).unwrap();
    assert_eq!(list.search(&42), Some(&42));
    assert!(list.delete(&42));
    assert_eq!(list.search(&42), None);
    assert!(list.is_empty());
}

// =============================================================================
// Pagination
// =============================================================================

/// Posts keyed by (score, id) so equal scores stay distinct.
#[test]
fn paginate_posts_by_score() {
    let mut feed = IndexedSkiplist::with_seed(1);
    for id in 0..1000u32 {
        let score = id % 37;
        feed.insert((score, id)).unwrap();
    }

    let per_page = 25;
    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let page: Vec<_> = feed.page(offset, per_page).copied().collect();
        if page.is_empty() {
            break;
        }
        assert!(page.len() <= per_page);
        seen.extend(page);
        offset += per_page;
    }
    assert_eq!(seen, feed.iter().copied().collect::<Vec<_>>());
    assert_eq!(seen.len(), 1000);

    // Deep page straight away matches walking there.
    let deep: Vec<_> = feed.page(900, 10).collect();
    let walked: Vec<_> = feed.iter().skip(900).take(10).collect();
    assert_eq!(deep, walked);
}

#[test]
fn page_after_deletes() {
    let mut list = IndexedSkiplist::with_seed(2);
    for key in 0..100 {
        list.insert(key).unwrap();
    }
    for key in (0..100).filter(|k| k % 3 == 0) {
        assert!(list.delete(&key));
    }
    let expected: Vec<i32> = (0..100).filter(|k| k % 3 != 0).skip(10).take(5).collect();
    let page: Vec<i32> = list.page(10, 5).copied().collect();
    assert_eq!(page, expected);
}

#[test]
fn browse_backwards_from_a_key() {
    let mut list = IndexedSkiplist::with_seed(4);
    for key in ["ant", "bee", "cat", "dog", "eel", "fox"] {
        list.insert(key).unwrap();
    }
    // Everything from "cat" onwards, newest first.
    let tail: Vec<_> = list.iter_from("cat").rev().copied().collect();
    assert_eq!(tail, vec!["fox", "eel", "dog", "cat"]);

    let all_rev: Vec<_> = list.iter_rev().copied().collect();
    assert_eq!(all_rev, vec!["fox", "eel", "dog", "cat", "bee", "ant"]);
}

// =============================================================================
// Errors and configuration
// =============================================================================

#[test]
fn duplicate_policy() {
    let mut list = IndexedSkiplist::with_seed(5);
    list.insert(1).unwrap();
    let err = list.insert(1).unwrap_err();
    assert_eq!(err, Error::DuplicateKey);
    assert_eq!(err.to_string(), "key is already present in the skiplist");
    assert_eq!(list.len(), 1);
}

#[test]
fn invalid_config_is_reported() {
    let config = SkiplistConfig::default().with_promotion_probability(1.0);
    match IndexedSkiplist::<i32>::with_config(config) {
        Err(Error::InvalidConfig { message }) => {
            assert!(message.contains("promotion_probability"), "{}", message);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("config with p = 1.0 was accepted"),
    }
}

#[test]
fn sparse_promotion_still_ranks() {
    let config = SkiplistConfig::default()
        .with_seed(6)
        .with_promotion_probability(0.25);
    let mut list = IndexedSkiplist::with_config(config).unwrap();
    for key in (0..500).rev() {
        list.insert(key).unwrap();
    }
    for offset in (0..500).step_by(7) {
        assert_eq!(list.skip(offset), Some(&(offset as i32)));
    }
}

#[test]
fn independent_instances_do_not_share_rng() {
    let build = |seed| {
        let mut list = IndexedSkiplist::with_seed(seed);
        for key in 0..500 {
            list.insert(key).unwrap();
        }
        list.height()
    };
    // Interleaving construction of other lists does not perturb a seeded one.
    let first = build(10);
    let _ = build(11);
    let again = build(10);
    assert_eq!(first, again);
}

// =============================================================================
// Sharing across threads
// =============================================================================

#[test]
fn readers_share_behind_rwlock() {
    let mut list = IndexedSkiplist::with_seed(7);
    for key in 0..1000u64 {
        list.insert(key).unwrap();
    }
    let shared = Arc::new(RwLock::new(list));

    let readers: Vec<_> = (0..4)
        .map(|t| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let list = shared.read().unwrap();
                for offset in (t..1000).step_by(4) {
                    assert_eq!(list.skip(offset as usize), Some(&offset));
                }
            })
        })
        .collect();
    for reader in readers {
        reader.join().unwrap();
    }

    shared.write().unwrap().insert(5000).unwrap();
    assert_eq!(shared.read().unwrap().last(), Some(&5000));
}
