//! Rankskip - an ordered index with logarithmic access by rank.
//!
//! [`IndexedSkiplist`] is a skiplist whose links also record how many
//! elements they jump over. That turns "give me the 10,000th smallest key"
//! into an O(log n) walk instead of a 10,000-step scan, which is what makes
//! deep pagination cheap.
//!
//! # Quick Start
//!
//! ```
//! use rankskip::IndexedSkiplist;
//!
//! // Posts ordered by (published_at, id), newest last.
//! let mut posts = IndexedSkiplist::new();
//! for (published_at, id) in [(1700, 3), (1650, 1), (1800, 7), (1650, 2)] {
//!     posts.insert((published_at, id)).unwrap();
//! }
//!
//! // Second page of two posts each.
//! let page: Vec<_> = posts.page(2, 2).collect();
//! assert_eq!(page, vec![&(1700, 3), &(1800, 7)]);
//!
//! assert_eq!(posts.rank(&(1700, 3)), Some(2));
//! assert!(posts.delete(&(1650, 1)));
//! assert_eq!(posts.skip(0), Some(&(1650, 2)));
//! ```
//!
//! # Configuration
//!
//! Levels are drawn from a [`LevelGenerator`] owned by each skiplist, so two
//! instances never share random state. Seed it for reproducible shapes:
//!
//! ```
//! use rankskip::{IndexedSkiplist, SkiplistConfig};
//!
//! let config = SkiplistConfig::default().with_seed(42).with_max_level(16);
//! let mut list = IndexedSkiplist::with_config(config).unwrap();
//! list.insert("key").unwrap();
//! assert_eq!(list.max_level(), 16);
//! ```

pub mod config;
pub mod error;
pub mod level;
pub mod skiplist;

pub use config::{MAX_LEVEL, SkiplistConfig};
pub use error::{Error, Result};
pub use level::{Geometric, LevelGenerator};
pub use skiplist::{IndexedSkiplist, Iter};
