//! An ordered map on a randomized, doubly-linked skip list.
//!
//! Every entry sits in a tower of forward and backward links, one pair per
//! level; tower heights are drawn from a geometric distribution so that
//! searches take expected O(log n) steps without any rebalancing. The map
//! can also trace the path of a search and describe its own layout, for
//! drawing diagrams of the list.
//!
//! ```
//! use towers::SkipMap;
//!
//! let mut map = SkipMap::new();
//! map.insert(4, "four");
//! map.insert(1, "one");
//! map.insert(9, "nine");
//!
//! assert_eq!(map.get(&4), Some(&"four"));
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 4, 9]);
//! assert_eq!(map.first_key(), Ok(&1));
//! ```

mod error;
mod height;
mod skiplist;
mod trace;
mod view;

pub mod map;

pub use error::{Error, Result};
pub use height::{CoinFlip, HeightGenerator, MAX_HEIGHT};
pub use map::SkipMap;
pub use view::{TowerView, Towers};
