//! Ordered-set container family.
//!
//! Four interchangeable implementations of a unique-key ordered set,
//! sharing the cursor-based [`OrderedSet`] contract but differing in
//! balancing strategy:
//!
//! - [`BstSet`] — plain binary search tree, no rebalancing (baseline),
//! - [`AvlSet`] — height-balanced tree, balance factors and rotations,
//! - [`RbSet`] — red-black tree, recoloring plus rotations,
//! - [`BTreeSet`] — wide-fan-out B-tree with a construction-time order.
//!
//! Instead of raw pointers, all structural links are `Option<u32>` (or
//! plain `u32`) indices into a `Vec`-backed arena owned by the tree, with
//! a free list reclaiming erased slots. Cursors are those indices (a
//! descent path for the B-tree); the synthetic end position is `None`.
//!
//! ```
//! use tree_forest::{AvlSet, OrderedSet};
//!
//! let mut set = AvlSet::new();
//! for k in [30, 10, 20] {
//!     set.insert(k);
//! }
//! let keys: Vec<i32> = set.iter().copied().collect();
//! assert_eq!(keys, vec![10, 20, 30]);
//! ```

pub mod avl;
pub mod bst;
pub mod btree;
pub mod contract;
pub mod rb;
pub mod set;
pub mod types;
pub mod util;

pub use avl::AvlSet;
pub use bst::BstSet;
pub use btree::{BTreeSet, BtreeCursor};
pub use contract::{Keys, OrderedSet};
pub use rb::RbSet;
pub use types::{natural_order, Comparator, KeyNode, Node};
