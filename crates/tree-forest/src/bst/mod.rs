//! Unbalanced binary search tree, the baseline variant.

pub mod types;
pub mod util;

pub use types::BstNode;

use crate::contract::{Keys, OrderedSet};
use crate::set::{SetCore, TreeOps};
use crate::types::{natural_order, Comparator};

pub struct BstOps;

impl<K> TreeOps<K, BstNode<K>> for BstOps {
    fn insert_root(_arena: &mut [BstNode<K>], node: u32) -> Option<u32> {
        Some(node)
    }

    fn insert_left(arena: &mut [BstNode<K>], root: Option<u32>, node: u32, parent: u32) -> Option<u32> {
        util::insert_left(arena, root, node, parent)
    }

    fn insert_right(arena: &mut [BstNode<K>], root: Option<u32>, node: u32, parent: u32) -> Option<u32> {
        util::insert_right(arena, root, node, parent)
    }

    fn remove(arena: &mut [BstNode<K>], root: Option<u32>, node: u32) -> Option<u32> {
        util::remove(arena, root, node)
    }
}

/// Plain binary search tree set. Degrades to O(n) operations under
/// adversarial (e.g. monotonic) insertion order.
pub struct BstSet<K, C = Comparator<K>>
where
    C: Fn(&K, &K) -> i32,
{
    core: SetCore<K, BstNode<K>, BstOps, C>,
}

impl<K: Ord> BstSet<K> {
    pub fn new() -> Self {
        Self::with_comparator(natural_order::<K>)
    }
}

impl<K: Ord> Default for BstSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> BstSet<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            core: SetCore::with_comparator(comparator),
        }
    }

    pub fn iter(&self) -> Keys<'_, K, Self> {
        Keys::new(self)
    }

    /// Height of the tree in edges.
    pub fn height(&self) -> usize {
        self.core.height()
    }

    /// Structural self-check: parent links, strict in-order ordering and
    /// the cached extremes.
    pub fn assert_valid(&self) -> Result<(), String> {
        crate::util::check_links_and_order(
            self.core.arena(),
            self.core.root_index(),
            self.core.comparator(),
        )?;
        if self.core.recompute_extremes() != (self.core.first(), self.core.last()) {
            return Err("cached extremes out of date".to_string());
        }
        Ok(())
    }
}

impl<K, C> OrderedSet<K> for BstSet<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Cursor = u32;

    fn insert(&mut self, key: K) -> (u32, bool) {
        self.core.insert(key)
    }

    fn erase(&mut self, key: &K) -> usize {
        self.core.erase(key)
    }

    fn erase_at(&mut self, cursor: u32) -> Option<u32> {
        self.core.erase_at(cursor)
    }

    fn find(&self, key: &K) -> Option<u32> {
        self.core.find(key)
    }

    fn lower_bound(&self, key: &K) -> Option<u32> {
        self.core.lower_bound(key)
    }

    fn upper_bound(&self, key: &K) -> Option<u32> {
        self.core.upper_bound(key)
    }

    fn first(&self) -> Option<u32> {
        self.core.first()
    }

    fn last(&self) -> Option<u32> {
        self.core.last()
    }

    fn next(&self, cursor: &u32) -> Option<u32> {
        self.core.next(*cursor)
    }

    fn prev(&self, cursor: &u32) -> Option<u32> {
        self.core.prev(*cursor)
    }

    fn key(&self, cursor: &u32) -> &K {
        self.core.key(*cursor)
    }

    fn len(&self) -> usize {
        self.core.len()
    }

    fn clear(&mut self) {
        self.core.clear()
    }
}
