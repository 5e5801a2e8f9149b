//! Shared core for the three binary-tree variants.
//!
//! [`SetCore`] owns the node arena plus the tree metadata (root index,
//! cached min/max, element count) and drives key descent; the balancing
//! strategy is plugged in through [`TreeOps`]. The cached extremes give
//! O(1) `first`/`last` and O(1) decrement-from-end without a sentinel
//! node.

use std::marker::PhantomData;

use crate::types::KeyNode;
use crate::util::{self, first, last, next, prev};

/// Structural callbacks a balancing strategy must provide.
///
/// The core performs the comparator descent and node allocation; the ops
/// only attach or detach a node and restore the variant's invariant,
/// returning the new root.
pub trait TreeOps<K, N: KeyNode<K>> {
    /// Makes `node` the root of a previously empty tree.
    fn insert_root(arena: &mut [N], node: u32) -> Option<u32>;

    /// Attaches `node` as the left child of leaf position `parent`.
    fn insert_left(arena: &mut [N], root: Option<u32>, node: u32, parent: u32) -> Option<u32>;

    /// Attaches `node` as the right child of leaf position `parent`.
    fn insert_right(arena: &mut [N], root: Option<u32>, node: u32, parent: u32) -> Option<u32>;

    /// Unlinks `node` and restores the variant's invariant.
    fn remove(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32>;
}

/// Arena-backed ordered-set core.
///
/// Cursors handed out by this type are arena indices; they stay valid
/// across unrelated mutations and are invalidated only when the element
/// they refer to is erased (the slot goes onto the free list and may be
/// recycled). Using a stale cursor is a caller contract violation.
pub struct SetCore<K, N, O, C>
where
    N: KeyNode<K>,
    O: TreeOps<K, N>,
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<N>,
    free: Vec<u32>,
    root: Option<u32>,
    min: Option<u32>,
    max: Option<u32>,
    comparator: C,
    len: usize,
    _key: PhantomData<K>,
    _ops: PhantomData<O>,
}

impl<K, N, O, C> SetCore<K, N, O, C>
where
    N: KeyNode<K>,
    O: TreeOps<K, N>,
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            min: None,
            max: None,
            comparator,
            len: 0,
            _key: PhantomData,
            _ops: PhantomData,
        }
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn arena(&self) -> &[N] {
        &self.arena
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn key(&self, idx: u32) -> &K {
        self.arena[idx as usize].key()
    }

    /// Height of the tree in edges.
    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }

    /// Reserves a slot for `key` before any link is touched, so an
    /// allocation failure cannot leave the structure half-mutated.
    fn alloc(&mut self, key: K) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                self.arena[idx as usize] = N::new(key);
                idx
            }
            None => {
                self.arena.push(N::new(key));
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Inserts `key` unless an equal key is present. Returns the position
    /// of the key and whether a new element was created.
    pub fn insert(&mut self, key: K) -> (u32, bool) {
        let Some(root) = self.root else {
            let idx = self.alloc(key);
            self.root = O::insert_root(&mut self.arena, idx);
            self.min = Some(idx);
            self.max = Some(idx);
            self.len = 1;
            return (idx, true);
        };

        let max = self.max.expect("non-empty tree tracks max");
        let max_cmp = (self.comparator)(&key, self.arena[max as usize].key());
        if max_cmp == 0 {
            return (max, false);
        }
        if max_cmp > 0 {
            let idx = self.alloc(key);
            self.root = O::insert_right(&mut self.arena, Some(root), idx, max);
            self.max = Some(idx);
            self.len += 1;
            return (idx, true);
        }

        let min = self.min.expect("non-empty tree tracks min");
        let min_cmp = (self.comparator)(&key, self.arena[min as usize].key());
        if min_cmp == 0 {
            return (min, false);
        }
        if min_cmp < 0 {
            let idx = self.alloc(key);
            self.root = O::insert_left(&mut self.arena, Some(root), idx, min);
            self.min = Some(idx);
            self.len += 1;
            return (idx, true);
        }

        let mut curr = root;
        loop {
            let cmp = (self.comparator)(&key, self.arena[curr as usize].key());
            if cmp == 0 {
                return (curr, false);
            }
            let child = if cmp < 0 {
                self.arena[curr as usize].l()
            } else {
                self.arena[curr as usize].r()
            };
            match child {
                Some(child) => curr = child,
                None => {
                    let idx = self.alloc(key);
                    self.root = if cmp < 0 {
                        O::insert_left(&mut self.arena, self.root, idx, curr)
                    } else {
                        O::insert_right(&mut self.arena, self.root, idx, curr)
                    };
                    self.len += 1;
                    return (idx, true);
                }
            }
        }
    }

    pub fn find(&self, key: &K) -> Option<u32> {
        util::find(&self.arena, self.root, key, &self.comparator)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn lower_bound(&self, key: &K) -> Option<u32> {
        util::lower_bound(&self.arena, self.root, key, &self.comparator)
    }

    pub fn upper_bound(&self, key: &K) -> Option<u32> {
        util::upper_bound(&self.arena, self.root, key, &self.comparator)
    }

    /// Erases `key` if present; returns the number of elements removed.
    pub fn erase(&mut self, key: &K) -> usize {
        match self.find(key) {
            Some(node) => {
                self.remove_at(node);
                1
            }
            None => 0,
        }
    }

    /// Erases the element at `node`; returns the position following it.
    pub fn erase_at(&mut self, node: u32) -> Option<u32> {
        let after = next(&self.arena, node);
        self.remove_at(node);
        after
    }

    fn remove_at(&mut self, node: u32) {
        // Extremes are re-derived before the topology changes.
        if self.max == Some(node) {
            self.max = prev(&self.arena, node);
        }
        if self.min == Some(node) {
            self.min = next(&self.arena, node);
        }

        self.root = O::remove(&mut self.arena, self.root, node);
        self.len -= 1;
        self.free.push(node);

        if self.len == 0 {
            self.root = None;
            self.min = None;
            self.max = None;
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.min = None;
        self.max = None;
        self.len = 0;
    }

    pub fn first(&self) -> Option<u32> {
        self.min
    }

    pub fn last(&self) -> Option<u32> {
        self.max
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        next(&self.arena, curr)
    }

    pub fn prev(&self, curr: u32) -> Option<u32> {
        prev(&self.arena, curr)
    }

    /// Slow-path recomputation of both extremes, used by validators.
    pub fn recompute_extremes(&self) -> (Option<u32>, Option<u32>) {
        (first(&self.arena, self.root), last(&self.arena, self.root))
    }
}
