//! B-tree variant with a runtime fan-out.
//!
//! Multi-way nodes live in the same kind of arena the binary variants use,
//! but links are `Vec`s of child indices instead of three fixed slots.
//! Insertion splits every full node on the way down, so the leaf always has
//! room; erasure tops up every visited child to above the minimum before
//! descending, so underflow never propagates back up.

pub mod types;

pub use types::{BtreeCursor, BtreeNode};

use std::mem;

use crate::contract::{Keys, OrderedSet};
use crate::types::{natural_order, Comparator};

/// Fan-out used by `Default`, sized so a node fills a couple of cache lines
/// for small keys.
pub const DEFAULT_ORDER: usize = 32;

/// B-tree set with fan-out `order`: every node holds at most `order - 1`
/// keys, and every node except the root at least `order / 2 - 1`.
pub struct BTreeSet<K, C = Comparator<K>>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<BtreeNode<K>>,
    free: Vec<u32>,
    root: Option<u32>,
    order: usize,
    len: usize,
    comparator: C,
}

impl<K: Ord> BTreeSet<K> {
    /// Panics if `order < 3`: a node must be able to hold two keys so a
    /// split has a median with a non-empty half on each side.
    pub fn new(order: usize) -> Self {
        Self::with_comparator(order, natural_order::<K>)
    }
}

impl<K: Ord> Default for BTreeSet<K> {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}

impl<K, C> BTreeSet<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(order: usize, comparator: C) -> Self {
        assert!(order >= 3, "b-tree fan-out must be at least 3");
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            order,
            len: 0,
            comparator,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Height in edges; 0 for an empty tree or a lone root leaf.
    pub fn height(&self) -> usize {
        let Some(mut curr) = self.root else {
            return 0;
        };
        let mut h = 0;
        while !self.arena[curr as usize].leaf {
            h += 1;
            curr = self.arena[curr as usize].children[0];
        }
        h
    }

    fn max_keys(&self) -> usize {
        self.order - 1
    }

    fn min_keys(&self) -> usize {
        self.order / 2 - 1
    }

    fn alloc(&mut self, leaf: bool) -> u32 {
        let node = BtreeNode::new(leaf);
        match self.free.pop() {
            Some(idx) => {
                self.arena[idx as usize] = node;
                idx
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    fn free_node(&mut self, node: u32) {
        let n = &mut self.arena[node as usize];
        n.keys.clear();
        n.children.clear();
        self.free.push(node);
    }

    /// First slot whose key is `>= key`, plus whether it is an exact hit.
    fn search_keys(&self, node: u32, key: &K) -> (usize, bool) {
        let keys = &self.arena[node as usize].keys;
        let mut lo = 0;
        let mut hi = keys.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if (self.comparator)(&keys[mid], key) < 0 {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        let found = lo < keys.len() && (self.comparator)(&keys[lo], key) == 0;
        (lo, found)
    }

    /// First slot whose key is strictly `> key`.
    fn search_keys_upper(&self, node: u32, key: &K) -> usize {
        let keys = &self.arena[node as usize].keys;
        let mut lo = 0;
        let mut hi = keys.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if (self.comparator)(&keys[mid], key) <= 0 {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    pub fn insert(&mut self, key: K) -> (BtreeCursor, bool) {
        let Some(root) = self.root else {
            let idx = self.alloc(true);
            self.arena[idx as usize].keys.push(key);
            self.root = Some(idx);
            self.len = 1;
            return (BtreeCursor { path: vec![(idx, 0)] }, true);
        };

        if self.arena[root as usize].keys.len() == self.max_keys() {
            let new_root = self.alloc(false);
            self.arena[new_root as usize].children.push(root);
            self.split_child(new_root, 0);
            self.root = Some(new_root);
        }

        let mut path = Vec::new();
        let mut curr = self.root.expect("tree is non-empty");
        loop {
            let (idx, found) = self.search_keys(curr, &key);
            if found {
                path.push((curr, idx));
                return (BtreeCursor { path }, false);
            }
            if self.arena[curr as usize].leaf {
                self.arena[curr as usize].keys.insert(idx, key);
                self.len += 1;
                path.push((curr, idx));
                return (BtreeCursor { path }, true);
            }
            let child = self.arena[curr as usize].children[idx];
            if self.arena[child as usize].keys.len() == self.max_keys() {
                self.split_child(curr, idx);
                // The median moved up into slot idx; route around it.
                let cmp = (self.comparator)(&key, &self.arena[curr as usize].keys[idx]);
                if cmp == 0 {
                    path.push((curr, idx));
                    return (BtreeCursor { path }, false);
                }
                if cmp > 0 {
                    path.push((curr, idx + 1));
                    curr = self.arena[curr as usize].children[idx + 1];
                    continue;
                }
            }
            path.push((curr, idx));
            curr = self.arena[curr as usize].children[idx];
        }
    }

    /// Splits the full child at `ci`, lifting its median into `parent`.
    ///
    /// At fan-out 3 a full node holds just two keys, so one half of the
    /// split is necessarily keyless. Navigation and erasure tolerate such
    /// nodes; they only appear at the minimum fan-out.
    fn split_child(&mut self, parent: u32, ci: usize) {
        let child = self.arena[parent as usize].children[ci];
        let mid = (self.order - 1) / 2;

        let child_node = &mut self.arena[child as usize];
        let leaf = child_node.leaf;
        let right_keys = child_node.keys.split_off(mid + 1);
        let median = child_node.keys.pop().expect("full node has a median");
        let right_children = if leaf {
            Vec::new()
        } else {
            child_node.children.split_off(mid + 1)
        };

        let right = self.alloc(leaf);
        self.arena[right as usize].keys = right_keys;
        self.arena[right as usize].children = right_children;

        let parent_node = &mut self.arena[parent as usize];
        parent_node.keys.insert(ci, median);
        parent_node.children.insert(ci + 1, right);
    }

    pub fn find(&self, key: &K) -> Option<BtreeCursor> {
        let mut path = Vec::new();
        let mut curr = self.root?;
        loop {
            let (idx, found) = self.search_keys(curr, key);
            if found {
                path.push((curr, idx));
                return Some(BtreeCursor { path });
            }
            let n = &self.arena[curr as usize];
            if n.leaf {
                return None;
            }
            path.push((curr, idx));
            curr = n.children[idx];
        }
    }

    pub fn lower_bound(&self, key: &K) -> Option<BtreeCursor> {
        let mut path = Vec::new();
        let mut best = None;
        let mut curr = self.root?;
        loop {
            let (idx, found) = self.search_keys(curr, key);
            if found {
                path.push((curr, idx));
                return Some(BtreeCursor { path });
            }
            let n = &self.arena[curr as usize];
            if idx < n.keys.len() {
                let mut candidate = path.clone();
                candidate.push((curr, idx));
                best = Some(BtreeCursor { path: candidate });
            }
            if n.leaf {
                return best;
            }
            path.push((curr, idx));
            curr = n.children[idx];
        }
    }

    pub fn upper_bound(&self, key: &K) -> Option<BtreeCursor> {
        let mut path = Vec::new();
        let mut best = None;
        let mut curr = self.root?;
        loop {
            let idx = self.search_keys_upper(curr, key);
            let n = &self.arena[curr as usize];
            if idx < n.keys.len() {
                let mut candidate = path.clone();
                candidate.push((curr, idx));
                best = Some(BtreeCursor { path: candidate });
            }
            if n.leaf {
                return best;
            }
            path.push((curr, idx));
            curr = n.children[idx];
        }
    }

    pub fn first(&self) -> Option<BtreeCursor> {
        let mut path = Vec::new();
        let mut best = None;
        let mut curr = self.root?;
        loop {
            path.push((curr, 0));
            let n = &self.arena[curr as usize];
            // The deepest node with keys on the leftmost path holds the
            // minimum; keyless nodes are skipped over.
            if !n.keys.is_empty() {
                best = Some(path.clone());
            }
            if n.leaf {
                return best.map(|path| BtreeCursor { path });
            }
            curr = n.children[0];
        }
    }

    pub fn last(&self) -> Option<BtreeCursor> {
        let mut path = Vec::new();
        let mut best = None;
        let mut curr = self.root?;
        loop {
            let n = &self.arena[curr as usize];
            if !n.keys.is_empty() {
                let mut candidate = path.clone();
                candidate.push((curr, n.keys.len() - 1));
                best = Some(candidate);
            }
            if n.leaf {
                return best.map(|path| BtreeCursor { path });
            }
            path.push((curr, n.children.len() - 1));
            curr = *n.children.last().expect("internal node has children");
        }
    }

    pub fn next(&self, cursor: &BtreeCursor) -> Option<BtreeCursor> {
        let mut path = cursor.path.clone();
        let &(node, slot) = path.last().expect("cursor is non-empty");
        let n = &self.arena[node as usize];

        if !n.leaf {
            // Leftmost key of the subtree right of this key, unless that
            // subtree is keyless.
            let mut sub = path.clone();
            *sub.last_mut().expect("cursor is non-empty") = (node, slot + 1);
            let mut best = None;
            let mut curr = n.children[slot + 1];
            loop {
                sub.push((curr, 0));
                let c = &self.arena[curr as usize];
                if !c.keys.is_empty() {
                    best = Some(sub.clone());
                }
                if c.leaf {
                    break;
                }
                curr = c.children[0];
            }
            if let Some(path) = best {
                return Some(BtreeCursor { path });
            }
        }
        if slot + 1 < n.keys.len() {
            *path.last_mut().expect("cursor is non-empty") = (node, slot + 1);
            return Some(BtreeCursor { path });
        }
        // Ran off the leaf: the next key is the separator right of the
        // first ancestor slot that still has one.
        path.pop();
        while let Some(&(anc, ci)) = path.last() {
            if ci < self.arena[anc as usize].keys.len() {
                return Some(BtreeCursor { path });
            }
            path.pop();
        }
        None
    }

    pub fn prev(&self, cursor: &BtreeCursor) -> Option<BtreeCursor> {
        let mut path = cursor.path.clone();
        let &(node, slot) = path.last().expect("cursor is non-empty");
        let n = &self.arena[node as usize];

        if !n.leaf {
            // Rightmost key of the subtree left of this key, unless that
            // subtree is keyless.
            let mut sub = path.clone();
            let mut best = None;
            let mut curr = n.children[slot];
            loop {
                let c = &self.arena[curr as usize];
                if !c.keys.is_empty() {
                    let mut candidate = sub.clone();
                    candidate.push((curr, c.keys.len() - 1));
                    best = Some(candidate);
                }
                if c.leaf {
                    break;
                }
                sub.push((curr, c.children.len() - 1));
                curr = *c.children.last().expect("internal node has children");
            }
            if let Some(path) = best {
                return Some(BtreeCursor { path });
            }
        }
        if slot > 0 {
            *path.last_mut().expect("cursor is non-empty") = (node, slot - 1);
            return Some(BtreeCursor { path });
        }
        path.pop();
        while let Some(&(anc, ci)) = path.last() {
            if ci > 0 {
                *path.last_mut().expect("cursor is non-empty") = (anc, ci - 1);
                return Some(BtreeCursor { path });
            }
            path.pop();
        }
        None
    }

    pub fn key<'a>(&'a self, cursor: &BtreeCursor) -> &'a K {
        let &(node, slot) = cursor.path.last().expect("cursor is non-empty");
        &self.arena[node as usize].keys[slot]
    }

    /// Full structural check: per-node occupancy, in-node ordering,
    /// separator bracketing and equal leaf depth.
    pub fn assert_valid(&self) -> Result<(), String> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.arena[root as usize].keys.is_empty() {
            return Err("root has no keys".to_string());
        }
        self.check_node(root, None, None, true)?;
        Ok(())
    }

    fn check_node(
        &self,
        node: u32,
        lo: Option<&K>,
        hi: Option<&K>,
        is_root: bool,
    ) -> Result<usize, String> {
        let n = &self.arena[node as usize];
        if !is_root && n.keys.len() < self.min_keys() {
            return Err(format!("node {node} underflows with {} keys", n.keys.len()));
        }
        if n.keys.len() > self.max_keys() {
            return Err(format!("node {node} overflows with {} keys", n.keys.len()));
        }
        for w in n.keys.windows(2) {
            if (self.comparator)(&w[0], &w[1]) >= 0 {
                return Err(format!("keys out of order in node {node}"));
            }
        }
        if let (Some(lo), Some(k)) = (lo, n.keys.first()) {
            if (self.comparator)(lo, k) >= 0 {
                return Err(format!("node {node} violates its lower separator"));
            }
        }
        if let (Some(hi), Some(k)) = (hi, n.keys.last()) {
            if (self.comparator)(k, hi) >= 0 {
                return Err(format!("node {node} violates its upper separator"));
            }
        }
        if n.leaf {
            if !n.children.is_empty() {
                return Err(format!("leaf {node} has children"));
            }
            return Ok(0);
        }
        if n.children.len() != n.keys.len() + 1 {
            return Err(format!(
                "node {node} has {} keys but {} children",
                n.keys.len(),
                n.children.len()
            ));
        }
        let mut depth = None;
        for (i, &child) in n.children.iter().enumerate() {
            let child_lo = if i == 0 { lo } else { Some(&n.keys[i - 1]) };
            let child_hi = n.keys.get(i).or(hi);
            let d = self.check_node(child, child_lo, child_hi, false)?;
            match depth {
                None => depth = Some(d),
                Some(prev) if prev != d => {
                    return Err(format!("uneven leaf depth under node {node}"));
                }
                _ => {}
            }
        }
        Ok(depth.expect("internal node has children") + 1)
    }
}

impl<K, C> BTreeSet<K, C>
where
    K: Clone,
    C: Fn(&K, &K) -> i32,
{
    pub fn iter(&self) -> Keys<'_, K, Self> {
        Keys::new(self)
    }

    pub fn erase(&mut self, key: &K) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let found = self.erase_from(root, key);
        // A merge may have drained the root down to a single child, and at
        // fan-out 3 that child can itself be a keyless split sibling, so
        // collapse the whole keyless chain. A keyless internal node has
        // exactly one child; an empty leaf ends the tree.
        while let Some(r) = self.root {
            let n = &self.arena[r as usize];
            if !n.keys.is_empty() {
                break;
            }
            let new_root = if n.leaf { None } else { Some(n.children[0]) };
            self.free_node(r);
            self.root = new_root;
        }
        if found {
            self.len -= 1;
            1
        } else {
            0
        }
    }

    pub fn erase_at(&mut self, cursor: BtreeCursor) -> Option<BtreeCursor> {
        let key = self.key(&cursor).clone();
        let succ = self.next(&cursor).map(|c| self.key(&c).clone());
        self.erase(&key);
        // Rebalancing invalidates descent paths, so relocate the successor.
        succ.and_then(|k| self.find(&k))
    }

    /// Recursive erase. Precondition: `node` is the root or holds more than
    /// the minimum number of keys, so removing one key from its subtree can
    /// always be absorbed locally.
    fn erase_from(&mut self, node: u32, key: &K) -> bool {
        let (idx, found) = self.search_keys(node, key);
        if self.arena[node as usize].leaf {
            if found {
                self.arena[node as usize].keys.remove(idx);
            }
            return found;
        }
        if found {
            let left = self.arena[node as usize].children[idx];
            if self.arena[left as usize].keys.len() > self.min_keys() {
                let pred = self.max_key_in(left);
                self.arena[node as usize].keys[idx] = pred.clone();
                return self.erase_from(left, &pred);
            }
            let right = self.arena[node as usize].children[idx + 1];
            if self.arena[right as usize].keys.len() > self.min_keys() {
                let succ = self.min_key_in(right);
                self.arena[node as usize].keys[idx] = succ.clone();
                return self.erase_from(right, &succ);
            }
            // Both neighbors at minimum: pull the key down into a merged
            // child and erase it there.
            self.merge_children(node, idx);
            return self.erase_from(left, key);
        }
        let mut ci = idx;
        let child = self.arena[node as usize].children[ci];
        if self.arena[child as usize].keys.len() <= self.min_keys() {
            ci = self.fill_child(node, ci);
        }
        let child = self.arena[node as usize].children[ci];
        self.erase_from(child, key)
    }

    fn min_key_in(&self, mut node: u32) -> K {
        let mut best: Option<&K> = None;
        loop {
            let n = &self.arena[node as usize];
            if let Some(k) = n.keys.first() {
                best = Some(k);
            }
            if n.leaf {
                return best.expect("subtree holds a key").clone();
            }
            node = n.children[0];
        }
    }

    fn max_key_in(&self, mut node: u32) -> K {
        let mut best: Option<&K> = None;
        loop {
            let n = &self.arena[node as usize];
            if let Some(k) = n.keys.last() {
                best = Some(k);
            }
            if n.leaf {
                return best.expect("subtree holds a key").clone();
            }
            node = *n.children.last().expect("internal node has children");
        }
    }

    /// Brings the child at `ci` above the minimum, borrowing from a sibling
    /// when one has a spare key and merging otherwise. Returns the slot the
    /// target child ends up in.
    fn fill_child(&mut self, node: u32, ci: usize) -> usize {
        let min = self.min_keys();
        if ci > 0 {
            let left = self.arena[node as usize].children[ci - 1];
            if self.arena[left as usize].keys.len() > min {
                self.borrow_from_prev(node, ci);
                return ci;
            }
        }
        if ci + 1 < self.arena[node as usize].children.len() {
            let right = self.arena[node as usize].children[ci + 1];
            if self.arena[right as usize].keys.len() > min {
                self.borrow_from_next(node, ci);
                return ci;
            }
        }
        if ci > 0 {
            self.merge_children(node, ci - 1);
            ci - 1
        } else {
            self.merge_children(node, ci);
            ci
        }
    }

    /// Rotates the left sibling's last key up through the separator.
    fn borrow_from_prev(&mut self, node: u32, ci: usize) {
        let left = self.arena[node as usize].children[ci - 1];
        let child = self.arena[node as usize].children[ci];

        let left_node = &mut self.arena[left as usize];
        let moved_key = left_node.keys.pop().expect("donor has a spare key");
        let moved_child = if left_node.leaf {
            None
        } else {
            left_node.children.pop()
        };

        let sep = mem::replace(&mut self.arena[node as usize].keys[ci - 1], moved_key);
        let child_node = &mut self.arena[child as usize];
        child_node.keys.insert(0, sep);
        if let Some(moved_child) = moved_child {
            child_node.children.insert(0, moved_child);
        }
    }

    /// Rotates the right sibling's first key up through the separator.
    fn borrow_from_next(&mut self, node: u32, ci: usize) {
        let child = self.arena[node as usize].children[ci];
        let right = self.arena[node as usize].children[ci + 1];

        let right_node = &mut self.arena[right as usize];
        let moved_key = right_node.keys.remove(0);
        let moved_child = if right_node.leaf {
            None
        } else {
            Some(right_node.children.remove(0))
        };

        let sep = mem::replace(&mut self.arena[node as usize].keys[ci], moved_key);
        let child_node = &mut self.arena[child as usize];
        child_node.keys.push(sep);
        if let Some(moved_child) = moved_child {
            child_node.children.push(moved_child);
        }
    }

    /// Folds the separator at `i` and the child right of it into the child
    /// left of it, freeing the emptied node.
    fn merge_children(&mut self, node: u32, i: usize) {
        let sep = self.arena[node as usize].keys.remove(i);
        let right = self.arena[node as usize].children.remove(i + 1);
        let left = self.arena[node as usize].children[i];

        let mut right_keys = mem::take(&mut self.arena[right as usize].keys);
        let mut right_children = mem::take(&mut self.arena[right as usize].children);
        let left_node = &mut self.arena[left as usize];
        left_node.keys.push(sep);
        left_node.keys.append(&mut right_keys);
        left_node.children.append(&mut right_children);

        self.free_node(right);
    }
}

impl<K, C> OrderedSet<K> for BTreeSet<K, C>
where
    K: Clone,
    C: Fn(&K, &K) -> i32,
{
    type Cursor = BtreeCursor;

    fn insert(&mut self, key: K) -> (BtreeCursor, bool) {
        BTreeSet::insert(self, key)
    }

    fn erase(&mut self, key: &K) -> usize {
        BTreeSet::erase(self, key)
    }

    fn erase_at(&mut self, cursor: BtreeCursor) -> Option<BtreeCursor> {
        BTreeSet::erase_at(self, cursor)
    }

    fn find(&self, key: &K) -> Option<BtreeCursor> {
        BTreeSet::find(self, key)
    }

    fn lower_bound(&self, key: &K) -> Option<BtreeCursor> {
        BTreeSet::lower_bound(self, key)
    }

    fn upper_bound(&self, key: &K) -> Option<BtreeCursor> {
        BTreeSet::upper_bound(self, key)
    }

    fn first(&self) -> Option<BtreeCursor> {
        BTreeSet::first(self)
    }

    fn last(&self) -> Option<BtreeCursor> {
        BTreeSet::last(self)
    }

    fn next(&self, cursor: &BtreeCursor) -> Option<BtreeCursor> {
        BTreeSet::next(self, cursor)
    }

    fn prev(&self, cursor: &BtreeCursor) -> Option<BtreeCursor> {
        BTreeSet::prev(self, cursor)
    }

    fn key(&self, cursor: &BtreeCursor) -> &K {
        BTreeSet::key(self, cursor)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        BTreeSet::clear(self)
    }
}
