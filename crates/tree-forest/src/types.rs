//! Node traits shared by the binary-tree variants.
//!
//! Every tree stores its nodes in a `Vec`-backed arena and links them with
//! `Option<u32>` indices. Walkers and rebalancing code never touch a node
//! directly; they go through these traits so the same machinery serves the
//! plain, AVL and red-black node layouts.

/// Structural links of a binary-tree node (parent / left / right).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// A binary-tree node owning exactly one key.
pub trait KeyNode<K>: Node + Sized {
    /// Fresh unlinked node carrying `key`.
    fn new(key: K) -> Self;
    fn key(&self) -> &K;
}

/// Three-way ordering predicate: negative if `a` precedes `b`, zero if
/// neither precedes the other, positive if `b` precedes `a`.
pub type Comparator<K> = fn(&K, &K) -> i32;

/// Default ordering predicate for totally ordered keys.
pub fn natural_order<K: Ord>(a: &K, b: &K) -> i32 {
    match a.cmp(b) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}
