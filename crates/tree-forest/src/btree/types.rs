/// B-tree node. Leaves keep `children` empty; internal nodes hold one more
/// child than keys, with `children[i]` the subtree strictly below `keys[i]`.
#[derive(Clone, Debug)]
pub struct BtreeNode<K> {
    pub leaf: bool,
    pub keys: Vec<K>,
    pub children: Vec<u32>,
}

impl<K> BtreeNode<K> {
    pub fn new(leaf: bool) -> Self {
        Self {
            leaf,
            keys: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Position of one key: the descent path from the root. Every entry pairs a
/// node index with the child slot taken; the last entry holds the key slot
/// within its node instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BtreeCursor {
    pub(crate) path: Vec<(u32, usize)>,
}
