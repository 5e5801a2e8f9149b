use crate::types::{KeyNode, Node};

/// AVL node: key, links and a balance factor.
#[derive(Clone, Debug)]
pub struct AvlNode<K> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    /// `height(left) - height(right)`; within `{-1, 0, 1}` after any
    /// completed rebalance.
    pub bf: i32,
}

impl<K> Node for AvlNode<K> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K> KeyNode<K> for AvlNode<K> {
    fn new(key: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k: key,
            bf: 0,
        }
    }

    fn key(&self) -> &K {
        &self.k
    }
}

/// Balance-factor access needed by the AVL machinery.
pub trait AvlNodeLike<K>: KeyNode<K> {
    fn bf(&self) -> i32;
    fn set_bf(&mut self, bf: i32);
}

impl<K> AvlNodeLike<K> for AvlNode<K> {
    fn bf(&self) -> i32 {
        self.bf
    }

    fn set_bf(&mut self, bf: i32) {
        self.bf = bf;
    }
}
