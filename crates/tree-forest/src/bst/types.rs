use crate::types::{KeyNode, Node};

/// Plain BST node: one key, three links, no balance metadata.
#[derive(Clone, Debug)]
pub struct BstNode<K> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
}

impl<K> Node for BstNode<K> {
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

impl<K> KeyNode<K> for BstNode<K> {
    fn new(key: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k: key,
        }
    }

    fn key(&self) -> &K {
        &self.k
    }
}
