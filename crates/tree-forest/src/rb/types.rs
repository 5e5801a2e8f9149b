use crate::types::{KeyNode, Node};

/// Red-black node: key, links and one color bit.
#[derive(Clone, Debug)]
pub struct RbNode<K> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    /// `true` for black. Absent children count as black.
    pub black: bool,
}

impl<K> Node for RbNode<K> {
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

impl<K> KeyNode<K> for RbNode<K> {
    fn new(key: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k: key,
            black: false,
        }
    }

    fn key(&self) -> &K {
        &self.k
    }
}

/// Color access needed by the red-black machinery.
pub trait RbNodeLike<K>: KeyNode<K> {
    fn is_black(&self) -> bool;
    fn set_black(&mut self, black: bool);
}

impl<K> RbNodeLike<K> for RbNode<K> {
    fn is_black(&self) -> bool {
        self.black
    }

    fn set_black(&mut self, black: bool) {
        self.black = black;
    }
}
