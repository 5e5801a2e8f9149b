//! Structural operations of the unbalanced tree. No rebalancing: attach
//! at the leaf, splice on removal, worst case O(n) depth by design.

use crate::types::Node;
use crate::util::{get_l, get_p, get_r, set_l, set_p, set_r, swap};

pub fn insert_left<N: Node>(arena: &mut [N], root: Option<u32>, node: u32, parent: u32) -> Option<u32> {
    set_l(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
    root
}

pub fn insert_right<N: Node>(arena: &mut [N], root: Option<u32>, node: u32, parent: u32) -> Option<u32> {
    set_r(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
    root
}

/// Unlinks `node`. A node with two children first trades places with its
/// in-order successor (topology swap, keys stay put), after which it has
/// at most one child and is spliced out directly.
pub fn remove<N: Node>(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32> {
    let Some(mut root) = root else {
        return None;
    };

    if let (Some(_), Some(r)) = (get_l(arena, node), get_r(arena, node)) {
        let mut succ = r;
        while let Some(sl) = get_l(arena, succ) {
            succ = sl;
        }
        root = swap(arena, root, node, succ);
    }

    let p = get_p(arena, node);
    let child = get_l(arena, node).or(get_r(arena, node));
    set_p(arena, node, None);
    set_l(arena, node, None);
    set_r(arena, node, None);

    if let Some(child) = child {
        set_p(arena, child, p);
    }
    match p {
        Some(p) => {
            if get_l(arena, p) == Some(node) {
                set_l(arena, p, child);
            } else {
                set_r(arena, p, child);
            }
            Some(root)
        }
        None => child,
    }
}
