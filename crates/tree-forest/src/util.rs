//! Arena walkers shared by the binary-tree variants.
//!
//! All functions take the arena as a slice and work with `u32` indices;
//! `Option<u32>` stands in for the nil/end position throughout.

use crate::types::{KeyNode, Node};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Leftmost node of the subtree under `root`.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node of the subtree under `root`.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor of `node`: leftmost of the right subtree, or the
/// first ancestor reached from a left child.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        let mut curr = r;
        while let Some(l) = get_l(arena, curr) {
            curr = l;
        }
        return Some(curr);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor of `node`.
pub fn prev<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        let mut curr = l;
        while let Some(r) = get_r(arena, curr) {
            curr = r;
        }
        return Some(curr);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Exact-match lookup.
pub fn find<K, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, arena[i as usize].key());
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// First node whose key is not less than `key`.
pub fn lower_bound<K, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        if comparator(arena[i as usize].key(), key) >= 0 {
            result = Some(i);
            curr = get_l(arena, i);
        } else {
            curr = get_r(arena, i);
        }
    }
    result
}

/// First node whose key is strictly greater than `key`.
pub fn upper_bound<K, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        if comparator(arena[i as usize].key(), key) > 0 {
            result = Some(i);
            curr = get_l(arena, i);
        } else {
            curr = get_r(arena, i);
        }
    }
    result
}

/// Height in edges of the subtree under `root` (empty tree: 0, single
/// node: 0).
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    fn levels<N: Node>(arena: &[N], node: u32) -> usize {
        let l = get_l(arena, node).map_or(0, |i| levels(arena, i));
        let r = get_r(arena, node).map_or(0, |i| levels(arena, i));
        1 + l.max(r)
    }
    root.map_or(0, |i| levels(arena, i).saturating_sub(1))
}

/// Exchanges the tree positions of `x` and `y`, handling adjacency.
/// Keys stay attached to their nodes; only the topology moves. Returns
/// the (possibly updated) root.
pub fn swap<N: Node>(arena: &mut [N], mut root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    let xp = get_p(arena, x);
    let xl = get_l(arena, x);
    let xr = get_r(arena, x);

    let yp = get_p(arena, y);
    let yl = get_l(arena, y);
    let yr = get_r(arena, y);

    if yl == Some(x) {
        set_l(arena, x, Some(y));
        set_p(arena, y, Some(x));
    } else {
        set_l(arena, x, yl);
        if let Some(yl) = yl {
            set_p(arena, yl, Some(x));
        }
    }

    if yr == Some(x) {
        set_r(arena, x, Some(y));
        set_p(arena, y, Some(x));
    } else {
        set_r(arena, x, yr);
        if let Some(yr) = yr {
            set_p(arena, yr, Some(x));
        }
    }

    if xl == Some(y) {
        set_l(arena, y, Some(x));
        set_p(arena, x, Some(y));
    } else {
        set_l(arena, y, xl);
        if let Some(xl) = xl {
            set_p(arena, xl, Some(y));
        }
    }

    if xr == Some(y) {
        set_r(arena, y, Some(x));
        set_p(arena, x, Some(y));
    } else {
        set_r(arena, y, xr);
        if let Some(xr) = xr {
            set_p(arena, xr, Some(y));
        }
    }

    if xp.is_none() {
        root = y;
        set_p(arena, y, None);
    } else if xp != Some(y) {
        set_p(arena, y, xp);
        if let Some(xp) = xp {
            if get_l(arena, xp) == Some(x) {
                set_l(arena, xp, Some(y));
            } else {
                set_r(arena, xp, Some(y));
            }
        }
    }

    if yp.is_none() {
        root = x;
        set_p(arena, x, None);
    } else if yp != Some(x) {
        set_p(arena, x, yp);
        if let Some(yp) = yp {
            if get_l(arena, yp) == Some(y) {
                set_l(arena, yp, Some(x));
            } else {
                set_r(arena, yp, Some(x));
            }
        }
    }

    root
}

/// Checks parent links and strict in-order key ordering under `root`.
pub fn check_links_and_order<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err("root has a parent".to_string());
    }

    fn walk<K, N: KeyNode<K>>(arena: &[N], node: u32) -> Result<(), String> {
        if let Some(l) = get_l(arena, node) {
            if get_p(arena, l) != Some(node) {
                return Err("broken parent link on left child".to_string());
            }
            walk(arena, l)?;
        }
        if let Some(r) = get_r(arena, node) {
            if get_p(arena, r) != Some(node) {
                return Err("broken parent link on right child".to_string());
            }
            walk(arena, r)?;
        }
        Ok(())
    }
    walk(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(p) = prev_node {
            if comparator(arena[p as usize].key(), arena[i as usize].key()) >= 0 {
                return Err("in-order key sequence is not strictly increasing".to_string());
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}
