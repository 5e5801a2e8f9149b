//! AVL attach/detach and rebalancing.
//!
//! Four rotation cases keyed on the sign of a node's balance factor and
//! its heavier child's: left-left and right-right take a single rotation,
//! left-right and right-left compose two. Insertion rebalances along the
//! insertion path and stops as soon as a subtree absorbs the height
//! change; removal walks from the splice point toward the root and may
//! rotate at every level.

use crate::util::{first, next};

use super::types::AvlNodeLike;

#[inline]
fn set_p<K, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K>,
{
    arena[i as usize].set_p(v);
}

#[inline]
fn set_l<K, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K>,
{
    arena[i as usize].set_l(v);
}

#[inline]
fn set_r<K, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K>,
{
    arena[i as usize].set_r(v);
}

#[inline]
fn bf<K, N>(arena: &[N], i: u32) -> i32
where
    N: AvlNodeLike<K>,
{
    arena[i as usize].bf()
}

#[inline]
fn set_bf<K, N>(arena: &mut [N], i: u32, v: i32)
where
    N: AvlNodeLike<K>,
{
    arena[i as usize].set_bf(v);
}

/// Single right rotation for the left-left case: `nl` replaces `n`.
fn rotate_ll<K, N>(arena: &mut [N], n: u32, nl: u32)
where
    N: AvlNodeLike<K>,
{
    let p = arena[n as usize].p();
    let nlr = arena[nl as usize].r();

    set_p(arena, nl, p);
    set_r(arena, nl, Some(n));
    set_p(arena, n, Some(nl));
    set_l(arena, n, nlr);
    if let Some(nlr) = nlr {
        set_p(arena, nlr, Some(n));
    }
    if let Some(p) = p {
        if arena[p as usize].l() == Some(n) {
            set_l(arena, p, Some(nl));
        } else {
            set_r(arena, p, Some(nl));
        }
    }

    let mut nbf = bf(arena, n);
    let mut nlbf = bf(arena, nl);
    nbf += -1 - if nlbf > 0 { nlbf } else { 0 };
    nlbf += -1 + if nbf < 0 { nbf } else { 0 };
    set_bf(arena, n, nbf);
    set_bf(arena, nl, nlbf);
}

/// Single left rotation for the right-right case: `nr` replaces `n`.
fn rotate_rr<K, N>(arena: &mut [N], n: u32, nr: u32)
where
    N: AvlNodeLike<K>,
{
    let p = arena[n as usize].p();
    let nrl = arena[nr as usize].l();

    set_p(arena, nr, p);
    set_l(arena, nr, Some(n));
    set_p(arena, n, Some(nr));
    set_r(arena, n, nrl);
    if let Some(nrl) = nrl {
        set_p(arena, nrl, Some(n));
    }
    if let Some(p) = p {
        if arena[p as usize].l() == Some(n) {
            set_l(arena, p, Some(nr));
        } else {
            set_r(arena, p, Some(nr));
        }
    }

    let mut nbf = bf(arena, n);
    let mut nrbf = bf(arena, nr);
    nbf += 1 - if nrbf < 0 { nrbf } else { 0 };
    nrbf += 1 + if nbf > 0 { nbf } else { 0 };
    set_bf(arena, n, nbf);
    set_bf(arena, nr, nrbf);
}

/// Double rotation for the left-right case: `nlr` replaces `n`.
fn rotate_lr<K, N>(arena: &mut [N], n: u32, nl: u32, nlr: u32)
where
    N: AvlNodeLike<K>,
{
    rotate_rr(arena, nl, nlr);
    rotate_ll(arena, n, nlr);
}

/// Double rotation for the right-left case: `nrl` replaces `n`.
fn rotate_rl<K, N>(arena: &mut [N], n: u32, nr: u32, nrl: u32)
where
    N: AvlNodeLike<K>,
{
    rotate_ll(arena, nr, nrl);
    rotate_rr(arena, n, nrl);
}

/// Walks up from freshly linked `node` updating balance factors; rotates
/// once the first ancestor tips past ±1. Returns the new root.
fn rebalance_after_insert<K, N>(arena: &mut [N], root: u32, node: u32, child: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let Some(p) = arena[node as usize].p() else {
        return root;
    };

    let is_left = arena[p as usize].l() == Some(node);
    let mut pbf = bf(arena, p);
    if is_left {
        pbf += 1;
    } else {
        pbf -= 1;
    }
    set_bf(arena, p, pbf);

    match pbf {
        0 => root,
        1 | -1 => rebalance_after_insert(arena, root, p, node),
        _ => {
            let is_child_left = arena[node as usize].l() == Some(child);
            if is_left {
                if is_child_left {
                    rotate_ll(arena, p, node);
                    if arena[node as usize].p().is_some() {
                        root
                    } else {
                        node
                    }
                } else {
                    rotate_lr(arena, p, node, child);
                    if arena[child as usize].p().is_some() {
                        root
                    } else {
                        child
                    }
                }
            } else if is_child_left {
                rotate_rl(arena, p, node, child);
                if arena[child as usize].p().is_some() {
                    root
                } else {
                    child
                }
            } else {
                rotate_rr(arena, p, node);
                if arena[node as usize].p().is_some() {
                    root
                } else {
                    node
                }
            }
        }
    }
}

pub fn insert_left<K, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    let root = root.expect("insert_left on a non-empty tree");
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    let pbf = bf(arena, p) + 1;
    set_bf(arena, p, pbf);
    if arena[p as usize].r().is_some() {
        Some(root)
    } else {
        Some(rebalance_after_insert(arena, root, p, n))
    }
}

pub fn insert_right<K, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    let root = root.expect("insert_right on a non-empty tree");
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    let pbf = bf(arena, p) - 1;
    set_bf(arena, p, pbf);
    if arena[p as usize].l().is_some() {
        Some(root)
    } else {
        Some(rebalance_after_insert(arena, root, p, n))
    }
}

/// Unlinks `n` and restores height balance.
///
/// Two-child nodes are replaced by the in-order predecessor of the left
/// subtree; the rebalance walk starts at the physical removal point and,
/// unlike insertion, may rotate at every ancestor.
pub fn remove<K, N>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    let Some(root) = root else {
        return None;
    };

    let p = arena[n as usize].p();
    let l = arena[n as usize].l();
    let r = arena[n as usize].r();
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);

    if let (Some(l), Some(r)) = (l, r) {
        let lr = arena[l as usize].r();
        if lr.is_none() {
            // Left child is itself the predecessor.
            if let Some(p) = p {
                if arena[p as usize].l() == Some(n) {
                    set_l(arena, p, Some(l));
                } else {
                    set_r(arena, p, Some(l));
                }
            }
            set_p(arena, l, p);
            set_r(arena, l, Some(r));
            set_p(arena, r, Some(l));
            let nbf = bf(arena, n);
            if p.is_some() {
                set_bf(arena, l, nbf);
                return rebalance_left_shrink(arena, Some(root), l, 1);
            }

            let lbf = nbf - 1;
            set_bf(arena, l, lbf);
            if lbf >= -1 {
                return Some(l);
            }
            let rl = arena[r as usize].l();
            if bf(arena, r) > 0 {
                let rl = rl.expect("left-leaning right child has a left child");
                rotate_rl(arena, l, r, rl);
                return Some(rl);
            }
            rotate_rr(arena, l, r);
            return Some(r);
        }

        // General case: splice in the in-order predecessor.
        let mut v = l;
        while let Some(vr) = arena[v as usize].r() {
            v = vr;
        }
        let vl = arena[v as usize].l();
        let vp = arena[v as usize].p().expect("predecessor has a parent");

        if let Some(p) = p {
            if arena[p as usize].l() == Some(n) {
                set_l(arena, p, Some(v));
            } else {
                set_r(arena, p, Some(v));
            }
        }

        set_p(arena, v, p);
        set_r(arena, v, Some(r));
        let nbf = bf(arena, n);
        set_bf(arena, v, nbf);
        if l != v {
            set_l(arena, v, Some(l));
            set_p(arena, l, Some(v));
        }
        set_p(arena, r, Some(v));

        if arena[vp as usize].l() == Some(v) {
            set_l(arena, vp, vl);
        } else {
            set_r(arena, vp, vl);
        }
        if let Some(vl) = vl {
            set_p(arena, vl, Some(vp));
        }

        return rebalance_right_shrink(
            arena,
            if p.is_some() { Some(root) } else { Some(v) },
            vp,
            1,
        );
    }

    let child = l.or(r);
    if let Some(c) = child {
        set_p(arena, c, p);
    }
    let Some(p) = p else {
        return child;
    };

    if arena[p as usize].l() == Some(n) {
        set_l(arena, p, child);
        rebalance_left_shrink(arena, Some(root), p, 1)
    } else {
        set_r(arena, p, child);
        rebalance_right_shrink(arena, Some(root), p, 1)
    }
}

/// The left subtree of `n` shrank by `d`.
fn rebalance_left_shrink<K, N>(arena: &mut [N], root: Option<u32>, mut n: u32, d: i32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    let nbf = bf(arena, n) - d;
    set_bf(arena, n, nbf);
    let mut next_d = d;

    if nbf == -1 {
        return root;
    }

    if nbf < -1 {
        let u = arena[n as usize].r().expect("right-heavy node has a right child");
        if bf(arena, u) <= 0 {
            if arena[u as usize].l().is_some() && bf(arena, u) == 0 {
                next_d = 0;
            }
            rotate_rr(arena, n, u);
            n = u;
        } else {
            let ul = arena[u as usize].l().expect("left-leaning child has a left child");
            rotate_rl(arena, n, u, ul);
            n = ul;
        }
    }

    let Some(p) = arena[n as usize].p() else {
        return Some(n);
    };

    if arena[p as usize].l() == Some(n) {
        rebalance_left_shrink(arena, root, p, next_d)
    } else {
        rebalance_right_shrink(arena, root, p, next_d)
    }
}

/// The right subtree of `n` shrank by `d`.
fn rebalance_right_shrink<K, N>(arena: &mut [N], root: Option<u32>, mut n: u32, d: i32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    let nbf = bf(arena, n) + d;
    set_bf(arena, n, nbf);
    let mut next_d = d;

    if nbf == 1 {
        return root;
    }

    if nbf > 1 {
        let u = arena[n as usize].l().expect("left-heavy node has a left child");
        if bf(arena, u) >= 0 {
            if arena[u as usize].r().is_some() && bf(arena, u) == 0 {
                next_d = 0;
            }
            rotate_ll(arena, n, u);
            n = u;
        } else {
            let ur = arena[u as usize].r().expect("right-leaning child has a right child");
            rotate_lr(arena, n, u, ur);
            n = ur;
        }
    }

    let Some(p) = arena[n as usize].p() else {
        return Some(n);
    };

    if arena[p as usize].l() == Some(n) {
        rebalance_left_shrink(arena, root, p, next_d)
    } else {
        rebalance_right_shrink(arena, root, p, next_d)
    }
}

fn subtree_height<K, N>(arena: &[N], node: u32) -> usize
where
    N: AvlNodeLike<K>,
{
    let l = arena[node as usize]
        .l()
        .map(|i| subtree_height(arena, i))
        .unwrap_or(0);
    let r = arena[node as usize]
        .r()
        .map(|i| subtree_height(arena, i))
        .unwrap_or(0);
    1 + l.max(r)
}

/// Full AVL invariant check: parent links, stored balance factors versus
/// recomputed heights, |bf| <= 1 everywhere, strict in-order ordering.
pub fn check_avl<K, N, C>(arena: &[N], root: Option<u32>, comparator: &C) -> Result<(), String>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].p().is_some() {
        return Err("root has a parent".to_string());
    }

    fn validate<K, N>(arena: &[N], node: u32) -> Result<(), String>
    where
        N: AvlNodeLike<K>,
    {
        let l = arena[node as usize].l();
        let r = arena[node as usize].r();

        if let Some(l) = l {
            if arena[l as usize].p() != Some(node) {
                return Err("broken parent link on left child".to_string());
            }
            validate(arena, l)?;
        }
        if let Some(r) = r {
            if arena[r as usize].p() != Some(node) {
                return Err("broken parent link on right child".to_string());
            }
            validate(arena, r)?;
        }

        let lh = l.map(|i| subtree_height(arena, i)).unwrap_or(0) as i32;
        let rh = r.map(|i| subtree_height(arena, i)).unwrap_or(0) as i32;
        let expected = lh - rh;
        let actual = arena[node as usize].bf();
        if actual != expected {
            return Err(format!(
                "balance factor mismatch: stored {actual}, recomputed {expected}"
            ));
        }
        if !(-1..=1).contains(&actual) {
            return Err("AVL balance violated".to_string());
        }

        Ok(())
    }

    validate(arena, root)?;

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
