//! Red-black balancing machinery.
//!
//! A single color bit per node; absent children count as black. Insertion
//! repairs red-red violations bottom-up, recoloring past a red uncle and
//! rotating otherwise. Removal trades a two-child node with its in-order
//! successor (topology swap, colors exchanged, keys stay on their slots),
//! splices it out and then restores equal black heights with the usual
//! sibling case analysis.

use crate::util::{first, get_l, get_p, get_r, next, set_l, set_p, set_r, swap};

use super::types::RbNodeLike;

#[inline]
fn is_black<K, N: RbNodeLike<K>>(arena: &[N], i: u32) -> bool {
    arena[i as usize].is_black()
}

#[inline]
fn set_black<K, N: RbNodeLike<K>>(arena: &mut [N], i: u32, v: bool) {
    arena[i as usize].set_black(v);
}

pub fn insert_left<K, N: RbNodeLike<K>>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    p: u32,
) -> Option<u32> {
    let g = get_p(arena, p);
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    if is_black(arena, p) || g.is_none() {
        return root;
    }
    let top = l_rebalance(arena, n, p, g.expect("g exists"));
    if get_p(arena, top).is_some() {
        root
    } else {
        Some(top)
    }
}

pub fn insert_right<K, N: RbNodeLike<K>>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    p: u32,
) -> Option<u32> {
    let g = get_p(arena, p);
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    if is_black(arena, p) || g.is_none() {
        return root;
    }
    let top = r_rebalance(arena, n, p, g.expect("g exists"));
    if get_p(arena, top).is_some() {
        root
    } else {
        Some(top)
    }
}

fn l_rebalance<K, N: RbNodeLike<K>>(arena: &mut [N], n: u32, p: u32, g: u32) -> u32 {
    let gr = get_r(arena, g);
    let zigzag = gr == Some(p);
    let u = if zigzag { get_l(arena, g) } else { gr };
    let uncle_is_black = u.map(|u| is_black(arena, u)).unwrap_or(true);
    if uncle_is_black {
        set_black(arena, g, false);
        if zigzag {
            rl_rotate(arena, g, p, n);
            set_black(arena, n, true);
            return n;
        }
        set_black(arena, p, true);
        l_rotate(arena, g, p);
        return p;
    }
    recolor(arena, p, g, u)
}

fn r_rebalance<K, N: RbNodeLike<K>>(arena: &mut [N], n: u32, p: u32, g: u32) -> u32 {
    let gl = get_l(arena, g);
    let zigzag = gl == Some(p);
    let u = if zigzag { get_r(arena, g) } else { gl };
    let uncle_is_black = u.map(|u| is_black(arena, u)).unwrap_or(true);
    if uncle_is_black {
        set_black(arena, g, false);
        if zigzag {
            lr_rotate(arena, g, p, n);
            set_black(arena, n, true);
            return n;
        }
        set_black(arena, p, true);
        r_rotate(arena, g, p);
        return p;
    }
    recolor(arena, p, g, u)
}

/// Red uncle: push blackness down from the grandparent and climb.
fn recolor<K, N: RbNodeLike<K>>(arena: &mut [N], p: u32, g: u32, u: Option<u32>) -> u32 {
    set_black(arena, p, true);
    if let Some(u) = u {
        set_black(arena, u, true);
    }

    let gg = get_p(arena, g);
    if let Some(gg) = gg {
        set_black(arena, g, false);
        if is_black(arena, gg) {
            return g;
        }

        let ggg = get_p(arena, gg);
        if let Some(ggg) = ggg {
            return if get_l(arena, gg) == Some(g) {
                l_rebalance(arena, g, gg, ggg)
            } else {
                r_rebalance(arena, g, gg, ggg)
            };
        }

        gg
    } else {
        set_black(arena, g, true);
        g
    }
}

/// Lifts `nl`, the left child of `n`.
fn l_rotate<K, N: RbNodeLike<K>>(arena: &mut [N], n: u32, nl: u32) {
    let p = get_p(arena, n);
    let nlr = get_r(arena, nl);

    set_r(arena, nl, Some(n));
    set_l(arena, n, nlr);
    if let Some(nlr) = nlr {
        set_p(arena, nlr, Some(n));
    }

    set_p(arena, n, Some(nl));
    set_p(arena, nl, p);
    if let Some(p) = p {
        if get_l(arena, p) == Some(n) {
            set_l(arena, p, Some(nl));
        } else {
            set_r(arena, p, Some(nl));
        }
    }
}

/// Lifts `nr`, the right child of `n`.
fn r_rotate<K, N: RbNodeLike<K>>(arena: &mut [N], n: u32, nr: u32) {
    let p = get_p(arena, n);
    let nrl = get_l(arena, nr);

    set_l(arena, nr, Some(n));
    set_r(arena, n, nrl);
    if let Some(nrl) = nrl {
        set_p(arena, nrl, Some(n));
    }

    set_p(arena, n, Some(nr));
    set_p(arena, nr, p);
    if let Some(p) = p {
        if get_l(arena, p) == Some(n) {
            set_l(arena, p, Some(nr));
        } else {
            set_r(arena, p, Some(nr));
        }
    }
}

/// Zigzag case: `n` ends up on top with `p` to its left and `g` to its right.
fn lr_rotate<K, N: RbNodeLike<K>>(arena: &mut [N], g: u32, p: u32, n: u32) {
    let gg = get_p(arena, g);
    let nl = get_l(arena, n);
    let nr = get_r(arena, n);

    if let Some(gg) = gg {
        if get_l(arena, gg) == Some(g) {
            set_l(arena, gg, Some(n));
        } else {
            set_r(arena, gg, Some(n));
        }
    }

    set_p(arena, n, gg);
    set_l(arena, n, Some(p));
    set_r(arena, n, Some(g));
    set_p(arena, p, Some(n));
    set_p(arena, g, Some(n));

    set_r(arena, p, nl);
    if let Some(nl) = nl {
        set_p(arena, nl, Some(p));
    }

    set_l(arena, g, nr);
    if let Some(nr) = nr {
        set_p(arena, nr, Some(g));
    }
}

/// Zigzag case: `n` ends up on top with `g` to its left and `p` to its right.
fn rl_rotate<K, N: RbNodeLike<K>>(arena: &mut [N], g: u32, p: u32, n: u32) {
    let gg = get_p(arena, g);
    let nl = get_l(arena, n);
    let nr = get_r(arena, n);

    if let Some(gg) = gg {
        if get_l(arena, gg) == Some(g) {
            set_l(arena, gg, Some(n));
        } else {
            set_r(arena, gg, Some(n));
        }
    }

    set_p(arena, n, gg);
    set_l(arena, n, Some(g));
    set_r(arena, n, Some(p));
    set_p(arena, g, Some(n));
    set_p(arena, p, Some(n));

    set_r(arena, g, nl);
    if let Some(nl) = nl {
        set_p(arena, nl, Some(g));
    }

    set_l(arena, p, nr);
    if let Some(nr) = nr {
        set_p(arena, nr, Some(p));
    }
}

pub fn remove<K, N: RbNodeLike<K>>(
    arena: &mut [N],
    mut root: Option<u32>,
    mut n: u32,
) -> Option<u32> {
    let original = n;
    let r = get_r(arena, n);
    let l = get_l(arena, n);
    let child: Option<u32>;

    if let Some(r) = r {
        let mut successor = r;
        while let Some(sl) = get_l(arena, successor) {
            successor = sl;
        }
        n = successor;
        child = get_r(arena, n);
    } else if get_p(arena, n).is_none() {
        // Root with no right subtree: the left child, if any, takes over.
        if let Some(l) = l {
            set_black(arena, l, true);
            set_p(arena, l, None);
        }
        return l;
    } else {
        child = r.or(l);
    }

    if n != original {
        // Exchange colors, then positions. Keys stay attached to their
        // slots, so outstanding cursors keep pointing at the same keys.
        let successor_black = is_black(arena, n);
        set_black(arena, n, is_black(arena, original));
        set_black(arena, original, successor_black);

        let root_idx = root.expect("tree is non-empty");
        root = Some(swap(arena, root_idx, original, n));
        n = original;
    }

    if let Some(child) = child {
        let p = get_p(arena, n).expect("spliced node has a parent");
        set_p(arena, child, Some(p));
        if get_l(arena, p) == Some(n) {
            set_l(arena, p, Some(child));
        } else {
            set_r(arena, p, Some(child));
        }

        // A one-child node is black with a red child, so recoloring the
        // child preserves black heights.
        if !is_black(arena, child) {
            set_black(arena, child, true);
        } else {
            root = correct_double_black(arena, root, child);
        }
    } else {
        // Repair first, while the leaf is still linked, then unlink it.
        if is_black(arena, n) {
            root = correct_double_black(arena, root, n);
        }
        let p = get_p(arena, n).expect("non-root leaf has a parent");
        if get_l(arena, p) == Some(n) {
            set_l(arena, p, None);
        } else {
            set_r(arena, p, None);
        }
    }

    root
}

/// Restores equal black heights after a black node was removed. `n` is the
/// doubly-black node; when the removed node was a leaf it is the leaf
/// itself, still linked in. Returns the possibly new root.
fn correct_double_black<K, N: RbNodeLike<K>>(
    arena: &mut [N],
    mut root: Option<u32>,
    mut n: u32,
) -> Option<u32> {
    loop {
        let Some(p) = get_p(arena, n) else {
            return Some(n);
        };
        let left_child = get_l(arena, p) == Some(n);
        let mut s = if left_child {
            get_r(arena, p)
        } else {
            get_l(arena, p)
        }
        .expect("doubly-black node has a sibling");

        // Red sibling: rotate it over the parent so the new sibling is black.
        if !is_black(arena, s) {
            set_black(arena, s, true);
            set_black(arena, p, false);
            if left_child {
                r_rotate(arena, p, s);
            } else {
                l_rotate(arena, p, s);
            }
            if get_p(arena, s).is_none() {
                root = Some(s);
            }
            s = if left_child {
                get_r(arena, p)
            } else {
                get_l(arena, p)
            }
            .expect("red sibling has black children");
        }

        let sl = get_l(arena, s);
        let sr = get_r(arena, s);
        let sl_black = sl.map(|x| is_black(arena, x)).unwrap_or(true);
        let sr_black = sr.map(|x| is_black(arena, x)).unwrap_or(true);

        // Both nephews black: pull a black off this subtree and either
        // absorb it in a red parent or climb.
        if sl_black && sr_black {
            set_black(arena, s, false);
            if !is_black(arena, p) {
                set_black(arena, p, true);
                return root;
            }
            n = p;
            continue;
        }

        if left_child {
            if sr_black {
                // Near nephew red: lift it so the far nephew becomes red.
                let sl = sl.expect("near nephew is red");
                set_black(arena, sl, true);
                set_black(arena, s, false);
                l_rotate(arena, s, sl);
                s = sl;
            }
            let far = get_r(arena, s).expect("far nephew is red");
            let p_black = is_black(arena, p);
            set_black(arena, s, p_black);
            set_black(arena, p, true);
            set_black(arena, far, true);
            r_rotate(arena, p, s);
        } else {
            if sl_black {
                let sr = sr.expect("near nephew is red");
                set_black(arena, sr, true);
                set_black(arena, s, false);
                r_rotate(arena, s, sr);
                s = sr;
            }
            let far = get_l(arena, s).expect("far nephew is red");
            let p_black = is_black(arena, p);
            set_black(arena, s, p_black);
            set_black(arena, p, true);
            set_black(arena, far, true);
            l_rotate(arena, p, s);
        }

        return if get_p(arena, s).is_some() {
            root
        } else {
            Some(s)
        };
    }
}

/// Full red-black invariant check: parent links, a black root, no red node
/// with a red child, equal black heights and strict in-order ordering.
pub fn check_red_black<K, N, C>(arena: &[N], root: Option<u32>, comparator: &C) -> Result<(), String>
where
    N: RbNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };
    if get_p(arena, root).is_some() {
        return Err("root has a parent".to_string());
    }
    if !is_black(arena, root) {
        return Err("root is red".to_string());
    }
    black_height(arena, root)?;

    let mut curr = first(arena, Some(root));
    while let Some(c) = curr {
        let nx = next(arena, c);
        if let Some(nx) = nx {
            if comparator(arena[c as usize].key(), arena[nx as usize].key()) >= 0 {
                return Err(format!("keys out of order at node {c}"));
            }
        }
        curr = nx;
    }
    Ok(())
}

fn black_height<K, N: RbNodeLike<K>>(arena: &[N], n: u32) -> Result<u32, String> {
    let l = get_l(arena, n);
    let r = get_r(arena, n);
    for child in [l, r].into_iter().flatten() {
        if get_p(arena, child) != Some(n) {
            return Err(format!("bad parent link at node {child}"));
        }
        if !is_black(arena, n) && !is_black(arena, child) {
            return Err(format!("red node {n} has red child {child}"));
        }
    }
    let lh = match l {
        Some(l) => black_height(arena, l)?,
        None => 0,
    };
    let rh = match r {
        Some(r) => black_height(arena, r)?,
        None => 0,
    };
    if lh != rh {
        return Err(format!("black height mismatch at node {n}: {lh} vs {rh}"));
    }
    Ok(lh + u32::from(is_black(arena, n)))
}
