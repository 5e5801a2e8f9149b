use tree_forest::{AvlSet, OrderedSet};

#[test]
fn seven_keys_form_a_perfect_tree() {
    let mut set = AvlSet::new();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        set.insert(k);
        set.assert_valid().unwrap();
    }
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(set.height(), 2);
}

#[test]
fn monotonic_insertion_stays_logarithmic() {
    let mut set = AvlSet::new();
    for k in 0..1024 {
        set.insert(k);
    }
    set.assert_valid().unwrap();
    assert_eq!(set.len(), 1024);
    // Worst-case AVL height is under 1.45 * log2(n).
    assert!(set.height() <= 14, "height {} too large", set.height());
}

#[test]
fn alternating_extremes_stay_balanced() {
    let mut set = AvlSet::new();
    let mut lo = 0;
    let mut hi = 1000;
    while lo < hi {
        set.insert(lo);
        set.insert(hi);
        set.assert_valid().unwrap();
        lo += 1;
        hi -= 1;
    }
    assert!(set.height() <= 14, "height {} too large", set.height());
}

#[test]
fn erase_rebalances() {
    let mut set = AvlSet::new();
    for k in 0..200 {
        set.insert(k);
    }
    for k in (0..200).step_by(2) {
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    assert_eq!(set.len(), 100);
    let keys: Vec<i32> = set.iter().copied().collect();
    let expect: Vec<i32> = (0..200).filter(|k| k % 2 == 1).collect();
    assert_eq!(keys, expect);
}

#[test]
fn two_child_removal_keeps_the_invariant() {
    let mut set = AvlSet::new();
    for k in [8, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7] {
        set.insert(k);
    }
    set.assert_valid().unwrap();
    // Internal nodes with two children, including the root.
    for k in [4, 8, 12] {
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![1, 2, 3, 5, 6, 7, 10, 14]);
}
