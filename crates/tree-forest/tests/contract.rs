//! Behavior every variant must share, exercised through the common trait.

use tree_forest::{AvlSet, BTreeSet, BstSet, OrderedSet, RbSet};

fn collect_forward<S: OrderedSet<i32>>(set: &S) -> Vec<i32> {
    let mut keys = Vec::new();
    let mut curr = set.first();
    while let Some(c) = curr {
        keys.push(*set.key(&c));
        curr = set.next(&c);
    }
    keys
}

fn collect_backward<S: OrderedSet<i32>>(set: &S) -> Vec<i32> {
    let mut keys = Vec::new();
    let mut curr = set.last();
    while let Some(c) = curr {
        keys.push(*set.key(&c));
        curr = set.prev(&c);
    }
    keys
}

fn check_set_semantics<S: OrderedSet<i32>>(mut set: S) {
    assert!(set.is_empty());
    assert!(set.first().is_none());
    assert!(set.last().is_none());

    let (c1, created) = set.insert(7);
    assert!(created);
    let (c2, created) = set.insert(7);
    assert!(!created);
    assert_eq!(c1, c2);
    assert_eq!(set.len(), 1);

    assert_eq!(set.erase(&7), 1);
    assert_eq!(set.erase(&7), 0);
    assert!(set.is_empty());
    assert!(!set.contains(&7));
}

fn check_bounds<S: OrderedSet<i32>>(mut set: S) {
    for k in [10, 20, 30] {
        set.insert(k);
    }

    assert_eq!(set.lower_bound(&20), set.find(&20));
    assert_eq!(set.upper_bound(&20), set.find(&30));
    assert_eq!(set.lower_bound(&25), set.find(&30));
    assert_eq!(set.upper_bound(&25), set.find(&30));
    assert_eq!(set.lower_bound(&5), set.find(&10));
    assert_eq!(set.lower_bound(&30), set.find(&30));
    assert!(set.upper_bound(&30).is_none());
    assert!(set.lower_bound(&31).is_none());
    assert!(set.find(&25).is_none());
}

fn check_traversal<S: OrderedSet<i32>>(mut set: S) {
    for k in [5, 1, 9, 3, 7] {
        set.insert(k);
    }
    assert_eq!(collect_forward(&set), vec![1, 3, 5, 7, 9]);
    assert_eq!(collect_backward(&set), vec![9, 7, 5, 3, 1]);

    let c = set.find(&5).unwrap();
    let after = set.erase_at(c).unwrap();
    assert_eq!(*set.key(&after), 7);
    assert!(!set.contains(&5));
    assert_eq!(set.len(), 4);

    // Erasing the maximum yields the end position.
    let c = set.find(&9).unwrap();
    assert!(set.erase_at(c).is_none());
    assert_eq!(collect_forward(&set), vec![1, 3, 7]);
}

fn check_clear_and_reuse<S: OrderedSet<i32>>(mut set: S) {
    for k in 0..32 {
        set.insert(k);
    }
    set.clear();
    assert!(set.is_empty());
    assert!(set.first().is_none());

    for k in [2, 4, 6] {
        set.insert(k);
    }
    assert_eq!(collect_forward(&set), vec![2, 4, 6]);
}

#[test]
fn set_semantics_all_variants() {
    check_set_semantics(BstSet::new());
    check_set_semantics(AvlSet::new());
    check_set_semantics(RbSet::new());
    check_set_semantics(BTreeSet::new(4));
}

#[test]
fn bounds_all_variants() {
    check_bounds(BstSet::new());
    check_bounds(AvlSet::new());
    check_bounds(RbSet::new());
    check_bounds(BTreeSet::new(4));
    check_bounds(BTreeSet::new(3));
}

#[test]
fn traversal_all_variants() {
    check_traversal(BstSet::new());
    check_traversal(AvlSet::new());
    check_traversal(RbSet::new());
    check_traversal(BTreeSet::new(4));
    check_traversal(BTreeSet::new(3));
}

#[test]
fn clear_and_reuse_all_variants() {
    check_clear_and_reuse(BstSet::new());
    check_clear_and_reuse(AvlSet::new());
    check_clear_and_reuse(RbSet::new());
    check_clear_and_reuse(BTreeSet::new(4));
}

#[test]
fn custom_comparator_reverses_order() {
    let mut set = AvlSet::with_comparator(|a: &i32, b: &i32| match b.cmp(a) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    });
    for k in [1, 3, 2] {
        set.insert(k);
    }
    assert_eq!(collect_forward(&set), vec![3, 2, 1]);
    set.assert_valid().unwrap();
}
