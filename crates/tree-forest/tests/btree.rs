use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tree_forest::{BTreeSet, OrderedSet};

#[test]
fn fanout_three_splits_the_root_twice() {
    let mut set = BTreeSet::new(3);
    let mut heights = Vec::new();
    for k in 1..=7 {
        set.insert(k);
        set.assert_valid().unwrap();
        heights.push(set.height());
    }
    // Each root split grows the tree by one level.
    assert_eq!(heights, vec![0, 0, 1, 1, 1, 2, 2]);
    assert_eq!(set.height(), 2);
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn fanout_three_descending_insertions() {
    // Descending input leaves keyless right siblings behind at fan-out 3;
    // navigation has to step over them.
    let mut set = BTreeSet::new(3);
    for k in (1..=16).rev() {
        set.insert(k);
        set.assert_valid().unwrap();
    }
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, (1..=16).collect::<Vec<i32>>());
    let back: Vec<i32> = set.iter().rev().copied().collect();
    assert_eq!(back, (1..=16).rev().collect::<Vec<i32>>());
}

#[test]
fn wide_fanout_keeps_the_tree_flat() {
    let mut set = BTreeSet::new(32);
    for k in 0..10_000 {
        set.insert(k);
    }
    set.assert_valid().unwrap();
    assert_eq!(set.len(), 10_000);
    // 10k keys with at least 15 keys per node fit in 4 levels.
    assert!(set.height() <= 3, "height {} too large", set.height());
}

#[test]
fn erase_borrows_and_merges() {
    let mut set = BTreeSet::new(4);
    for k in 0..64 {
        set.insert(k);
    }
    set.assert_valid().unwrap();

    // Ascending erase forces repeated borrow-from-next and merges.
    for k in 0..32 {
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    // Descending erase forces the mirrored paths.
    for k in (32..64).rev() {
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    assert!(set.is_empty());
}

#[test]
fn erase_from_internal_nodes() {
    let mut set = BTreeSet::new(4);
    for k in 0..100 {
        set.insert(k);
    }
    // Erase in an order that keeps hitting separator keys: midpoints first.
    let mut order: Vec<i32> = (0..100).collect();
    let mut rng = StdRng::seed_from_u64(3);
    order.shuffle(&mut rng);
    for k in order {
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    assert!(set.is_empty());
    assert_eq!(set.height(), 0);
}

#[test]
fn root_collapse_shrinks_height() {
    let mut set = BTreeSet::new(4);
    for k in 0..8 {
        set.insert(k);
    }
    assert_eq!(set.height(), 1);
    for k in 0..6 {
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    // The last merge drains the root and its sole child takes over.
    assert_eq!(set.height(), 0);
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![6, 7]);
}

#[test]
fn keyless_root_chain_collapses_to_empty() {
    // At fan-out 3 a preemptive root split leaves a keyless sibling; the
    // final merge can strand that chain above an empty leaf, and the
    // collapse has to walk all the way down to it.
    let mut set = BTreeSet::new(3);
    set.insert(0);
    set.insert(-1);
    // Duplicate probe against a full root still splits it first.
    assert!(!set.insert(0).1);
    assert_eq!(set.erase(&0), 1);
    set.assert_valid().unwrap();

    let c = set.first().unwrap();
    assert_eq!(*set.key(&c), -1);
    assert!(set.erase_at(c).is_none());
    set.assert_valid().unwrap();
    assert!(set.is_empty());
    assert_eq!(set.height(), 0);

    assert!(set.insert(0).1);
    set.assert_valid().unwrap();
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![0]);
}

#[test]
fn erase_at_returns_the_successor() {
    let mut set = BTreeSet::new(4);
    for k in [10, 20, 30, 40, 50] {
        set.insert(k);
    }
    let c = set.find(&30).unwrap();
    let after = set.erase_at(c).unwrap();
    assert_eq!(*set.key(&after), 40);
    set.assert_valid().unwrap();

    let c = set.find(&50).unwrap();
    assert!(set.erase_at(c).is_none());
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![10, 20, 40]);
}

#[test]
fn duplicate_inserts_are_rejected_at_any_depth() {
    let mut set = BTreeSet::new(3);
    for k in 0..30 {
        assert!(set.insert(k).1);
    }
    for k in 0..30 {
        let (c, created) = set.insert(k);
        assert!(!created);
        assert_eq!(*set.key(&c), k);
    }
    assert_eq!(set.len(), 30);
}

#[test]
#[should_panic(expected = "fan-out")]
fn fanout_below_three_is_rejected() {
    let _ = BTreeSet::<i32>::new(2);
}
