use tree_forest::{BstSet, OrderedSet};

#[test]
fn monotonic_insertion_degenerates_to_a_chain() {
    let mut set = BstSet::new();
    for k in 0..64 {
        set.insert(k);
    }
    set.assert_valid().unwrap();
    // No rebalancing: ascending input is a right spine.
    assert_eq!(set.height(), 63);
    assert_eq!(set.len(), 64);
}

#[test]
fn removal_keeps_order() {
    let mut set = BstSet::new();
    for k in [50, 30, 70, 20, 40, 60, 80] {
        set.insert(k);
    }

    // Root with two children.
    assert_eq!(set.erase(&50), 1);
    set.assert_valid().unwrap();
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![20, 30, 40, 60, 70, 80]);

    // One-child and leaf removals.
    assert_eq!(set.erase(&30), 1);
    assert_eq!(set.erase(&80), 1);
    set.assert_valid().unwrap();
    assert_eq!(set.len(), 4);
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![20, 40, 60, 70]);
}

#[test]
fn interleaved_insert_and_erase() {
    let mut set = BstSet::new();
    for k in 0..50 {
        set.insert(k * 2);
    }
    for k in 0..50 {
        assert_eq!(set.erase(&(k * 2)), 1);
        set.insert(k * 2 + 1);
        set.assert_valid().unwrap();
    }
    let keys: Vec<i32> = set.iter().copied().collect();
    let expect: Vec<i32> = (0..50).map(|k| k * 2 + 1).collect();
    assert_eq!(keys, expect);
}

#[test]
fn drain_through_cursors() {
    let mut set = BstSet::new();
    for k in [4, 2, 6, 1, 3, 5, 7] {
        set.insert(k);
    }
    let mut drained = Vec::new();
    let mut curr = set.first();
    while let Some(c) = curr {
        drained.push(*set.key(&c));
        curr = set.erase_at(c);
        set.assert_valid().unwrap();
    }
    assert_eq!(drained, vec![1, 2, 3, 4, 5, 6, 7]);
    assert!(set.is_empty());
}
