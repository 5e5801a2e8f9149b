use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tree_forest::{OrderedSet, RbSet};

#[test]
fn ascending_insertions_stay_valid() {
    let mut set = RbSet::new();
    for k in 0..256 {
        set.insert(k);
        set.assert_valid().unwrap();
    }
    assert_eq!(set.len(), 256);
    // Red-black height is bounded by 2 * log2(n + 1).
    assert!(set.height() <= 16, "height {} too large", set.height());
}

#[test]
fn zigzag_insertions_stay_valid() {
    // The third key lands between the first two, forcing the double
    // rotation on insert; exercised in both directions.
    let mut set = RbSet::new();
    for k in [0, 88, 1] {
        set.insert(k);
        set.assert_valid().unwrap();
    }
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![0, 1, 88]);

    let mut set = RbSet::new();
    for k in [88, 0, 44] {
        set.insert(k);
        set.assert_valid().unwrap();
    }
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![0, 44, 88]);
}

#[test]
fn erase_leaf_with_red_sibling_subtree() {
    // Deleting 5 leaves a black deficit whose sibling is red and whose
    // new sibling after the first rotation has a red child; the fixup has
    // to walk the full case chain.
    let mut set = RbSet::new();
    for k in [10, 5, 20, 15, 25, 13] {
        set.insert(k);
    }
    set.assert_valid().unwrap();

    assert_eq!(set.erase(&5), 1);
    set.assert_valid().unwrap();
    let keys: Vec<i32> = set.iter().copied().collect();
    assert_eq!(keys, vec![10, 13, 15, 20, 25]);
}

#[test]
fn erase_covers_recolor_and_rotation_cases() {
    // Small fixed shapes hitting each double-black resolution: red
    // sibling, black sibling with black nephews (red and black parent),
    // near-red nephew and far-red nephew.
    let shapes: &[(&[i32], i32)] = &[
        (&[10, 5, 20, 15, 25], 5),
        (&[10, 5, 20, 15], 5),
        (&[10, 5, 20, 25], 5),
        (&[10, 5, 20], 5),
        (&[10, 5, 20, 1, 7, 15, 25, 30], 1),
        (&[10, 5, 20, 15, 25, 13], 25),
    ];
    for &(keys, victim) in shapes {
        let mut set = RbSet::new();
        for &k in keys {
            set.insert(k);
        }
        set.assert_valid().unwrap();
        assert_eq!(set.erase(&victim), 1, "erasing {victim} from {keys:?}");
        if let Err(err) = set.assert_valid() {
            panic!("erasing {victim} from {keys:?}: {err}");
        }
    }
}

#[test]
fn ladder_insert_then_delete() {
    let mut set = RbSet::new();
    for k in 0..200 {
        set.insert(k);
    }
    for k in 0..200 {
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    assert!(set.is_empty());
}

#[test]
fn ladder_delete_from_the_top() {
    let mut set = RbSet::new();
    for k in 0..200 {
        set.insert(k);
    }
    for k in (0..200).rev() {
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    assert!(set.is_empty());
}

#[test]
fn shuffled_churn_stays_valid() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut keys: Vec<i32> = (0..500).collect();
    keys.shuffle(&mut rng);

    let mut set = RbSet::new();
    for &k in &keys {
        set.insert(k);
        set.assert_valid().unwrap();
    }
    keys.shuffle(&mut rng);
    for &k in &keys[..250] {
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    assert_eq!(set.len(), 250);

    let survivors: Vec<i32> = set.iter().copied().collect();
    let mut expect: Vec<i32> = keys[250..].to_vec();
    expect.sort_unstable();
    assert_eq!(survivors, expect);
}

#[test]
fn erase_root_repeatedly() {
    let mut set = RbSet::new();
    for k in 0..64 {
        set.insert(k);
    }
    while let Some(c) = set.first() {
        let k = *set.key(&c);
        assert_eq!(set.erase(&k), 1);
        set.assert_valid().unwrap();
    }
    assert!(set.is_empty());
}
