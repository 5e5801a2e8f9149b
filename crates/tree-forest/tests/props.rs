//! Randomized op sequences checked against the standard library's ordered
//! set, with the structural validator run after every mutation.

use std::collections::BTreeSet as StdSet;

use proptest::prelude::*;
use tree_forest::{AvlSet, BTreeSet, BstSet, OrderedSet, RbSet};

#[derive(Clone, Debug)]
enum Op {
    Insert(i8),
    Erase(i8),
    PopFirst,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i8>().prop_map(Op::Insert),
        2 => any::<i8>().prop_map(Op::Erase),
        1 => Just(Op::PopFirst),
    ]
}

fn run_ops<S, V>(ops: &[Op], mut set: S, validate: V)
where
    S: OrderedSet<i8>,
    V: Fn(&S) -> Result<(), String>,
{
    let mut model = StdSet::new();
    for (step, op) in ops.iter().enumerate() {
        match *op {
            Op::Insert(k) => {
                let (cursor, created) = set.insert(k);
                assert_eq!(created, model.insert(k), "insert {k} at step {step}");
                assert_eq!(*set.key(&cursor), k);
            }
            Op::Erase(k) => {
                let removed = set.erase(&k);
                assert_eq!(removed == 1, model.remove(&k), "erase {k} at step {step}");
            }
            Op::PopFirst => match set.first() {
                Some(cursor) => {
                    let expected = model.pop_first().expect("model tracks occupancy");
                    assert_eq!(*set.key(&cursor), expected);
                    let after = set.erase_at(cursor);
                    match (after, model.first()) {
                        (Some(a), Some(&m)) => assert_eq!(*set.key(&a), m),
                        (None, None) => {}
                        (a, m) => panic!("successor mismatch at step {step}: {a:?} vs {m:?}"),
                    }
                }
                None => assert!(model.is_empty()),
            },
        }
        if let Err(err) = validate(&set) {
            panic!("invariant broken after step {step} ({op:?}): {err}");
        }
        assert_eq!(set.len(), model.len());
    }

    let mut keys = Vec::new();
    let mut curr = set.first();
    while let Some(c) = curr {
        keys.push(*set.key(&c));
        curr = set.next(&c);
    }
    let expect: Vec<i8> = model.iter().copied().collect();
    assert_eq!(keys, expect);
}

proptest! {
    #[test]
    fn bst_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        run_ops(&ops, BstSet::new(), |s| s.assert_valid());
    }

    #[test]
    fn avl_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        run_ops(&ops, AvlSet::new(), |s| s.assert_valid());
    }

    #[test]
    fn red_black_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        run_ops(&ops, RbSet::new(), |s| s.assert_valid());
    }

    #[test]
    fn btree_min_fanout_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        run_ops(&ops, BTreeSet::new(3), |s| s.assert_valid());
    }

    #[test]
    fn btree_even_fanout_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        run_ops(&ops, BTreeSet::new(8), |s| s.assert_valid());
    }
}
