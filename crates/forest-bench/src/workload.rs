//! The measured workload: deterministic shuffled keys and four phases
//! (insert, hit lookups, miss lookups, erase) shared by every variant.

use std::hint::black_box;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tree_forest::OrderedSet;

use crate::error::BenchError;
use crate::sink::ResultSink;
use crate::timing::measure_seconds;

/// Fixed seed so every variant sees the same key order.
pub const WORKLOAD_SEED: u64 = 42;

/// Element counts each phase is measured at.
pub const DEFAULT_SIZES: [usize; 4] = [1_000, 5_000, 10_000, 50_000];

/// `0..n` shuffled with the fixed seed.
pub fn shuffled_keys(n: usize) -> Vec<i64> {
    let mut keys: Vec<i64> = (0..n as i64).collect();
    let mut rng = StdRng::seed_from_u64(WORKLOAD_SEED);
    keys.shuffle(&mut rng);
    keys
}

/// Keys guaranteed absent from the `0..n` working set.
pub fn missing_keys(n: usize) -> Vec<i64> {
    (n as i64..2 * n as i64).collect()
}

/// Runs the four phases against a fresh container from `make`, appending
/// one `<variant>.<phase>.N=<n>` row per phase and size.
pub fn run_set_benchmark<S, F>(
    variant: &str,
    make: F,
    sizes: &[usize],
    sink: &dyn ResultSink,
) -> Result<(), BenchError>
where
    S: OrderedSet<i64>,
    F: Fn() -> S,
{
    for &n in sizes {
        let keys = shuffled_keys(n);
        let misses = missing_keys(n);
        let mut set = make();

        let ((), seconds) = measure_seconds(|| {
            for &k in &keys {
                set.insert(k);
            }
        });
        sink.append(&format!("{variant}.insert.N={n}"), n as u64, seconds)?;
        debug_assert_eq!(set.len(), n);

        let (hits, seconds) = measure_seconds(|| {
            let mut hits = 0u64;
            for &k in &keys {
                if black_box(set.contains(&k)) {
                    hits += 1;
                }
            }
            hits
        });
        debug_assert_eq!(hits as usize, n);
        sink.append(&format!("{variant}.search_hit.N={n}"), n as u64, seconds)?;

        let (hits, seconds) = measure_seconds(|| {
            let mut hits = 0u64;
            for &k in &misses {
                if black_box(set.contains(&k)) {
                    hits += 1;
                }
            }
            hits
        });
        debug_assert_eq!(hits, 0);
        sink.append(&format!("{variant}.search_miss.N={n}"), n as u64, seconds)?;

        let ((), seconds) = measure_seconds(|| {
            for &k in &keys {
                set.erase(&k);
            }
        });
        sink.append(&format!("{variant}.erase.N={n}"), n as u64, seconds)?;

        if !set.is_empty() {
            tracing::warn!(variant, n, "container not empty after the erase phase");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tree_forest::{AvlSet, BTreeSet};

    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn shuffled_keys_are_a_permutation() {
        let keys = shuffled_keys(100);
        assert_ne!(keys, (0..100).collect::<Vec<i64>>());
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<i64>>());
        // Deterministic across calls.
        assert_eq!(keys, shuffled_keys(100));
    }

    #[test]
    fn phases_emit_labeled_rows() {
        let sink = MemorySink::new();
        run_set_benchmark("AVLTree", AvlSet::<i64>::new, &[100], &sink).unwrap();

        let rows = sink.rows();
        let labels: Vec<&str> = rows.iter().map(|r| r.0.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "AVLTree.insert.N=100",
                "AVLTree.search_hit.N=100",
                "AVLTree.search_miss.N=100",
                "AVLTree.erase.N=100",
            ]
        );
        for (_, count, seconds) in rows {
            assert_eq!(count, 100);
            assert!(seconds >= 0.0);
        }
    }

    #[test]
    fn btree_workload_round_trips() {
        let sink = MemorySink::new();
        run_set_benchmark("BTreeSet", || BTreeSet::new(32), &[500], &sink).unwrap();
        assert_eq!(sink.rows().len(), 4);
    }
}
