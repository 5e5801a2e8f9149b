//! Benchmark harness for the `tree-forest` ordered-set variants.
//!
//! Four tasks, one per variant, run in parallel. Each measures insert,
//! hit-lookup, miss-lookup and erase phases over the same deterministic
//! shuffled keys, appending `<variant>.<phase>.N=<n>` rows to a shared
//! CSV sink.

pub mod dispatch;
pub mod error;
pub mod sink;
pub mod timing;
pub mod workload;

use std::thread;

use tree_forest::{AvlSet, BTreeSet, BstSet, RbSet};

use crate::dispatch::{run_parallel, BenchTask};
use crate::error::BenchError;
use crate::sink::{CsvSink, ResultSink};
use crate::workload::{run_set_benchmark, DEFAULT_SIZES};

/// B-tree fan-out used by the benchmark.
pub const BENCH_BTREE_ORDER: usize = 32;

/// Benchmarks every variant against `sink` at the given sizes. Returns
/// the number of failed tasks.
pub fn run_all(sink: &dyn ResultSink, sizes: &[usize]) -> usize {
    let tasks: Vec<(String, BenchTask<'_>)> = vec![
        (
            "BinaryTree".to_string(),
            Box::new(move || run_set_benchmark("BinaryTree", BstSet::<i64>::new, sizes, sink)),
        ),
        (
            "AVLTree".to_string(),
            Box::new(move || run_set_benchmark("AVLTree", AvlSet::<i64>::new, sizes, sink)),
        ),
        (
            "RedBlackTree".to_string(),
            Box::new(move || run_set_benchmark("RedBlackTree", RbSet::<i64>::new, sizes, sink)),
        ),
        (
            "BTreeSet".to_string(),
            Box::new(move || {
                run_set_benchmark("BTreeSet", || BTreeSet::new(BENCH_BTREE_ORDER), sizes, sink)
            }),
        ),
    ];
    let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    run_parallel(tasks, workers)
}

/// Full run with the default sizes into a timestamped CSV under `logs/`.
/// Returns the number of failed tasks.
pub fn run() -> Result<usize, BenchError> {
    let sink = CsvSink::open_default()?;
    tracing::info!(path = %sink.path().display(), "writing benchmark results");
    let failures = run_all(&sink, &DEFAULT_SIZES);
    sink.flush()?;
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn all_variants_report_all_phases() {
        let sink = MemorySink::new();
        assert_eq!(run_all(&sink, &[200]), 0);

        let rows = sink.rows();
        assert_eq!(rows.len(), 16);
        for variant in ["BinaryTree", "AVLTree", "RedBlackTree", "BTreeSet"] {
            for phase in ["insert", "search_hit", "search_miss", "erase"] {
                let label = format!("{variant}.{phase}.N=200");
                assert!(
                    rows.iter().any(|r| r.0 == label),
                    "missing row {label}"
                );
            }
        }
    }
}
