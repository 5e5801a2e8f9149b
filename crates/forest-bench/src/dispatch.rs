//! Runs benchmark tasks on a small pool of scoped worker threads.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use crate::error::BenchError;

pub type BenchTask<'a> = Box<dyn FnOnce() -> Result<(), BenchError> + Send + 'a>;

/// Runs every task to completion, at most `workers` at a time. A failing
/// or panicking task is logged and does not abort the others. Returns the
/// number of failed tasks.
pub fn run_parallel(tasks: Vec<(String, BenchTask<'_>)>, workers: usize) -> usize {
    let failures = AtomicUsize::new(0);
    let next = AtomicUsize::new(0);
    let slots: Vec<_> = tasks.into_iter().map(|t| Mutex::new(Some(t))).collect();
    let workers = workers.clamp(1, slots.len().max(1));

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let idx = next.fetch_add(1, Ordering::Relaxed);
                let Some(slot) = slots.get(idx) else {
                    break;
                };
                let Some((name, task)) = slot.lock().ok().and_then(|mut s| s.take()) else {
                    continue;
                };
                tracing::info!(task = %name, "benchmark task started");
                match catch_unwind(AssertUnwindSafe(task)) {
                    Ok(Ok(())) => tracing::info!(task = %name, "benchmark task finished"),
                    Ok(Err(err)) => {
                        failures.fetch_add(1, Ordering::Relaxed);
                        tracing::error!(task = %name, error = %err, "benchmark task failed");
                    }
                    Err(_) => {
                        failures.fetch_add(1, Ordering::Relaxed);
                        tracing::error!(task = %name, "benchmark task panicked");
                    }
                }
            });
        }
    });

    failures.into_inner()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn runs_every_task_once() {
        let counter = AtomicUsize::new(0);
        let tasks: Vec<(String, BenchTask<'_>)> = (0..8)
            .map(|i| {
                let counter = &counter;
                let task: BenchTask<'_> = Box::new(move || {
                    counter.fetch_add(1, Ordering::Relaxed);
                    Ok(())
                });
                (format!("task-{i}"), task)
            })
            .collect();
        assert_eq!(run_parallel(tasks, 3), 0);
        assert_eq!(counter.load(Ordering::Relaxed), 8);
    }

    #[test]
    fn failures_and_panics_are_counted() {
        let tasks: Vec<(String, BenchTask<'_>)> = vec![
            ("ok".to_string(), Box::new(|| Ok(()))),
            (
                "fails".to_string(),
                Box::new(|| Err(BenchError::SinkPoisoned)),
            ),
            ("panics".to_string(), Box::new(|| panic!("boom"))),
        ];
        assert_eq!(run_parallel(tasks, 2), 2);
    }

    #[test]
    fn empty_task_list_is_a_no_op() {
        assert_eq!(run_parallel(Vec::new(), 4), 0);
    }
}
