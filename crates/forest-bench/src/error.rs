use std::io;

use thiserror::Error;

/// Errors surfaced by the benchmark harness.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A sink mutex was poisoned by a panicking benchmark task.
    #[error("result sink poisoned")]
    SinkPoisoned,
}
