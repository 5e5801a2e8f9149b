//! Benchmark result sinks.
//!
//! Results land in a CSV file, one `label,count,seconds` row per measured
//! phase. The file sink is shared across worker threads, so rows append
//! under a mutex; flushing is explicit at the end of a run.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::BenchError;

pub const CSV_HEADER: &str = "test_func_name,count,time_usage";

/// Destination for measured phases. Implementations must tolerate appends
/// from multiple threads.
pub trait ResultSink: Sync {
    fn append(&self, label: &str, count: u64, seconds: f64) -> Result<(), BenchError>;
}

/// CSV file sink; writes the header on creation.
pub struct CsvSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl CsvSink {
    /// Creates `logs/bench_<unix-seconds>.csv` in the working directory.
    pub fn open_default() -> Result<Self, BenchError> {
        Self::open_under("logs")
    }

    /// Creates a timestamped CSV under `dir`, creating `dir` if missing.
    pub fn open_under(dir: impl AsRef<Path>) -> Result<Self, BenchError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::open_at(dir.join(format!("bench_{stamp}.csv")))
    }

    /// Creates (truncating) the CSV at `path`.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, BenchError> {
        let path = path.into();
        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "{CSV_HEADER}")?;
        Ok(Self {
            path,
            writer: Mutex::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&self) -> Result<(), BenchError> {
        let mut writer = self.writer.lock().map_err(|_| BenchError::SinkPoisoned)?;
        writer.flush()?;
        Ok(())
    }
}

impl ResultSink for CsvSink {
    fn append(&self, label: &str, count: u64, seconds: f64) -> Result<(), BenchError> {
        let mut writer = self.writer.lock().map_err(|_| BenchError::SinkPoisoned)?;
        writeln!(writer, "{label},{count},{seconds:.9}")?;
        Ok(())
    }
}

/// In-memory sink for tests.
#[derive(Default)]
pub struct MemorySink {
    rows: Mutex<Vec<(String, u64, f64)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<(String, u64, f64)> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

impl ResultSink for MemorySink {
    fn append(&self, label: &str, count: u64, seconds: f64) -> Result<(), BenchError> {
        let mut rows = self.rows.lock().map_err(|_| BenchError::SinkPoisoned)?;
        rows.push((label.to_string(), count, seconds));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_sink_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let sink = CsvSink::open_at(&path).unwrap();
        sink.append("AVLTree.insert.N=1000", 1000, 0.00125).unwrap();
        sink.append("AVLTree.erase.N=1000", 1000, 0.5).unwrap();
        sink.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "AVLTree.insert.N=1000,1000,0.001250000");
        assert_eq!(lines[2], "AVLTree.erase.N=1000,1000,0.500000000");
    }

    #[test]
    fn open_under_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::open_under(dir.path().join("logs")).unwrap();
        sink.flush().unwrap();
        assert!(sink.path().exists());
        let name = sink.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("bench_") && name.ends_with(".csv"), "{name}");
    }

    #[test]
    fn memory_sink_collects_rows() {
        let sink = MemorySink::new();
        sink.append("x", 1, 2.0).unwrap();
        let rows = sink.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "x");
    }
}
