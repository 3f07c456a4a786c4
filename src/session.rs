//! Sort session coordinator
//!
//! One-shot orchestration of a full sort: open the backing file, build the
//! pool, run the two heap-sort phases, and collect the report the CLI
//! prints. The file handle lives in this function's scope, so it is released
//! on every exit path, including I/O failure mid-sort.

use std::fs::OpenOptions;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::Result;
use crate::pool::{BufferPool, CacheStats};
use crate::record::RECORD_BYTES;
use crate::sort::HeapSort;
use crate::store::RecordStore;

/// Outcome of a completed sort session
#[derive(Debug, Clone, Copy)]
pub struct SortReport {
    /// Logical records in the file
    pub record_count: u64,

    /// Final cache counters
    pub stats: CacheStats,

    /// Wall-clock time spent in `build_max_heap()` + `sort()`
    pub elapsed: Duration,
}

/// Sort the record file at `path` in place
///
/// Runs both phases back to back and flushes through the pool before
/// returning. On error the file may be left partially sorted and partially
/// flushed; there is no rollback.
pub fn sort_file(path: &Path, config: &Config) -> Result<SortReport> {
    config.validate()?;

    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let mut pool = BufferPool::new(&mut file, config.pool_capacity)?;
    let record_count = pool.length() / RECORD_BYTES;

    tracing::debug!(
        path = %path.display(),
        records = record_count,
        capacity = config.pool_capacity,
        "starting sort session"
    );

    // Timing covers exactly the two sort phases, per the reporting contract.
    let start = Instant::now();
    let mut sorter = HeapSort::new(&mut pool);
    sorter.build_max_heap()?;
    sorter.sort()?;
    let elapsed = start.elapsed();

    let stats = pool.stats();
    tracing::debug!(?stats, ?elapsed, "sort session complete");

    Ok(SortReport {
        record_count,
        stats,
        elapsed,
    })
}
