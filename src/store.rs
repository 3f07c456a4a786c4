//! Record store contract
//!
//! The interface the sort algorithm is written against. It hides whether a
//! record access is served from memory or from disk, so the algorithm can
//! run unchanged over the buffer pool or over an in-memory mock.

use crate::error::Result;
use crate::record::Record;

/// Index-based access to a flat sequence of records
///
/// Indices are 0-based at record granularity; `index * RECORD_BYTES` is the
/// byte offset. Implementations may cache freely as long as reads always
/// observe the most recent swaps.
pub trait RecordStore {
    /// Return a copy of the record logically at `index`.
    fn read(&mut self, index: u64) -> Result<Record>;

    /// Exchange the key/value content stored at `r1`'s and `r2`'s offsets.
    ///
    /// On success both records' `offset` fields are updated in place to the
    /// position each has moved to, so the caller can keep using them for
    /// subsequent operations.
    fn swap(&mut self, r1: &mut Record, r2: &mut Record) -> Result<()>;

    /// Total byte length of the backing store. Fixed for the lifetime of a
    /// sort session.
    fn length(&self) -> u64;

    /// Persist all outstanding in-memory mutations.
    ///
    /// Must be invoked exactly once, after all reads and swaps for the
    /// session are complete; no further operations are valid afterwards.
    fn flush(&mut self) -> Result<()>;
}
