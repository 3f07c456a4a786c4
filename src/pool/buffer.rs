//! Buffer Pool
//!
//! The sole `RecordStore` implementor: a bounded, recency-ordered pool of
//! cached blocks over a backing file.
//!
//! ## Recency model
//! - Most-recently-used block at index 0, least-recently-used at the back
//! - Lookup is a linear scan + move-to-front; fine at pool-capacity scale
//! - Eviction pops from the back, writing the victim first iff dirty
//!
//! ## Concurrency
//! Single-threaded by design. The pool is mutated by exactly one logical
//! caller at a time, so there is no locking anywhere.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use bytes::Buf;

use crate::error::{Result, SortError};
use crate::record::{Record, RECORD_BYTES};
use crate::store::RecordStore;

use super::block::{Block, BLOCK_BYTES, BLOCK_RECORDS};

/// Read-only counter snapshot for the reporting layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Accesses served from a resident block
    pub hits: u64,
    /// Accesses whose owning block was not resident
    pub misses: u64,
    /// Whole-block write-backs (eviction + flush)
    pub writes: u64,
}

/// LRU cache of disk blocks backing one sort session
///
/// The backing file handle is borrowed, not owned: the caller acquires it
/// before the session and releases it after `flush()`, on every exit path.
pub struct BufferPool<'a> {
    /// Backing file; all reads and write-backs go through this handle
    file: &'a mut File,

    /// Max resident blocks. May be exceeded transiently inside `swap` until
    /// the trailing capacity check runs.
    capacity: usize,

    /// Byte length of the backing file, fixed for the session
    len: u64,

    /// Resident blocks, most-recently-used first
    pool: Vec<Block>,

    // -------------------------------------------------------------------------
    // Counters (instance-scoped, monotonic)
    // -------------------------------------------------------------------------
    hits: u64,
    misses: u64,
    writes: u64,
}

impl<'a> BufferPool<'a> {
    /// Create a pool over `file` holding at most `capacity` blocks
    ///
    /// Fails with a `Config` error if `capacity` is zero or the file length
    /// is not a whole number of records.
    pub fn new(file: &'a mut File, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SortError::Config(
                "pool capacity must be at least 1".to_string(),
            ));
        }

        let len = file.metadata()?.len();
        if len % RECORD_BYTES != 0 {
            return Err(SortError::Config(format!(
                "file length {} is not a multiple of the record size {}",
                len, RECORD_BYTES
            )));
        }

        Ok(Self {
            file,
            capacity,
            len,
            pool: Vec::with_capacity(capacity),
            hits: 0,
            misses: 0,
            writes: 0,
        })
    }

    /// Accesses served from a resident block
    pub fn cache_hits(&self) -> u64 {
        self.hits
    }

    /// Accesses whose owning block was not resident
    pub fn cache_misses(&self) -> u64 {
        self.misses
    }

    /// Whole-block write-backs performed so far
    pub fn disk_writes(&self) -> u64 {
        self.writes
    }

    /// Snapshot of all counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            writes: self.writes,
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Locate a resident block, counting the probe as a hit or a miss
    fn probe(&mut self, block_num: u64) -> Option<usize> {
        let pos = self.pool.iter().position(|b| b.block_num() == block_num);
        match pos {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        pos
    }

    /// Bring the owning block to the front of the pool, loading it on a miss
    ///
    /// Invariant relied on by `place`: on return the block for `block_num`
    /// sits at index 0, whether it was promoted or freshly loaded.
    fn resolve_front(&mut self, block_num: u64) -> Result<()> {
        if let Some(pos) = self.probe(block_num) {
            let block = self.pool.remove(pos);
            self.pool.insert(0, block);
        } else {
            self.load_block(block_num)?;
        }
        Ok(())
    }

    /// One side of a swap: store `incoming`'s key/value at `dest_offset` and
    /// relocate `incoming` there
    fn place(&mut self, dest_offset: u64, incoming: &mut Record) -> Result<()> {
        let index = dest_offset / RECORD_BYTES;
        let slot = (index % BLOCK_RECORDS) as usize;

        self.resolve_front(index / BLOCK_RECORDS)?;
        self.pool[0].put(
            slot,
            Record::new(dest_offset, incoming.key(), incoming.value()),
        );
        incoming.set_offset(dest_offset);
        Ok(())
    }

    /// Point-read the 4 bytes at `index` without touching the pool
    fn read_direct(&mut self, index: u64) -> Result<Record> {
        let offset = index * RECORD_BYTES;
        self.file.seek(SeekFrom::Start(offset))?;

        let mut buf = [0u8; RECORD_BYTES as usize];
        self.file.read_exact(&mut buf)?;

        let mut bytes = &buf[..];
        let key = bytes.get_i16();
        let value = bytes.get_i16();
        Ok(Record::new(offset, key, value))
    }

    /// Load a whole block from the file and insert it at the front
    ///
    /// A tail block past EOF is zero-padded in memory; only the bytes the
    /// file actually contains are read.
    fn load_block(&mut self, block_num: u64) -> Result<()> {
        let start = block_num * BLOCK_BYTES;
        let take = (self.len - start).min(BLOCK_BYTES) as usize;

        let mut buf = vec![0u8; BLOCK_BYTES as usize];
        self.file.seek(SeekFrom::Start(start))?;
        self.file.read_exact(&mut buf[..take])?;

        self.pool.insert(0, Block::decode(block_num, &buf));
        Ok(())
    }

    /// Serialize a block and write it at its home offset
    ///
    /// For a tail block, only the bytes inside the file's length are written
    /// so the file never grows.
    fn write_block(&mut self, block: &Block) -> Result<()> {
        self.writes += 1;

        let start = block.block_num() * BLOCK_BYTES;
        let take = (self.len - start).min(BLOCK_BYTES) as usize;

        let buf = block.encode();
        self.file.seek(SeekFrom::Start(start))?;
        self.file.write_all(&buf[..take])?;
        Ok(())
    }

    /// Evict from the least-recently-used end until back within capacity
    fn shrink_to_capacity(&mut self) -> Result<()> {
        while self.pool.len() > self.capacity {
            if let Some(block) = self.pool.pop() {
                if block.is_dirty() {
                    self.write_block(&block)?;
                }
                tracing::trace!(block = block.block_num(), "evicted block");
            }
        }
        Ok(())
    }
}

impl RecordStore for BufferPool<'_> {
    fn read(&mut self, index: u64) -> Result<Record> {
        let block_num = index / BLOCK_RECORDS;
        let slot = (index % BLOCK_RECORDS) as usize;

        if let Some(pos) = self.probe(block_num) {
            let block = self.pool.remove(pos);
            let record = block.record(slot);
            self.pool.insert(0, block);
            return Ok(record);
        }

        // Miss: answer immediately from a point read, then pull the whole
        // block in so subsequent accesses to it hit.
        let record = self.read_direct(index)?;
        self.load_block(block_num)?;
        self.shrink_to_capacity()?;
        Ok(record)
    }

    fn swap(&mut self, r1: &mut Record, r2: &mut Record) -> Result<()> {
        // Capture both destinations before either side mutates an offset.
        let dest1 = r1.offset();
        let dest2 = r2.offset();

        self.place(dest1, r2)?;
        self.place(dest2, r1)?;

        // Capacity is enforced only after both sides are resident, so a
        // cross-block swap works even at capacity 1.
        self.shrink_to_capacity()
    }

    fn length(&self) -> u64 {
        self.len
    }

    fn flush(&mut self) -> Result<()> {
        tracing::debug!(
            resident = self.pool.len(),
            writes = self.writes,
            "flushing buffer pool"
        );
        while let Some(block) = self.pool.pop() {
            if block.is_dirty() {
                self.write_block(&block)?;
            }
        }
        Ok(())
    }
}
