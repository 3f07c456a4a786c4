//! Cached block
//!
//! In-memory image of one fixed-size run of records, plus the dirty flag
//! that decides whether eviction must write it back.

use bytes::{Buf, BufMut, BytesMut};

use crate::record::{Record, RECORD_BYTES};

/// Records per block
pub const BLOCK_RECORDS: u64 = 1024;

/// Bytes per block on disk
pub const BLOCK_BYTES: u64 = BLOCK_RECORDS * RECORD_BYTES;

/// One cached disk block
///
/// Holds exactly `BLOCK_RECORDS` records. Owned exclusively by the buffer
/// pool; records leave it only as copies.
pub struct Block {
    /// Block index relative to the start of the file
    block_num: u64,

    /// Slot-ordered records; slot `i` is anchored at byte offset
    /// `(block_num * BLOCK_RECORDS + i) * RECORD_BYTES`
    records: Vec<Record>,

    /// True once any slot has been mutated since load
    dirty: bool,
}

impl Block {
    /// Decode a block from its on-disk image
    ///
    /// `bytes` must hold `BLOCK_BYTES` bytes (a tail block past EOF is
    /// zero-padded by the caller before decoding).
    pub fn decode(block_num: u64, mut bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len() as u64, BLOCK_BYTES);

        let mut records = Vec::with_capacity(BLOCK_RECORDS as usize);
        for slot in 0..BLOCK_RECORDS {
            let key = bytes.get_i16();
            let value = bytes.get_i16();
            let offset = (block_num * BLOCK_RECORDS + slot) * RECORD_BYTES;
            records.push(Record::new(offset, key, value));
        }

        Self {
            block_num,
            records,
            dirty: false,
        }
    }

    /// Serialize all slots into a fresh `BLOCK_BYTES` buffer
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(BLOCK_BYTES as usize);
        for record in &self.records {
            buf.put_i16(record.key());
            buf.put_i16(record.value());
        }
        buf
    }

    /// Block index relative to the start of the file
    pub fn block_num(&self) -> u64 {
        self.block_num
    }

    /// Copy of the record at `slot`
    pub fn record(&self, slot: usize) -> Record {
        self.records[slot]
    }

    /// Replace the record at `slot`, marking the block dirty
    pub fn put(&mut self, slot: usize, record: Record) {
        self.records[slot] = record;
        self.dirty = true;
    }

    /// Whether the block holds mutations not yet written back
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
