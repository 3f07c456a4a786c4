//! Buffer Pool Module
//!
//! Block-level LRU cache between the sort algorithm and the backing file.
//!
//! ## Responsibilities
//! - Translate logical record indices into block-relative accesses
//! - Serve hits from memory, pull misses from the file
//! - Track dirty blocks and write them back on eviction/flush
//! - Expose hit/miss/write counters to the reporting layer
//!
//! ## Block Format
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Block (4096 bytes = 1024 records)            │
//! │ ┌─────────┬───────────┬─────────┬──────────┐ │
//! │ │ Key (2) │ Value (2) │ Key (2) │  ...     │ │
//! │ └─────────┴───────────┴─────────┴──────────┘ │
//! │   big-endian i16, densely packed by slot     │
//! └──────────────────────────────────────────────┘
//! ```

mod block;
mod buffer;

pub use block::{Block, BLOCK_BYTES, BLOCK_RECORDS};
pub use buffer::{BufferPool, CacheStats};
