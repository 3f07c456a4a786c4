//! Error types for blocksort
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SortError
pub type Result<T> = std::result::Result<T, SortError>;

/// Unified error type for blocksort operations
#[derive(Debug, Error)]
pub enum SortError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    /// Seek/read/write failure on the backing file. Propagated unmodified;
    /// the in-progress operation is aborted and nothing is retried.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    /// Rejected at session start: file length not a multiple of the record
    /// size, or a zero pool capacity.
    #[error("Configuration error: {0}")]
    Config(String),
}
