//! Configuration for blocksort
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, SortError};

/// Default number of blocks held by the buffer pool
pub const DEFAULT_POOL_CAPACITY: usize = 4;

/// Configuration for a sort session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Buffer Pool Configuration
    // -------------------------------------------------------------------------
    /// Max number of blocks resident in the buffer pool at once.
    /// Must be at least 1; larger pools trade memory for fewer disk reads.
    pub pool_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config for values that cannot start a session
    pub fn validate(&self) -> Result<()> {
        if self.pool_capacity == 0 {
            return Err(SortError::Config(
                "pool capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the buffer pool capacity (in blocks)
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.config.pool_capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
