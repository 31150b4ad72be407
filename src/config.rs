//! Construction-time parameters for `ChainedHashMap`.

use crate::error::InvalidArgument;

/// Sizing policy for a `ChainedHashMap`.
///
/// All three parameters must be strictly positive; `validate` rejects the
/// first one that is not. A NaN threshold is rejected as well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Resize when `(len + 1) / chain_count` would exceed this.
    pub load_factor_threshold: f64,
    /// Chain-array length before the first resize.
    pub initial_chain_count: usize,
    /// Initial capacity of every chain materialized by the table.
    pub chain_capacity: usize,
}

impl TableConfig {
    pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.75;
    pub const DEFAULT_INITIAL_CHAIN_COUNT: usize = 100;
    pub const DEFAULT_CHAIN_CAPACITY: usize = 16;

    pub const fn new(
        load_factor_threshold: f64,
        initial_chain_count: usize,
        chain_capacity: usize,
    ) -> Self {
        Self {
            load_factor_threshold,
            initial_chain_count,
            chain_capacity,
        }
    }

    pub fn with_load_factor_threshold(mut self, threshold: f64) -> Self {
        self.load_factor_threshold = threshold;
        self
    }

    pub fn with_initial_chain_count(mut self, count: usize) -> Self {
        self.initial_chain_count = count;
        self
    }

    pub fn with_chain_capacity(mut self, capacity: usize) -> Self {
        self.chain_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidArgument> {
        // Negated comparison so NaN fails too.
        if !(self.load_factor_threshold > 0.0) {
            return Err(InvalidArgument::LoadFactor(self.load_factor_threshold));
        }
        if self.initial_chain_count == 0 {
            return Err(InvalidArgument::ZeroChainCount);
        }
        if self.chain_capacity == 0 {
            return Err(InvalidArgument::ZeroChainCapacity);
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_LOAD_FACTOR_THRESHOLD,
            Self::DEFAULT_INITIAL_CHAIN_COUNT,
            Self::DEFAULT_CHAIN_CAPACITY,
        )
    }
}
