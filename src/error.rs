//! Error taxonomy. Only construction can fail; lookups report absence
//! through `Option`, and exhausted iterators return `None`.

use thiserror::Error;

/// A constructor parameter was rejected. The instance is never created.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    #[error("the initial capacity of an ArrayMap must be > 0")]
    ZeroCapacity,
    #[error("the initial chain count must be > 0")]
    ZeroChainCount,
    #[error("the per-chain initial capacity must be > 0")]
    ZeroChainCapacity,
    #[error("the load factor threshold must be > 0, got {0}")]
    LoadFactor(f64),
}
