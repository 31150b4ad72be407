//! chained-hashmap: a separate-chaining hash map whose chains are small,
//! linearly scanned array maps.
//!
//! Internal Design:
//!
//! Summary
//! - Layers:
//!   - ArrayMap<K, V>: a vector of optional entry slots plus a count. No
//!     hashing; lookups scan the occupied prefix by `K: Eq`. Usable on its
//!     own and as the chain type of the table.
//!   - ChainedHashMap<K, V, S>: a fixed-length array of optional ArrayMap
//!     chains. Computes the slot from the key's hash, delegates storage to
//!     the chain in that slot, and owns the sizing policy.
//!
//! ArrayMap invariants
//! - Occupied slots are exactly `[0, len)`; everything at `len..` is empty.
//! - Keys are unique under `Eq`.
//! - Removal moves the last entry into the hole (O(1) compaction); it is
//!   not order-preserving.
//! - Capacity doubles when an insert finds the store full; it never shrinks.
//!
//! ChainedHashMap invariants
//! - `len` equals the sum of the chain lengths.
//! - `len / chain_count <= load_factor_threshold` once any insert returns.
//!   The check runs before the insert using `len + 1`, so the insert that
//!   would cross the threshold resizes first.
//! - The chain count is the configured initial count or a prime produced
//!   by a resize (smallest prime `>= 2 * chain_count`).
//! - Chains are created on the first insert into their slot and are never
//!   shared outside the table. A resize builds a new chain array, moves
//!   every entry into it, then replaces the old one as a unit.
//! - `clear` drops all chains but keeps the current chain count.
//!
//! Hashing
//! - The key's own `Hash` impl is fed to a `BuildHasher` (default:
//!   `hashbrown`'s `DefaultHashBuilder`). The 64-bit result is read as a
//!   signed code and floor-modded by the chain count.
//! - The default hasher's seed is not guaranteed stable, so iteration order
//!   can differ between instances; pass a fixed `BuildHasher` to
//!   `with_config_and_hasher` for a reproducible order.
//!
//! Errors and absence
//! - Constructors with explicit parameters return `InvalidArgument` for a
//!   zero capacity/count or a non-positive threshold.
//! - Missing keys are `None`, never an error. Iterators return `None` once
//!   exhausted and keep doing so.
//!
//! Hazards
//! - No internal synchronization. Sharing a map across threads needs an
//!   external lock; the borrow rules already forbid unsynchronized shared
//!   mutation.
//! - Iteration order is unspecified across mutations: removals reorder a
//!   chain and resizes redistribute every entry. Iterators borrow the map,
//!   so the map cannot change while one is alive.
//!
//! Diagnostics
//! - Debug builds check the structural invariants at the end of each
//!   mutating operation; release builds compile the checks away.

pub mod array_map;
pub mod chained_hash_map;
mod chained_hash_map_proptest;
mod config;
mod error;
mod primes;

// Public surface
pub use array_map::ArrayMap;
pub use chained_hash_map::ChainedHashMap;
pub use config::TableConfig;
pub use error::InvalidArgument;
