//! ChainedHashMap: array of lazily created `ArrayMap` chains.
//!
//! Every operation maps the key's hash to a slot and delegates to the chain
//! in that slot. The table itself owns only the sizing policy: the aggregate
//! length, the load-factor check that runs before each insert, and the
//! prime-sized rebuild of the chain array.

use crate::array_map::{self, ArrayMap};
use crate::config::TableConfig;
use crate::error::InvalidArgument;
use crate::primes::next_prime;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use hashbrown::hash_map::DefaultHashBuilder;

type Chains<K, V> = Box<[Option<ArrayMap<K, V>>]>;

fn empty_chains<K, V>(count: usize) -> Chains<K, V> {
    (0..count).map(|_| None).collect()
}

/// Slot for `hash` in a table of `chain_count` chains.
///
/// The hash is read as a signed code and floor-modded, so codes with the
/// top bit set still land in `[0, chain_count)`.
#[inline]
pub(crate) fn slot_for(hash: u64, chain_count: usize) -> usize {
    debug_assert!(chain_count > 0);
    (hash as i64).rem_euclid(chain_count as i64) as usize
}

#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    chains: Chains<K, V>,
    len: usize,
    config: TableConfig,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Table with the default policy: threshold 0.75, 100 chains, 16 slots
    /// per chain.
    pub fn new() -> Self {
        Self::from_valid_config(TableConfig::default(), DefaultHashBuilder::default())
    }

    /// Table with a caller-chosen policy. Every parameter must be > 0.
    pub fn with_config(config: TableConfig) -> Result<Self, InvalidArgument> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current length of the chain array.
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// `len / chain_count`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.chains.len() as f64
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Drop every chain. The chain count is kept, so growth is not undone.
    pub fn clear(&mut self) {
        self.chains = empty_chains(self.chains.len());
        self.len = 0;
        #[cfg(debug_assertions)]
        self.check_invariants();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            chains: self.chains.iter(),
            current: None,
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            chains: self.chains.iter_mut(),
            current: None,
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    fn would_exceed_threshold(&self, len: usize) -> bool {
        len as f64 / self.chains.len() as f64 > self.config.load_factor_threshold
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        debug_assert_eq!(
            self.chains.iter().flatten().map(ArrayMap::len).sum::<usize>(),
            self.len,
            "len must equal the sum of chain lengths"
        );
        debug_assert!(
            !self.would_exceed_threshold(self.len),
            "load factor {} exceeds threshold {}",
            self.load_factor(),
            self.config.load_factor_threshold
        );
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, InvalidArgument> {
        config.validate()?;
        Ok(Self::from_valid_config(config, hasher))
    }

    fn from_valid_config(config: TableConfig, hasher: S) -> Self {
        Self {
            hasher,
            chains: empty_chains(config.initial_chain_count),
            len: 0,
            config,
        }
    }

    fn slot<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        slot_for(self.hasher.hash_one(q), self.chains.len())
    }

    fn chain<Q>(&self, q: &Q) -> Option<&ArrayMap<K, V>>
    where
        Q: ?Sized + Hash,
    {
        self.chains[self.slot(q)].as_ref()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chain(q)?.get(q)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.slot(q);
        self.chains[slot].as_mut()?.get_mut(q)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chain(q).map(|c| c.contains_key(q)).unwrap_or(false)
    }

    /// Insert or overwrite, returning the previous value for `key`.
    ///
    /// The load factor is checked as if `key` were new before anything is
    /// stored, so the resize (if any) happens ahead of the insert and the
    /// threshold holds once this returns. A very small threshold can take
    /// several resizes in one call; the chain array grows to roughly
    /// `len / load_factor_threshold` slots.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        while self.would_exceed_threshold(self.len + 1) {
            self.resize();
        }
        let slot = self.slot(&key);
        let chain_capacity = self.config.chain_capacity;
        let prev = self.chains[slot]
            .get_or_insert_with(|| ArrayMap::with_slots(chain_capacity))
            .insert(key, value);
        if prev.is_none() {
            self.len += 1;
        }
        #[cfg(debug_assertions)]
        self.check_invariants();
        prev
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.slot(q);
        let removed = self.chains[slot].as_mut()?.remove_entry(q);
        if removed.is_some() {
            self.len -= 1;
        }
        #[cfg(debug_assertions)]
        self.check_invariants();
        removed
    }

    /// Rebuild into the smallest prime number of chains `>= 2 * chain_count`,
    /// moving every entry into its slot for the new length.
    fn resize(&mut self) {
        let new_count = next_prime(self.chains.len().saturating_mul(2));
        let mut new_chains: Chains<K, V> = empty_chains(new_count);
        let old_chains = core::mem::take(&mut self.chains);
        for chain in old_chains.into_vec().into_iter().flatten() {
            for (key, value) in chain {
                let slot = slot_for(self.hasher.hash_one(&key), new_count);
                new_chains[slot]
                    .get_or_insert_with(|| ArrayMap::with_slots(self.config.chain_capacity))
                    .push_distinct(key, value);
            }
        }
        self.chains = new_chains;
        debug_assert_eq!(
            self.chains.iter().flatten().map(ArrayMap::len).sum::<usize>(),
            self.len,
            "rehash must move every entry"
        );
    }

}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::from_valid_config(TableConfig::default(), S::default());
        m.extend(iter);
        m
    }
}

/// Iterator over `(&K, &V)`: chains in array order, each chain in its own
/// slot order. Empty and never-materialized chains are skipped.
///
/// Holding the iterator borrows the table, so it cannot be mutated (or
/// resized) mid-traversal.
pub struct Iter<'a, K, V> {
    chains: core::slice::Iter<'a, Option<ArrayMap<K, V>>>,
    current: Option<array_map::Iter<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            // Advance to the next chain that holds anything.
            let chain = self.chains.by_ref().flatten().find(|c| !c.is_empty())?;
            self.current = Some(chain.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)`, in the same order as [`Iter`].
pub struct IterMut<'a, K, V> {
    chains: core::slice::IterMut<'a, Option<ArrayMap<K, V>>>,
    current: Option<array_map::IterMut<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            let chain = self.chains.by_ref().flatten().find(|c| !c.is_empty())?;
            self.current = Some(chain.iter_mut());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)`, in the same order as [`Iter`].
pub struct IntoIter<K, V> {
    chains: std::vec::IntoIter<Option<ArrayMap<K, V>>>,
    current: Option<array_map::IntoIter<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            let chain = self.chains.by_ref().flatten().find(|c| !c.is_empty())?;
            self.current = Some(chain.into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, S> IntoIterator for ChainedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            chains: self.chains.into_vec().into_iter(),
            current: None,
            remaining: self.len,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
