//! ArrayMap: flat, linearly scanned map used standalone and as a chain.
//!
//! Layout: `entries` is a vector of optional slots; the first `len` are
//! occupied and every slot at `len..` is empty. Removal keeps that prefix
//! dense by moving the last entry into the vacated slot, so removal
//! reorders the remaining entries.

use crate::error::InvalidArgument;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

#[derive(Clone)]
pub struct ArrayMap<K, V> {
    entries: Vec<Option<Entry<K, V>>>,
    len: usize,
}

impl<K, V> ArrayMap<K, V> {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::with_slots(Self::DEFAULT_CAPACITY)
    }

    /// Create a map with `capacity` empty slots. Zero is rejected.
    pub fn with_capacity(capacity: usize) -> Result<Self, InvalidArgument> {
        if capacity == 0 {
            return Err(InvalidArgument::ZeroCapacity);
        }
        Ok(Self::with_slots(capacity))
    }

    // Callers guarantee `capacity > 0`.
    pub(crate) fn with_slots(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);
        Self { entries, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the backing store. Doubles on overflow, never shrinks.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        for slot in &mut self.entries[..self.len] {
            *slot = None;
        }
        self.len = 0;
        #[cfg(debug_assertions)]
        self.check_invariants();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: &self.entries,
            index: 0,
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.len;
        IterMut {
            it: self.entries[..self.len].iter_mut(),
            remaining,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Append without scanning for an equal key. Used by the table's rehash,
    /// where keys are already known to be distinct.
    pub(crate) fn push_distinct(&mut self, key: K, value: V) {
        if self.len == self.entries.len() {
            self.grow();
        }
        self.entries[self.len] = Some(Entry { key, value });
        self.len += 1;
    }

    fn grow(&mut self) {
        let doubled = self.entries.len().saturating_mul(2).max(1);
        self.entries.resize_with(doubled, || None);
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        debug_assert!(self.len <= self.entries.len());
        debug_assert!(
            self.entries[..self.len].iter().all(Option::is_some),
            "occupied slots must form the prefix [0, len)"
        );
        debug_assert!(
            self.entries[self.len..].iter().all(Option::is_none),
            "slots at index >= len must be empty"
        );
    }
}

impl<K: Eq, V> ArrayMap<K, V> {
    fn position<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.entries[..self.len].iter().position(|slot| {
            slot.as_ref()
                .map(|e| e.key.borrow() == q)
                .unwrap_or(false)
        })
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let i = self.position(q)?;
        self.entries[i].as_ref().map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let i = self.position(q)?;
        self.entries[i].as_mut().map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(q).is_some()
    }

    /// Insert or overwrite. Returns the previous value when `key` was
    /// already present; the stored key is kept and only the value changes.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let prev = match self.position(&key) {
            Some(i) => self.entries[i]
                .as_mut()
                .map(|e| core::mem::replace(&mut e.value, value)),
            None => {
                self.push_distinct(key, value);
                None
            }
        };
        #[cfg(debug_assertions)]
        self.check_invariants();
        prev
    }

    /// Remove `q`, filling its slot with the last entry.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let i = self.position(q)?;
        let last = self.len - 1;
        self.entries.swap(i, last);
        let removed = self.entries[last].take();
        self.len = last;
        #[cfg(debug_assertions)]
        self.check_invariants();
        removed.map(|e| (e.key, e.value))
    }
}

impl<K, V> Default for ArrayMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ArrayMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq, V: PartialEq> PartialEq for ArrayMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Eq, V: Eq> Eq for ArrayMap<K, V> {}

impl<K: Eq, V> Extend<(K, V)> for ArrayMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Eq, V> FromIterator<(K, V)> for ArrayMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

/// Iterator over `(&K, &V)` in slot order.
///
/// The borrow on the map rules out mutation while iterating, so the
/// sequence always reflects the state at the time `iter` was called.
pub struct Iter<'a, K, V> {
    entries: &'a [Option<Entry<K, V>>],
    index: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        while self.index < entries.len() {
            let slot = &entries[self.index];
            self.index += 1;
            if let Some(e) = slot {
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` in slot order.
pub struct IterMut<'a, K, V> {
    it: core::slice::IterMut<'a, Option<Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.it.by_ref() {
            if let Some(Entry { key, value }) = slot {
                self.remaining -= 1;
                return Some((&*key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator; moves every `(K, V)` out of the map in slot order.
pub struct IntoIter<K, V> {
    it: std::vec::IntoIter<Option<Entry<K, V>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.it.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some((e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for ArrayMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        // Everything past `len` is empty.
        self.entries.truncate(self.len);
        IntoIter {
            it: self.entries.into_iter(),
            remaining: self.len,
        }
    }
}

impl<'a, K, V> IntoIterator for &'a ArrayMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut ArrayMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
