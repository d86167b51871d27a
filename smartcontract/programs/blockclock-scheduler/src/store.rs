//! Ordered key-value store and branched write scopes
//!
//! `MemoryStore` plays the committed state. `CacheStore` buffers writes over a
//! parent store and only applies them on `commit`; dropping it discards them.
//! Branches nest, so a per-job scope can sit inside a per-block scope.
//! `PrefixStore` confines a caller to one key namespace.

use std::{
    collections::BTreeMap,
    ops::{Bound, RangeBounds},
};

/// Ordered byte-keyed store. Iteration is always ascending by key.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: &[u8], value: Vec<u8>);

    fn delete(&mut self, key: &[u8]);

    /// All entries whose key starts with `prefix`, ascending by key
    fn prefix_iter(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)>;

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Full contents in key order, used to compare replicas
    pub fn dump(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.get(key).cloned()
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.data.insert(key.to_vec(), value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.data.remove(key);
    }

    fn prefix_iter(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.data
            .range(PrefixRange::new(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Write buffer over a parent store. `None` in the overlay marks a delete.
pub struct CacheStore<'a> {
    parent: &'a mut dyn KvStore,
    overlay: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> CacheStore<'a> {
    pub fn new(parent: &'a mut dyn KvStore) -> Self {
        Self {
            parent,
            overlay: BTreeMap::new(),
        }
    }

    /// Number of pending writes and deletes
    pub fn pending(&self) -> usize {
        self.overlay.len()
    }

    /// Flush all buffered writes into the parent, in key order
    pub fn commit(self) {
        let CacheStore { parent, overlay } = self;
        for (key, value) in overlay {
            match value {
                Some(value) => parent.set(&key, value),
                None => parent.delete(&key),
            }
        }
    }

    /// Drop all buffered writes; the parent is left untouched
    pub fn discard(self) {}
}

impl KvStore for CacheStore<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.overlay.get(key) {
            Some(value) => value.clone(),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.overlay.insert(key.to_vec(), Some(value));
    }

    fn delete(&mut self, key: &[u8]) {
        self.overlay.insert(key.to_vec(), None);
    }

    fn prefix_iter(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.parent.prefix_iter(prefix).into_iter().collect();

        for (key, value) in self.overlay.range(PrefixRange::new(prefix)) {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        merged.into_iter().collect()
    }
}

/// View of a parent store confined to keys under `prefix`.
///
/// Keys passed in are relative to the prefix and keys handed back have it
/// stripped, so nothing outside the prefix can be read or written.
pub struct PrefixStore<'a> {
    parent: &'a mut dyn KvStore,
    prefix: Vec<u8>,
}

impl<'a> PrefixStore<'a> {
    pub fn new(parent: &'a mut dyn KvStore, prefix: Vec<u8>) -> Self {
        Self { parent, prefix }
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        [self.prefix.as_slice(), key].concat()
    }
}

impl KvStore for PrefixStore<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.parent.get(&self.full_key(key))
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        let key = self.full_key(key);
        self.parent.set(&key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        let key = self.full_key(key);
        self.parent.delete(&key);
    }

    fn prefix_iter(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let strip = self.prefix.len();
        self.parent
            .prefix_iter(&self.full_key(prefix))
            .into_iter()
            .map(|(key, value)| (key[strip..].to_vec(), value))
            .collect()
    }
}

/// Key range covering every key that starts with a prefix
struct PrefixRange {
    start: Vec<u8>,
    end: Option<Vec<u8>>,
}

impl PrefixRange {
    fn new(prefix: &[u8]) -> Self {
        Self {
            start: prefix.to_vec(),
            end: prefix_end(prefix),
        }
    }
}

impl RangeBounds<Vec<u8>> for PrefixRange {
    fn start_bound(&self) -> Bound<&Vec<u8>> {
        Bound::Included(&self.start)
    }

    fn end_bound(&self) -> Bound<&Vec<u8>> {
        match &self.end {
            Some(end) => Bound::Excluded(end),
            None => Bound::Unbounded,
        }
    }
}

/// Smallest key greater than every key with `prefix`, or `None` if unbounded
fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}
