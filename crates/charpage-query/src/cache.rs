//! Result cache keyed by query variables.

use std::hash::Hash;

use charpage_core::collections::map::HashMap;

/// Where a query looks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Serve a cached result when one exists; hit the network otherwise.
    #[default]
    CacheFirst,
    /// Always hit the network. The cache is still refreshed with the result.
    NetworkOnly,
}

/// Last good result for each set of variables.
#[derive(Debug, Clone)]
pub struct ResultCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for ResultCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::default(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> ResultCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).cloned()
    }

    /// Stores `value`, returning the previous entry.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn evict(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
