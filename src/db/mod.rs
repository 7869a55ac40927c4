mod list;
mod lru;

pub use lru::*;

use crate::error::CacheError;
use rustc_hash::FxHasher;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

/// FxLruCache is an `LruCache` hashing its keys with `rustc_hash::FxHasher`.
/// Faster than the default SipHash for small keys, but not resistant to HashDoS.
pub type FxLruCache<K, V> = LruCache<K, V, BuildHasherDefault<FxHasher>>;

/// Entry represents a cache item. The key never changes once the entry is created.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// CacheBuilder is a struct used to build a cache.
/// # Example
///
/// ```
/// use lrucache::db::{CacheBuilder, FxLruCache};
///
/// let cache: FxLruCache<u32, String> = CacheBuilder::new(128)
///     .with_hasher(Default::default())
///     .build()
///     .unwrap();
/// assert_eq!(cache.capacity(), 128);
/// ```
pub struct CacheBuilder<S = RandomState> {
    capacity: usize,
    hasher: S,
}

impl CacheBuilder<RandomState> {
    pub fn new(capacity: usize) -> Self {
        CacheBuilder {
            capacity,
            hasher: RandomState::new(),
        }
    }
}

impl<S: BuildHasher> CacheBuilder<S> {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// with_hasher swaps the hashing strategy used by the key index.
    pub fn with_hasher<H: BuildHasher>(self, hasher: H) -> CacheBuilder<H> {
        CacheBuilder {
            capacity: self.capacity,
            hasher,
        }
    }

    /// build fails with `CacheError::ZeroCapacity` if no capacity was allocated.
    pub fn build<K: Eq + Hash, V>(self) -> Result<LruCache<K, V, S>, CacheError> {
        LruCache::with_hasher(self.capacity, self.hasher)
    }
}
