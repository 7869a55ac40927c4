use crate::db::list::{Handle, RecencyList};
use crate::error::CacheError;
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, Hash};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, trace};

/// State is what the cache lock protects. `index` and `list` always hold the same keys:
/// every key in `index` maps to the handle of its entry in `list`.
struct State<K, V, S> {
    index: HashMap<K, Handle, S>,
    list: RecencyList<K, V>,
}

impl<K: Eq + Hash, V, S: BuildHasher> State<K, V, S> {
    fn promote<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.list.move_to_front(handle);
        Some(handle)
    }

    fn evict_lru(&mut self) {
        if let Some(evicted) = self.list.pop_back() {
            self.index.remove(&evicted.key);
            trace!(size = self.list.len(), "evicted least recently used entry");
        }
    }
}

// Only a panicking Hash or Eq impl of K can poison the lock, and it may do so between the index
// and the list updates. Calling unwrap is Ok: a state we cannot trust must not be served.
fn lock_state<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap()
}

/// LruCache is a fixed capacity key-value cache evicting the least recently used entry.
///
/// A single mutex guards the key index and the recency list together, so every operation is
/// atomic with respect to every other one. `get` reorders the recency list, which is why reads
/// take the same exclusive lock as writes. Share it across threads with an `Arc`.
///
/// # Example
///
/// ```
/// use lrucache::db::LruCache;
///
/// let cache = LruCache::new(2).unwrap();
/// cache.put(1, "one");
/// cache.put(2, "two");
/// cache.get(&1);
/// cache.put(3, "three"); // evicts 2
/// assert!(!cache.exists(&2));
/// assert_eq!(cache.size(), 2);
/// ```
pub struct LruCache<K, V, S = RandomState> {
    state: Mutex<State<K, V, S>>,
    // fixed at construction, so reading it does not need the lock
    capacity: usize,
}

impl<K: Eq + Hash, V> LruCache<K, V, RandomState> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ZeroCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        Self::with_hasher(capacity, RandomState::new())
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates an empty cache whose key index hashes with `hasher`.
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        debug!(capacity, "creating lru cache");
        Ok(Self {
            state: Mutex::new(State {
                index: HashMap::with_capacity_and_hasher(capacity, hasher),
                list: RecencyList::with_capacity(capacity),
            }),
            capacity,
        })
    }

    fn lock(&self) -> MutexGuard<'_, State<K, V, S>> {
        lock_state(&self.state)
    }

    /// get returns a copy of the value stored under `key` and marks the entry as the most
    /// recently used one. A miss returns `None` and changes nothing.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let mut state = self.lock();
        let handle = state.promote(key)?;
        state.list.get(handle).map(|entry| entry.value.clone())
    }

    /// put stores `value` under `key` and marks the entry as the most recently used one.
    ///
    /// An existing key gets its value replaced in place, the size does not change.
    /// A new key inserted into a full cache first evicts exactly one entry, the least recently used.
    pub fn put(&self, key: K, value: V)
    where
        K: Clone,
    {
        let mut state = self.lock();
        if let Some(handle) = state.promote(&key) {
            if let Some(entry) = state.list.get_mut(handle) {
                entry.value = value;
            }
            return;
        }

        if state.list.len() >= self.capacity {
            state.evict_lru();
        }
        let handle = state.list.push_front(key.clone(), value);
        state.index.insert(key, handle);
    }

    /// exists reports whether `key` is cached without touching the recency order.
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().index.contains_key(key)
    }

    /// remove deletes the entry stored under `key` and returns its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut state = self.lock();
        let handle = state.index.remove(key)?;
        state.list.remove(handle).map(|entry| entry.value)
    }

    /// clear drops every entry. The capacity is kept.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.index.clear();
        state.list.clear();
    }

    /// keys lists the cached keys from the most to the least recently used,
    /// without touching the recency order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.lock()
            .list
            .iter()
            .map(|entry| entry.key.clone())
            .collect()
    }
}

impl<K, V, S> LruCache<K, V, S> {
    pub fn size(&self) -> usize {
        lock_state(&self.state).list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V, S> Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LruCache{{capacity: {}, size: {}}}",
            self.capacity,
            self.size()
        )
    }
}
