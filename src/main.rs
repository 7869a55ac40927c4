use lrucache::{CacheError, LruCache};
use std::env;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CAPACITY_ENV: &str = "LRUCACHE_CAPACITY";
const DEFAULT_CAPACITY: usize = 3;

/// read_capacity reads the cache capacity from the environment.
/// We fallback to the default capacity if the variable is missing or not a number.
fn read_capacity() -> usize {
    match env::var(CAPACITY_ENV) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(value = %raw, error = %e, "invalid capacity, using default");
            DEFAULT_CAPACITY
        }),
        Err(_) => DEFAULT_CAPACITY,
    }
}

fn main() -> Result<(), CacheError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let cache = Arc::new(LruCache::new(read_capacity())?);
    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());
    cache.put(3, "three".to_string());

    // access 2, the order is now 2, 3, 1
    if let Some(value) = cache.get(&2) {
        info!(key = 2, %value, "cache hit");
    }
    cache.put(4, "four".to_string());
    info!(exists = cache.exists(&1), "key 1 after inserting key 4");
    info!(exists = cache.exists(&3), "key 3 after inserting key 4");

    let handles: Vec<_> = (0..4)
        .map(|worker_id| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..10 {
                    let key = 100 + worker_id * 10 + i;
                    cache.put(key, format!("worker{}-{}", worker_id, i));
                    cache.get(&key);
                }
            })
        })
        .collect();
    for handle in handles {
        if handle.join().is_err() {
            warn!("worker thread panicked");
        }
    }

    info!(cache = ?cache, keys = ?cache.keys(), "final cache state");
    Ok(())
}
