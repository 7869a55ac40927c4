pub mod error;

pub mod db;

pub use db::{CacheBuilder, FxLruCache, LruCache};
pub use error::CacheError;
