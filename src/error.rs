use std::fmt::{Debug, Display, Formatter, Result};

/// CacheError lists the ways building a cache can fail.
/// Cache operations themselves never fail: a missing key is reported as `None`.
#[derive(Debug)]
pub enum CacheError {
    ZeroCapacity,
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CacheError::ZeroCapacity => write!(f, "no capacity allocated to the cache"),
        }
    }
}

// Allow the error to be used with ?
impl std::error::Error for CacheError {}
