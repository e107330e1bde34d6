//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{CacheError, Result};

/// Name of the environment variable holding the cache capacity.
pub const CAPACITY_ENV: &str = "CACHE_CAPACITY";

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache retains
    pub capacity: usize,
}

impl Config {
    /// Creates a Config from a signed capacity, rejecting negative values.
    pub fn with_capacity(capacity: i64) -> Result<Self> {
        let capacity = usize::try_from(capacity).map_err(|_| {
            CacheError::InvalidCapacity(format!("capacity must be non-negative, got {}", capacity))
        })?;
        Ok(Self { capacity })
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    ///
    /// An unset variable falls back to the default; a set but malformed or
    /// negative value is an error.
    pub fn from_env() -> Result<Self> {
        match env::var(CAPACITY_ENV) {
            Ok(raw) => Self::with_capacity(parse_capacity(&raw)?),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Parses a textual capacity as a signed integer.
fn parse_capacity(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CacheError::InvalidCapacity(format!("'{}' is not an integer", raw)))
}
