//! Response models for the command shell
//!
//! Each response serializes to one JSON object on its own output line.

use serde::Serialize;

use crate::cache::CacheStats;

/// Any shell response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Get(GetResponse),
    Set(SetResponse),
    Has(HasResponse),
    Delete(DeleteResponse),
    Size(SizeResponse),
    Keys(KeysResponse),
    Cleanup(CleanupResponse),
    Stats(StatsResponse),
    Error(ErrorResponse),
}

/// Result of a `get`.
///
/// `value` is null exactly when `found` is false, so a stored empty string
/// never looks like a miss.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub found: bool,
    pub value: Option<String>,
}

impl GetResponse {
    /// Creates a new GetResponse from a lookup result
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            found: value.is_some(),
            value,
        }
    }
}

/// Result of a `set`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetResponse {
    pub key: String,
    /// Cache size after the insert
    pub size: usize,
}

/// Result of a `has`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HasResponse {
    pub key: String,
    pub present: bool,
}

/// Result of a `delete`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteResponse {
    pub key: String,
    pub deleted: bool,
}

/// Result of `size` and `clear`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeResponse {
    pub size: usize,
    pub capacity: usize,
}

/// Result of `keys`, least recently used first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Result of `cleanup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanupResponse {
    pub discarded: usize,
    pub size: usize,
}

/// Result of `stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Error response for malformed or rejected requests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
