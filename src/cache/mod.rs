//! Cache Module
//!
//! Provides a bounded in-memory cache with least-recently-used eviction.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub(crate) use entry::Handle;
pub use stats::CacheStats;
pub use store::{BoundedRecencyCache, Keys};

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 100;
