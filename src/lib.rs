//! Recency Cache - A bounded in-process cache
//!
//! Caps memory growth for derived values with a fixed capacity,
//! least-recently-used eviction and an explicit overflow safeguard.

pub mod cache;
pub mod config;
pub mod error;
pub mod shell;

pub use cache::{BoundedRecencyCache, CacheStats, DEFAULT_CAPACITY};
pub use config::Config;
pub use error::{CacheError, Result};
pub use shell::Session;
