//! Shell Module
//!
//! Line-oriented JSON command shell over one cache instance, used to
//! inspect eviction behaviour from the command line.
//!
//! # Operations
//! - `set`, `get`, `has`, `delete` - Keyed operations
//! - `clear`, `size`, `keys` - Whole-cache operations
//! - `cleanup` - Overflow safeguard
//! - `stats` - Hit/miss/eviction counters

pub mod handlers;
pub mod requests;
pub mod responses;

pub use handlers::Session;
pub use requests::Request;
pub use responses::Response;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
