//! Request models for the command shell
//!
//! One JSON object per input line, tagged by its `op` field.

use serde::Deserialize;

use crate::error::{CacheError, Result};
use crate::shell::MAX_KEY_LENGTH;

/// A single shell command.
///
/// ```text
/// {"op":"set","key":"avatar:42","value":"..."}
/// {"op":"get","key":"avatar:42"}
/// {"op":"keys"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Request {
    /// Store a value and promote the key
    Set { key: String, value: String },
    /// Look up and promote a key
    Get { key: String },
    /// Membership test without promotion
    Has { key: String },
    /// Remove a key
    Delete { key: String },
    /// Remove every entry
    Clear,
    /// Report size and capacity
    Size,
    /// List keys, least recently used first
    Keys,
    /// Run the overflow safeguard
    Cleanup,
    /// Report statistics
    Stats,
}

impl Request {
    /// Parses and validates one input line.
    pub fn parse(line: &str) -> Result<Self> {
        let request: Request = serde_json::from_str(line)
            .map_err(|e| CacheError::InvalidRequest(format!("Malformed request: {}", e)))?;

        if let Some(error_msg) = request.validate() {
            return Err(CacheError::InvalidRequest(error_msg));
        }
        Ok(request)
    }

    /// Returns the key this request targets, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Request::Set { key, .. }
            | Request::Get { key }
            | Request::Has { key }
            | Request::Delete { key } => Some(key.as_str()),
            _ => None,
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let key = self.key()?;
        if key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}
