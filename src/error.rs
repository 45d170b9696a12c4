//! # Error Types
//!
//! Error handling for the info-string codec, the token scanner helpers and
//! configuration loading.
//!
//! ## Error Categories
//! - **Validation Errors**: malformed keys, values, info strings
//! - **Capacity Errors**: a pair that would not fit in the bounded buffer
//! - **Lookup Errors**: a key that is not present
//! - **Content Errors**: malformed entity text from local assets (fatal)
//! - **Configuration Errors**: unreadable or invalid configuration
//!
//! Validation and capacity errors are recoverable: the caller rejects the
//! message or configuration entry, and the buffer is left byte-for-byte
//! unchanged. `MalformedEntities` indicates a content pipeline bug and callers
//! are expected to abort.
//!
//! ## Example Usage
//! ```rust
//! use info_protocol::error::{ProtocolError, Result};
//! use info_protocol::InfoString;
//! use tracing::{info, error};
//!
//! fn player_name(userinfo: &str) -> Result<String> {
//!     let info = InfoString::parse(userinfo)?;
//!     Ok(info.value_for_key("name")?.to_string())
//! }
//!
//! match player_name("\\name\\dodo\\hand\\2") {
//!     Ok(name) => info!(name, "Player connected"),
//!     Err(e) => error!(error=%e, "Rejected userinfo"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Info string errors
    pub const ERR_MALFORMED_INFO: &str = "Malformed info string";
    pub const ERR_INVALID_KEY: &str = "Invalid info key";
    pub const ERR_INVALID_VALUE: &str = "Invalid info value";
    pub const ERR_CAPACITY_EXCEEDED: &str = "Info string capacity exceeded";

    /// Entity text errors
    pub const ERR_ENTITIES_NO_BRACE: &str = "Entity string doesn't start with {";
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    #[serde(skip_serializing, skip_deserializing)]
    Io(#[from] io::Error),

    #[error("Info key not found")]
    NotFound,

    #[error("Invalid info key")]
    InvalidKey,

    #[error("Invalid info value")]
    InvalidValue,

    #[error("Info string capacity exceeded: {needed} bytes needed, {capacity} available")]
    CapacityExceeded { needed: usize, capacity: usize },

    #[error("Malformed info string")]
    MalformedInfoString,

    #[error("Malformed entity string: {0}")]
    MalformedEntities(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// True for errors caused by untrusted input rather than local content or
    /// configuration. Network code uses this to decide whether to drop a peer.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ProtocolError::InvalidKey
                | ProtocolError::InvalidValue
                | ProtocolError::MalformedInfoString
                | ProtocolError::CapacityExceeded { .. }
        )
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
