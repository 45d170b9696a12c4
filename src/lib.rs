//! # info-protocol
//!
//! Structured text protocol layer for a networked game engine: the bounded
//! info-string codec used for server info, user info and replicated
//! configuration, plus the token scanner the engine's text formats share.
//!
//! ## Info strings
//! ```text
//! \name\dodo\hand\2\fov\100
//! ```
//! An info string is at most [`config::MAX_INFO_STRING`]` - 1` bytes. Keys
//! are shorter than [`config::MAX_INFO_KEY`], values shorter than
//! [`config::MAX_INFO_VALUE`], and neither may contain `\`, `;`, `"` or NUL.
//!
//! Validate once at the protocol edge with [`InfoString::parse`]; after that
//! the buffer stays valid through every set and remove.
//!
//! ```rust
//! use info_protocol::InfoString;
//!
//! let mut userinfo = InfoString::parse("\\name\\dodo\\hand\\2").unwrap();
//! userinfo.set_value_for_key("name", "big dodo").unwrap();
//! assert_eq!(userinfo.value_for_key("name").unwrap(), "big dodo");
//!
//! // delimiters inside values would let one field impersonate two
//! assert!(userinfo.set_value_for_key("name", "x\\rcon\\1").is_err());
//! ```
//!
//! ## Tokens
//! ```rust
//! use info_protocol::Cursor;
//!
//! let cursor = Cursor::new("map \"dm 1\"");
//! let words: Vec<_> = cursor.map(|t| t.as_str()).collect();
//! assert_eq!(words, ["map", "dm 1"]);
//! ```
//!
//! ## Modules
//! - [`core`]: bounded buffer, token scanner, info-string codec
//! - [`protocol`]: configstrings and entity text
//! - [`config`]: limits and logging configuration
//! - [`error`]: error types
//! - [`utils`]: numeric conversion, logging, metrics, value scratch

#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::config::{InfoLimits, ProtocolConfig};
pub use crate::core::buffer::BoundedBuffer;
pub use crate::core::info::{InfoCodec, InfoString};
pub use crate::core::token::{Cursor, StopMode, Token};
pub use crate::error::{ProtocolError, Result};
pub use crate::protocol::configstring::validate_configstring;
pub use crate::protocol::entity::parse_worldspawn_key;
