//! # Core Text Components
//!
//! Bounded buffers, the token scanner, and the info-string codec.
//!
//! ## Components
//! - **BoundedBuffer**: fixed-capacity text storage with one checked mutation path
//! - **Token Scanner**: whitespace/quote tokenizer over borrowed text
//! - **Info Codec**: `\key\value` store with validation, lookup, set and remove
//!
//! ## Wire Format
//! ```text
//! \key1\value1\key2\value2...
//! ```
//!
//! ## Security
//! - Maximum info string size: 511 bytes plus terminator
//! - Keys and values never contain `\`, `;`, `"` or NUL
//! - Length is checked before any byte of a buffer is modified

pub mod buffer;
pub mod info;
pub mod token;
