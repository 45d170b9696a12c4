//! # Protocol Text Formats
//!
//! Formats layered over the core scanner and codec.
//!
//! ## Components
//! - **Configstring**: quote-parity validation for replicated configstrings
//! - **Entity**: worldspawn key lookup in map entity text

pub mod configstring;
pub mod entity;
