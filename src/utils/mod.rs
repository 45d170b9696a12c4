//! # Utility Modules
//!
//! Supporting utilities for conversion, logging, metrics and value copies.
//!
//! ## Components
//! - **Convert**: Bounded numeric conversion of scanned tokens
//! - **Logging**: Structured logging configuration
//! - **Metrics**: Thread-safe observability counters
//! - **Scratch**: Two-slot value copies that outlive buffer mutations

pub mod convert;
pub mod logging;
pub mod metrics;
pub mod scratch;

pub use scratch::{ValueScratch, ValueSlot};
