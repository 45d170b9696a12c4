//! # Bounded Buffer
//!
//! Fixed-capacity text buffer backing every info string.
//!
//! The capacity counts a terminator slot the way the wire format does, so a
//! buffer of capacity `N` holds at most `N - 1` bytes. Storage is allocated
//! once at construction and never grows afterwards.
//!
//! All mutation funnels through [`BoundedBuffer::splice`], which checks the
//! length invariant before touching any byte. A rejected splice leaves the
//! buffer unchanged.

use crate::error::{ProtocolError, Result};
use std::fmt;
use std::ops::Range;

/// Text buffer with a fixed capacity
#[derive(Clone, PartialEq, Eq)]
pub struct BoundedBuffer {
    text: String,
    capacity: usize,
}

impl BoundedBuffer {
    /// Create an empty buffer able to hold `capacity - 1` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a buffer pre-populated with `content`
    pub fn with_content(content: &str, capacity: usize) -> Result<Self> {
        let mut buffer = Self::new(capacity);
        buffer.splice(0..0, content)?;
        Ok(buffer)
    }

    /// Capacity including the terminator slot
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest number of bytes the buffer can hold
    #[inline]
    pub fn max_len(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Bytes still available before the buffer is full
    #[inline]
    pub fn remaining(&self) -> usize {
        self.max_len().saturating_sub(self.text.len())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Replace `range` with `replacement`, moving the tail as needed.
    ///
    /// `range` must lie on character boundaries within the current content.
    /// Fails with [`ProtocolError::CapacityExceeded`] when the result would not
    /// fit, in which case nothing is modified.
    pub fn splice(&mut self, range: Range<usize>, replacement: &str) -> Result<()> {
        debug_assert!(range.start <= range.end && range.end <= self.text.len());

        let needed = self.text.len() - (range.end - range.start) + replacement.len();
        if needed > self.max_len() {
            return Err(ProtocolError::CapacityExceeded {
                needed,
                capacity: self.max_len(),
            });
        }

        self.text.replace_range(range, replacement);
        Ok(())
    }

    /// Append `text` at the end
    pub fn push_str(&mut self, text: &str) -> Result<()> {
        let end = self.text.len();
        self.splice(end..end, text)
    }

    /// Remove `range`, closing the gap
    pub fn remove(&mut self, range: Range<usize>) {
        let shrunk = self.splice(range, "");
        debug_assert!(shrunk.is_ok(), "removing bytes cannot exceed capacity");
    }

    /// Drop everything from `at` onwards
    pub fn truncate(&mut self, at: usize) {
        let end = self.text.len();
        self.remove(at..end);
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }
}

impl fmt::Debug for BoundedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBuffer")
            .field("text", &self.text)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl AsRef<str> for BoundedBuffer {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
