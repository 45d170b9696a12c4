//! # Value Scratch
//!
//! Two reusable value buffers for copying info-string values out of a buffer
//! that is about to change, typically to compare a client's old and new
//! setting across an update.
//!
//! ## Contract
//! A [`ValueScratch`] holds exactly two slots, so at most two copied values
//! can be live at once. Both are handed out together by
//! [`ValueScratch::slots`]; a third copy cannot be taken while either is
//! borrowed. Slot storage is reserved up front at the value bound and reused
//! on every load.
//!
//! The scratch is a plain owned value. Threads that want their own copies
//! each keep their own `ValueScratch`.
//!
//! ## Usage
//! ```rust
//! use info_protocol::utils::scratch::ValueScratch;
//! use info_protocol::InfoString;
//!
//! let mut userinfo = InfoString::parse("\\name\\dodo").unwrap();
//! let mut scratch = ValueScratch::new();
//! let [mut old, mut new] = scratch.slots();
//!
//! old.load(&userinfo, "name").unwrap();
//! userinfo.set_value_for_key("name", "bird").unwrap();
//! new.load(&userinfo, "name").unwrap();
//!
//! assert_ne!(old.as_str(), new.as_str());
//! ```

use crate::config::MAX_INFO_VALUE;
use crate::core::info::InfoString;
use crate::error::Result;

/// Number of values that may be live at once
pub const SCRATCH_SLOTS: usize = 2;

/// Owned pair of value buffers
#[derive(Debug, Clone)]
pub struct ValueScratch {
    slots: [String; SCRATCH_SLOTS],
}

impl ValueScratch {
    /// Slots sized for engine-bound values
    pub fn new() -> Self {
        Self::with_capacity(MAX_INFO_VALUE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: [String::with_capacity(capacity), String::with_capacity(capacity)],
        }
    }

    /// Borrow both slots at once
    pub fn slots(&mut self) -> [ValueSlot<'_>; SCRATCH_SLOTS] {
        let [first, second] = &mut self.slots;
        [ValueSlot { buffer: first }, ValueSlot { buffer: second }]
    }

    /// Copy the values for `first` and `second` into the two slots.
    ///
    /// Each result is the copied value, or the lookup error for that key.
    pub fn load_pair<'s>(
        &'s mut self,
        info: &InfoString,
        first: &str,
        second: &str,
    ) -> (Result<&'s str>, Result<&'s str>) {
        let [a, b] = &mut self.slots;
        (copy_value(a, info, first), copy_value(b, info, second))
    }
}

impl Default for ValueScratch {
    fn default() -> Self {
        Self::new()
    }
}

/// One borrowed slot of a [`ValueScratch`]
#[derive(Debug)]
pub struct ValueSlot<'s> {
    buffer: &'s mut String,
}

impl ValueSlot<'_> {
    /// Copy the value for `key` into this slot, replacing its previous content.
    ///
    /// On error the slot is left empty.
    pub fn load(&mut self, info: &InfoString, key: &str) -> Result<&str> {
        copy_value(self.buffer, info, key)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

fn copy_value<'s>(buffer: &'s mut String, info: &InfoString, key: &str) -> Result<&'s str> {
    buffer.clear();
    let value = info.value_for_key(key)?;
    buffer.push_str(value);
    Ok(buffer.as_str())
}
