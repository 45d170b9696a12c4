//! # Info-String Codec
//!
//! Bounded key/value store serialized as one string:
//!
//! ```text
//! \key1\value1\key2\value2...
//! ```
//!
//! Every pair starts with a `\`, the key is terminated by a `\`, and the value
//! runs up to the next `\` or the end of the string. Keys and values never
//! contain `\`, `;` or `"`; the last two would collide with console command
//! syntax downstream. NUL is rejected as well: peers that read the buffer as
//! NUL-terminated text would stop early and see different pairs.
//!
//! ## Layers
//! - [`InfoCodec`] and the free functions of this module operate on raw text
//!   and a caller-owned [`BoundedBuffer`] with boolean results.
//!   [`find_key`], [`value_for_key`] and [`remove_key`] expect input that was
//!   validated at the protocol edge. Handing them an invalid buffer or key is
//!   a programming error: debug builds panic, release builds answer
//!   "not found" and leave the buffer alone.
//! - [`InfoString`] owns its buffer and can only ever hold a valid info
//!   string, so its lookups need no revalidation. It reports failures through
//!   [`ProtocolError`].
//!
//! ## Ordering
//! Setting a key removes every existing pair for it and appends the new pair
//! at the end. Updated keys therefore move to the back; peers rely on this.

use crate::config::InfoLimits;
use crate::core::buffer::BoundedBuffer;
use crate::error::{constants, ProtocolError, Result};
use crate::utils::metrics::global_metrics;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use tracing::{debug, warn};

const DELIMITER: u8 = b'\\';

#[inline]
fn is_forbidden(byte: u8) -> bool {
    matches!(byte, b'\\' | b';' | b'"' | b'\0')
}

#[inline]
fn next_delimiter(bytes: &[u8], from: usize) -> Option<usize> {
    bytes[from..]
        .iter()
        .position(|&b| b == DELIMITER)
        .map(|offset| from + offset)
}

/// Location of one `\key\value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
struct PairSpan {
    key: Range<usize>,
    value: Range<usize>,
}

impl PairSpan {
    /// Whole pair, from the leading `\` to the end of the value
    #[inline]
    fn range(&self) -> Range<usize> {
        (self.key.start - 1)..self.value.end
    }
}

/// Walks the pairs of an info string that has already been validated
struct PairSpans<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PairSpans<'a> {
    fn new(info: &'a str) -> Self {
        Self {
            bytes: info.as_bytes(),
            pos: 0,
        }
    }
}

impl Iterator for PairSpans<'_> {
    type Item = PairSpan;

    fn next(&mut self) -> Option<PairSpan> {
        if self.pos >= self.bytes.len() {
            return None;
        }

        let key_start = self.pos + 1;
        let key_end = next_delimiter(self.bytes, key_start)?;
        let value_start = key_end + 1;
        let value_end = next_delimiter(self.bytes, value_start).unwrap_or(self.bytes.len());

        self.pos = value_end;
        Some(PairSpan {
            key: key_start..key_end,
            value: value_start..value_end,
        })
    }
}

/// Borrowing iterator over the `(key, value)` pairs of an info string
pub struct Pairs<'a> {
    info: &'a str,
    spans: PairSpans<'a>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let info = self.info;
        self.spans
            .next()
            .map(|span| (&info[span.key], &info[span.value]))
    }
}

/// Info-string operations under a given set of bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InfoCodec {
    limits: InfoLimits,
}

/// Codec with the engine-wide bounds
pub const ENGINE_CODEC: InfoCodec = InfoCodec::new(InfoLimits::ENGINE);

impl InfoCodec {
    pub const fn new(limits: InfoLimits) -> Self {
        Self { limits }
    }

    #[inline]
    pub fn limits(&self) -> &InfoLimits {
        &self.limits
    }

    /// Check that `info` is a well-formed info string within bounds.
    ///
    /// Raw `"`, `;` and NUL are rejected anywhere in the buffer, even where a
    /// misparsed pair would hide them from the per-field checks.
    pub fn validate(&self, info: &str) -> bool {
        let bytes = info.as_bytes();

        if bytes.len() >= self.limits.max_string {
            return false;
        }

        if bytes.iter().any(|&b| matches!(b, b'"' | b';' | b'\0')) {
            return false;
        }

        let mut p = 0;
        while p < bytes.len() {
            if bytes[p] != DELIMITER {
                return false;
            }
            p += 1;

            // a key must be closed by a delimiter
            let Some(key_end) = next_delimiter(bytes, p) else {
                return false;
            };
            if key_end - p >= self.limits.max_key {
                return false;
            }
            p = key_end + 1;

            let value_end = next_delimiter(bytes, p).unwrap_or(bytes.len());
            if value_end - p >= self.limits.max_value {
                return false;
            }
            p = value_end;
        }

        true
    }

    /// Non-empty, shorter than the key bound, no forbidden characters
    pub fn validate_key(&self, key: &str) -> bool {
        !key.is_empty()
            && key.len() < self.limits.max_key
            && !key.bytes().any(is_forbidden)
    }

    /// Shorter than the value bound, no forbidden characters; may be empty
    pub fn validate_value(&self, value: &str) -> bool {
        value.len() < self.limits.max_value && !value.bytes().any(is_forbidden)
    }

    /// Position of the leading `\` of the first pair whose key is `key`.
    ///
    /// `info` and `key` must already be valid.
    pub fn find_key(&self, info: &str, key: &str) -> Option<usize> {
        self.find_span(info, key).map(|span| span.key.start - 1)
    }

    /// Value stored for `key`, borrowed from `info`.
    ///
    /// `info` and `key` must already be valid. Results borrow the buffer, so
    /// any number of them may be held until the buffer is next mutated; use
    /// [`crate::utils::scratch::ValueScratch`] to keep a copy across a
    /// mutation.
    pub fn value_for_key<'a>(&self, info: &'a str, key: &str) -> Option<&'a str> {
        global_metrics().lookup();
        match self.find_span(info, key) {
            Some(span) => Some(&info[span.value]),
            None => {
                global_metrics().lookup_miss();
                None
            }
        }
    }

    /// Delete every pair for `key`. Absent keys are a no-op.
    ///
    /// `info` and `key` must already be valid.
    pub fn remove_key(&self, info: &mut BoundedBuffer, key: &str) {
        while let Some(span) = self.find_span(info.as_str(), key) {
            info.remove(span.range());
            global_metrics().key_removed();
        }
    }

    /// Replace any pair for `key` with `\key\value` appended at the end.
    ///
    /// Returns false, leaving `info` untouched, when `info`, `key` or `value`
    /// is invalid or when the result would not fit.
    pub fn set_value_for_key(&self, info: &mut BoundedBuffer, key: &str, value: &str) -> bool {
        self.try_set(info, key, value).is_ok()
    }

    pub(crate) fn try_set(&self, info: &mut BoundedBuffer, key: &str, value: &str) -> Result<()> {
        if !self.validate(info.as_str()) {
            debug!(len = info.len(), "{}", constants::ERR_MALFORMED_INFO);
            global_metrics().set_rejected();
            return Err(ProtocolError::MalformedInfoString);
        }
        if !self.validate_key(key) {
            debug!(key, "{}", constants::ERR_INVALID_KEY);
            global_metrics().set_rejected();
            return Err(ProtocolError::InvalidKey);
        }
        if !self.validate_value(value) {
            debug!(key, value, "{}", constants::ERR_INVALID_VALUE);
            global_metrics().set_rejected();
            return Err(ProtocolError::InvalidValue);
        }

        // size the result before touching the buffer
        let replaced: usize = PairSpans::new(info.as_str())
            .filter(|span| &info.as_str()[span.key.clone()] == key)
            .map(|span| span.range().len())
            .sum();
        let needed = info.len() - replaced + 2 + key.len() + value.len();
        let capacity = info.max_len().min(self.limits.max_len());
        if needed > capacity {
            warn!(key, needed, capacity, "{}", constants::ERR_CAPACITY_EXCEEDED);
            global_metrics().capacity_rejected();
            return Err(ProtocolError::CapacityExceeded { needed, capacity });
        }

        self.remove_key(info, key);
        info.push_str("\\")?;
        info.push_str(key)?;
        info.push_str("\\")?;
        info.push_str(value)?;

        global_metrics().key_set();
        Ok(())
    }

    fn find_span(&self, info: &str, key: &str) -> Option<PairSpan> {
        debug_assert!(self.validate(info), "info string must be validated before lookup");
        debug_assert!(self.validate_key(key), "info key must be validated before lookup");

        if !self.validate(info) || !self.validate_key(key) {
            return None;
        }

        PairSpans::new(info).find(|span| &info[span.key.clone()] == key)
    }
}

/// [`InfoCodec::validate`] with engine bounds
pub fn validate(info: &str) -> bool {
    ENGINE_CODEC.validate(info)
}

/// [`InfoCodec::validate_key`] with engine bounds
pub fn validate_key(key: &str) -> bool {
    ENGINE_CODEC.validate_key(key)
}

/// [`InfoCodec::validate_value`] with engine bounds
pub fn validate_value(value: &str) -> bool {
    ENGINE_CODEC.validate_value(value)
}

/// [`InfoCodec::find_key`] with engine bounds
pub fn find_key(info: &str, key: &str) -> Option<usize> {
    ENGINE_CODEC.find_key(info, key)
}

/// [`InfoCodec::value_for_key`] with engine bounds
pub fn value_for_key<'a>(info: &'a str, key: &str) -> Option<&'a str> {
    ENGINE_CODEC.value_for_key(info, key)
}

/// [`InfoCodec::remove_key`] with engine bounds
pub fn remove_key(info: &mut BoundedBuffer, key: &str) {
    ENGINE_CODEC.remove_key(info, key)
}

/// [`InfoCodec::set_value_for_key`] with engine bounds
pub fn set_value_for_key(info: &mut BoundedBuffer, key: &str, value: &str) -> bool {
    ENGINE_CODEC.set_value_for_key(info, key, value)
}

/// Owned info string that is valid at all times
///
/// Construction validates once; every mutation preserves validity, so
/// lookups never rescan for well-formedness on the caller's behalf.
///
/// ```rust
/// use info_protocol::InfoString;
///
/// let mut info = InfoString::parse("\\a\\1\\b\\2").unwrap();
/// info.set_value_for_key("a", "9").unwrap();
/// assert_eq!(info.as_str(), "\\b\\2\\a\\9");
/// assert_eq!(info.value_for_key("a").unwrap(), "9");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct InfoString {
    buffer: BoundedBuffer,
    codec: InfoCodec,
}

impl InfoString {
    /// Empty info string with engine bounds
    pub fn new() -> Self {
        Self::with_limits(InfoLimits::ENGINE)
    }

    /// Empty info string with custom bounds
    pub fn with_limits(limits: InfoLimits) -> Self {
        Self {
            buffer: BoundedBuffer::new(limits.max_string),
            codec: InfoCodec::new(limits),
        }
    }

    /// Validate `text` and take a copy of it
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_limits(text, InfoLimits::ENGINE)
    }

    pub fn parse_with_limits(text: &str, limits: InfoLimits) -> Result<Self> {
        let codec = InfoCodec::new(limits);
        if !codec.validate(text) {
            debug!(len = text.len(), "{}", constants::ERR_MALFORMED_INFO);
            global_metrics().info_rejected();
            return Err(ProtocolError::MalformedInfoString);
        }

        let buffer = BoundedBuffer::with_content(text, limits.max_string)?;
        global_metrics().info_parsed();
        Ok(Self { buffer, codec })
    }

    /// Validate raw bytes received from a peer
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|_| {
            global_metrics().info_rejected();
            ProtocolError::MalformedInfoString
        })?;
        Self::parse(text)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_str().as_bytes()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn limits(&self) -> &InfoLimits {
        self.codec.limits()
    }

    /// Position of the pair for `key`
    pub fn find_key(&self, key: &str) -> Result<usize> {
        self.check_key(key)?;
        self.codec
            .find_key(self.as_str(), key)
            .ok_or(ProtocolError::NotFound)
    }

    /// Value for `key`, borrowed from this info string
    pub fn value_for_key(&self, key: &str) -> Result<&str> {
        self.check_key(key)?;
        self.codec
            .value_for_key(self.as_str(), key)
            .ok_or(ProtocolError::NotFound)
    }

    /// Value for `key`, or `None` when the key is absent or invalid
    pub fn get(&self, key: &str) -> Option<&str> {
        self.value_for_key(key).ok()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_key(key).is_ok()
    }

    /// Set `key` to `value`, moving the pair to the end.
    ///
    /// On error nothing is modified.
    pub fn set_value_for_key(&mut self, key: &str, value: &str) -> Result<()> {
        self.codec.try_set(&mut self.buffer, key, value)
    }

    /// Remove every pair for `key`. Removing an absent key succeeds.
    pub fn remove_key(&mut self, key: &str) -> Result<()> {
        self.check_key(key)?;
        self.codec.remove_key(&mut self.buffer, key);
        Ok(())
    }

    /// Pairs in wire order
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs {
            info: self.as_str(),
            spans: PairSpans::new(self.as_str()),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    fn check_key(&self, key: &str) -> Result<()> {
        if self.codec.validate_key(key) {
            Ok(())
        } else {
            debug!(key, "{}", constants::ERR_INVALID_KEY);
            Err(ProtocolError::InvalidKey)
        }
    }
}

impl Default for InfoString {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InfoString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InfoString").field(&self.as_str()).finish()
    }
}

impl fmt::Display for InfoString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoString {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for InfoString {
    type Error = ProtocolError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for InfoString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for InfoString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Deserializes under the engine bounds.
///
/// Only the wire text is serialized, not the limits. Text written by an
/// `InfoString` with wider custom limits fails here with
/// [`ProtocolError::MalformedInfoString`]; deserialize it as a `String` and
/// restore it with [`InfoString::parse_with_limits`] instead.
impl<'de> Deserialize<'de> for InfoString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
