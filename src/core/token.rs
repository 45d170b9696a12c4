//! # Token Scanner
//!
//! Cursor-based lexer shared by the engine's line-oriented text formats
//! (entity definitions, console commands, configuration scripts).
//!
//! A token is either a run of non-whitespace characters or the content of a
//! double-quoted string. Whitespace is space, tab, CR, LF and NUL.
//!
//! ```rust
//! use info_protocol::core::token::{Cursor, StopMode};
//!
//! let mut cursor = Cursor::new("set name \"big dodo\"\nquit");
//! assert_eq!(cursor.next_token(StopMode::StopOnNewline).unwrap(), "set");
//! assert_eq!(cursor.next_token(StopMode::StopOnNewline).unwrap(), "name");
//! assert_eq!(cursor.next_token(StopMode::StopOnNewline).unwrap(), "big dodo");
//! // end of line: absent, and the newline is left in place
//! assert!(cursor.next_token(StopMode::StopOnNewline).is_none());
//! assert_eq!(cursor.remaining(), "\nquit");
//! ```
//!
//! ## Empty vs absent
//! `""` yields a present token of length zero. End of input, or a newline
//! under [`StopMode::StopOnNewline`], yields `None`. Callers that need to
//! tell the two apart match on the `Option` before looking at the length.

use crate::utils::convert;
use std::fmt;
use tracing::trace;

/// Whether a newline ends the current line of tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopMode {
    /// Return no token when a newline is reached, leaving the cursor on it
    StopOnNewline,
    /// Treat newlines like any other whitespace
    #[default]
    DontStopOnNewline,
}

#[inline]
pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b'\0' | b' ' | b'\t' | b'\r' | b'\n')
}

/// Borrowed view of one token and where it starts in the input
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Token<'a> {
    /// The token text, without surrounding quotes
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the token text within the scanned input
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True only for a quoted empty string
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Case-insensitive ASCII comparison
    #[inline]
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.text.eq_ignore_ascii_case(other)
    }

    pub fn to_int(&self) -> Option<i32> {
        convert::try_token_to_int(self.text)
    }

    pub fn to_float(&self) -> Option<f32> {
        convert::try_token_to_float(self.text)
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?} @ {})", self.text, self.offset)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

impl PartialEq<str> for Token<'_> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl AsRef<str> for Token<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// Read position within a bounded input span
///
/// The cursor never reads past the end of its span, including inside an
/// unterminated quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Scan the whole of `src`; embedded NUL bytes are whitespace.
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Scan `src` up to its first NUL, the way NUL-terminated buffers read.
    pub fn terminated(src: &'a str) -> Self {
        let end = src.find('\0').unwrap_or(src.len());
        Self::new(&src[..end])
    }

    /// Current byte offset into the input
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed input
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.src[self.pos..]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Extract the next token, advancing past it.
    pub fn next_token(&mut self, stop: StopMode) -> Option<Token<'a>> {
        let bytes = self.src.as_bytes();
        let mut i = self.pos;

        loop {
            match bytes.get(i) {
                None => {
                    self.pos = i;
                    return None;
                }
                Some(b'\n') if stop == StopMode::StopOnNewline => {
                    self.pos = i;
                    return None;
                }
                Some(&byte) if is_whitespace(byte) => i += 1,
                Some(_) => break,
            }
        }

        let (start, end) = if bytes[i] == b'"' {
            i += 1;
            let start = i;
            while i < bytes.len() && bytes[i] != b'"' {
                i += 1;
            }
            let end = i;
            if i < bytes.len() {
                i += 1; // closing quote
            }
            (start, end)
        } else {
            let start = i;
            while i < bytes.len() && !is_whitespace(bytes[i]) {
                i += 1;
            }
            (start, i)
        };

        self.pos = i;
        let token = Token {
            text: &self.src[start..end],
            offset: start,
        };
        trace!(?token, "Scanned token");
        Some(token)
    }

    /// Read the next token as an integer, or `default` when absent or unparsable
    pub fn parse_int(&mut self, default: i32, stop: StopMode) -> i32 {
        self.next_token(stop)
            .and_then(|token| token.to_int())
            .unwrap_or(default)
    }

    /// Read the next token as a float, or `default` when absent or unparsable
    pub fn parse_float(&mut self, default: f32, stop: StopMode) -> f32 {
        self.next_token(stop)
            .and_then(|token| token.to_float())
            .unwrap_or(default)
    }
}

/// Tokens across line boundaries
impl<'a> Iterator for Cursor<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token(StopMode::DontStopOnNewline)
    }
}
