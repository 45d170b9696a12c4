//! Numeric conversion of scanned tokens.
//!
//! Tokens from untrusted text are bounded before conversion; anything that
//! does not convert in full is rejected rather than partially read.

/// Tokens this long or longer are never numbers
pub const MAX_NUMERIC_TOKEN_LEN: usize = 128;

/// Parse a whole token as a signed 32-bit integer
pub fn try_token_to_int(token: &str) -> Option<i32> {
    if token.len() >= MAX_NUMERIC_TOKEN_LEN {
        return None;
    }
    token.parse::<i32>().ok()
}

/// Parse a whole token as a float; empty tokens are rejected
pub fn try_token_to_float(token: &str) -> Option<f32> {
    if token.is_empty() || token.len() >= MAX_NUMERIC_TOKEN_LEN {
        return None;
    }
    token.parse::<f32>().ok()
}

/// Parse a string of ASCII digits as an unsigned 64-bit integer.
///
/// Signs, whitespace and overflow are all rejected.
pub fn try_string_to_u64(text: &str) -> Option<u64> {
    if text.is_empty() {
        return None;
    }

    text.bytes().try_fold(0u64, |acc, byte| {
        if !byte.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u64::from(byte - b'0'))
    })
}

pub fn token_to_int_or(token: &str, default: i32) -> i32 {
    try_token_to_int(token).unwrap_or(default)
}

pub fn token_to_float_or(token: &str, default: f32) -> f32 {
    try_token_to_float(token).unwrap_or(default)
}

pub fn string_to_u64_or(text: &str, default: u64) -> u64 {
    try_string_to_u64(text).unwrap_or(default)
}
