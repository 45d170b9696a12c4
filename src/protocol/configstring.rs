//! Configstring validation.
//!
//! Configstrings are replicated text values that end up inside quoted
//! console commands on the receiving side. The only structural requirement
//! is that double quotes come in pairs; a configstring need not be a valid
//! info string.

/// True when `text` contains an even number of `"`
pub fn validate_configstring(text: &str) -> bool {
    let mut opened = false;
    for byte in text.bytes() {
        if byte == b'"' {
            opened = !opened;
        }
    }
    !opened
}
