#![no_main]

use info_protocol::parse_worldspawn_key;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz entity text lookup
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_worldspawn_key(text, "classname");
        let _ = parse_worldspawn_key(text, "message");
    }
});
