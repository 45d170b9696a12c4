#![no_main]

use info_protocol::{Cursor, StopMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the scanner in both modes - test for panics, out-of-bounds reads, infinite loops
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut cursor = Cursor::new(text);
    while !cursor.is_at_end() {
        while cursor.next_token(StopMode::StopOnNewline).is_some() {}
        let before = cursor.position();
        let _ = cursor.next_token(StopMode::DontStopOnNewline);
        assert!(cursor.position() > before || cursor.is_at_end());
    }

    let _ = Cursor::terminated(text).count();
});
