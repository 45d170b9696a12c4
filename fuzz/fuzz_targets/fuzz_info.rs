#![no_main]

use info_protocol::InfoString;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz info string parsing, then drive set/remove with the tail of the input
    let split = data.first().map_or(0, |&b| b as usize).min(data.len());
    let (head, tail) = data.split_at(split);

    let Ok(mut info) = InfoString::from_bytes(head) else {
        return;
    };
    let Ok(text) = std::str::from_utf8(tail) else {
        return;
    };

    let mut fields = text.split('=');
    if let (Some(key), Some(value)) = (fields.next(), fields.next()) {
        let before = info.clone();
        if info.set_value_for_key(key, value).is_err() {
            assert_eq!(info, before);
        }
        let _ = info.remove_key(key);
    }
    assert!(info.len() < info.limits().max_string);
    assert!(InfoString::parse(info.as_str()).is_ok());
});
