//! Property-based tests using proptest
//!
//! These tests check the codec and scanner invariants across randomly
//! generated keys, values, operation sequences and hostile text.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use info_protocol::config::MAX_INFO_STRING;
use info_protocol::core::info;
use info_protocol::utils::convert::{try_token_to_float, try_token_to_int};
use info_protocol::{validate_configstring, Cursor, InfoString, StopMode};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,63}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.*-]{0,63}"
}

/// Keys, values and hostile text mixed together
fn any_field() -> impl Strategy<Value = String> {
    prop_oneof![
        key_strategy(),
        r#"[a-z\\;"]{0,8}"#,
        ".{0,70}",
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Set(String, String),
    Remove(String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (key_strategy(), value_strategy()).prop_map(|(k, v)| Op::Set(k, v)),
        1 => key_strategy().prop_map(Op::Remove),
    ]
}

// Property: A successful set is immediately readable and lands at the end
proptest! {
    #[test]
    fn prop_set_then_get(
        pairs in prop::collection::vec((key_strategy(), value_strategy()), 0..6),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut info = InfoString::new();
        for (k, v) in &pairs {
            let _ = info.set_value_for_key(k, v);
        }

        if info.set_value_for_key(&key, &value).is_ok() {
            prop_assert_eq!(info.value_for_key(&key).unwrap(), value.as_str());
            let last = info.pairs().last().unwrap();
            prop_assert_eq!(last, (key.as_str(), value.as_str()));
            prop_assert_eq!(info.pairs().filter(|(k, _)| *k == key).count(), 1);
        }
    }
}

// Property: A rejected set never modifies the buffer
proptest! {
    #[test]
    fn prop_rejected_set_is_noop(key in any_field(), value in any_field()) {
        let mut info = InfoString::parse("\\name\\dodo\\hand\\2").unwrap();
        let before = info.clone();

        if info.set_value_for_key(&key, &value).is_err() {
            prop_assert_eq!(info, before);
        } else {
            prop_assert!(info::validate_key(&key));
            prop_assert!(info::validate_value(&value));
        }
    }
}

// Property: Validation never panics and parse agrees with it
proptest! {
    #[test]
    fn prop_validate_total(text in ".{0,600}") {
        let valid = info::validate(&text);
        prop_assert_eq!(InfoString::parse(&text).is_ok(), valid);
        if valid {
            prop_assert!(text.len() < MAX_INFO_STRING);
        }
    }
}

// Property: Any operation sequence keeps the buffer valid and bounded
proptest! {
    #[test]
    fn prop_operations_preserve_validity(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut info = InfoString::new();
        for op in ops {
            match op {
                Op::Set(k, v) => { let _ = info.set_value_for_key(&k, &v); }
                Op::Remove(k) => { info.remove_key(&k).unwrap(); }
            }
            prop_assert!(info.len() <= MAX_INFO_STRING - 1);
            prop_assert!(info::validate(info.as_str()));
        }
    }
}

// Property: Removing twice is the same as removing once
proptest! {
    #[test]
    fn prop_remove_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..32),
        key in key_strategy(),
    ) {
        let mut info = InfoString::new();
        for op in ops {
            if let Op::Set(k, v) = op {
                let _ = info.set_value_for_key(&k, &v);
            }
        }

        info.remove_key(&key).unwrap();
        let once = info.clone();
        info.remove_key(&key).unwrap();

        prop_assert_eq!(&info, &once);
        prop_assert!(!info.contains_key(&key));
    }
}

// Property: Scanning never panics and every token points into its input
proptest! {
    #[test]
    fn prop_tokens_borrow_input(src in ".{0,300}") {
        let mut cursor = Cursor::new(&src);
        let mut last = 0;
        while let Some(token) = cursor.next_token(StopMode::DontStopOnNewline) {
            let start = token.offset();
            prop_assert_eq!(&src[start..start + token.len()], token.as_str());
            prop_assert!(cursor.position() >= last);
            prop_assert!(cursor.position() <= src.len());
            last = cursor.position();
        }
        prop_assert!(cursor.is_at_end());
    }
}

// Property: Line mode never consumes a newline outside quotes
proptest! {
    #[test]
    fn prop_stop_on_newline_holds_position(src in "[a-z \t\n\"]{0,120}") {
        let mut cursor = Cursor::new(&src);
        while cursor.next_token(StopMode::StopOnNewline).is_some() {}

        prop_assert!(cursor.is_at_end() || cursor.remaining().starts_with('\n'));
    }
}

// Property: The NUL-terminated form reads exactly like the bounded form
proptest! {
    #[test]
    fn prop_terminated_matches_bounded(src in "[a-z \t\n\"]{0,120}", junk in ".{0,20}") {
        let raw = format!("{src}\0{junk}");
        let terminated: Vec<_> = Cursor::terminated(&raw).map(|t| t.as_str()).collect();
        let bounded: Vec<_> = Cursor::new(&src).map(|t| t.as_str()).collect();
        prop_assert_eq!(terminated, bounded);
    }
}

// Property: Configstring validity is quote parity
proptest! {
    #[test]
    fn prop_configstring_parity(text in "[a-z\" ;\\\\]{0,64}") {
        let quotes = text.bytes().filter(|&b| b == b'"').count();
        prop_assert_eq!(validate_configstring(&text), quotes % 2 == 0);
    }
}

// Property: Numeric conversion never panics on arbitrary tokens
proptest! {
    #[test]
    fn prop_numeric_conversion_total(text in ".{0,200}") {
        let _ = try_token_to_int(&text);
        let _ = try_token_to_float(&text);
    }

    #[test]
    fn prop_int_roundtrip(n in any::<i32>()) {
        prop_assert_eq!(try_token_to_int(&n.to_string()), Some(n));
    }
}
