//! # Entity Text
//!
//! Worldspawn key lookup over the brace-delimited entity lump shipped with
//! map assets:
//!
//! ```text
//! {
//! "classname" "worldspawn"
//! "message" "Dodo Arena"
//! }
//! ```
//!
//! Entity text comes from local assets, not from peers. Text that does not
//! open with `{` means the content pipeline produced a broken map, and the
//! resulting [`ProtocolError::MalformedEntities`] is treated as fatal by
//! callers.

use crate::core::token::{Cursor, StopMode};
use crate::error::{constants, ProtocolError, Result};
use crate::utils::metrics::{global_metrics, Timer};
use tracing::error;

/// Value of the first key in the leading entity matching `name`, ignoring
/// ASCII case.
///
/// Scanning stops at the closing `}` or at the first absent or empty key or
/// value, and yields `Ok(None)` when no key matched.
pub fn parse_worldspawn_key<'a>(entities: &'a str, name: &str) -> Result<Option<&'a str>> {
    let _timer = Timer::start("parse_worldspawn_key");
    let mut cursor = Cursor::new(entities);

    match cursor.next_token(StopMode::DontStopOnNewline) {
        Some(token) if token == "{" => {}
        _ => {
            error!("{}", constants::ERR_ENTITIES_NO_BRACE);
            global_metrics().entities_malformed();
            return Err(ProtocolError::MalformedEntities(
                constants::ERR_ENTITIES_NO_BRACE.to_string(),
            ));
        }
    }
    global_metrics().entities_parsed();

    loop {
        let key = cursor.next_token(StopMode::DontStopOnNewline);
        let value = cursor.next_token(StopMode::DontStopOnNewline);

        let (Some(key), Some(value)) = (key, value) else {
            return Ok(None);
        };
        if key.is_empty() || value.is_empty() || key == "}" {
            return Ok(None);
        }

        if key.eq_ignore_case(name) {
            return Ok(Some(value.as_str()));
        }
    }
}
