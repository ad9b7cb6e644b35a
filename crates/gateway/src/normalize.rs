//! Upstream payload normalization.
//!
//! The catalog answers with several shapes: a bare array, an envelope whose
//! `data` is an array or a single object, or a bare object. Everything is
//! flattened into a plain list here so no caller special-cases shape.

use marquee_core::Character;
use serde_json::Value;

/// Flatten any supported payload shape into a list of characters.
///
/// Unsupported shapes yield an empty list; elements that do not decode as
/// a character are skipped.
pub fn normalize(payload: Value) -> Vec<Character> {
    let items = match payload {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(single @ Value::Object(_)) => vec![single],
            Some(data) if !is_blank(&data) => Vec::new(),
            _ if map.contains_key("_id") || map.contains_key("name") => {
                vec![Value::Object(map)]
            }
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Character>(item) {
            Ok(character) => Some(character),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping catalog entry that is not a character");
                None
            }
        })
        .collect()
}

/// A `data` member carrying nothing: the record itself may sit beside it.
fn is_blank(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
