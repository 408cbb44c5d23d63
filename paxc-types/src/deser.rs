//! Deserialization helpers for the portal's loosely-typed JSON.
//!
//! Counts are documented as strings, but numbers and nulls turn up too.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_string(v: Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string())
    }
}

/// Accepts a string, number, bool or null, yielding the text form.
pub fn lenient_string<'de, D>(d: D) -> Result<Option<String>, D::Error> where D: Deserializer<'de> {
    let v: Option<Value> = Deserialize::deserialize(d)?;
    Ok(v.and_then(value_to_string))
}

/// Like `lenient_string`, but null becomes the empty string.
pub fn lenient_required<'de, D>(d: D) -> Result<String, D::Error> where D: Deserializer<'de> {
    lenient_string(d).map(|x| x.unwrap_or_default())
}

/// Accepts a number or a numeric string; anything else is `None`.
pub fn lenient_count<'de, D>(d: D) -> Result<Option<i64>, D::Error> where D: Deserializer<'de> {
    let v: Option<Value> = Deserialize::deserialize(d)?;
    Ok(match v {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None
    })
}
