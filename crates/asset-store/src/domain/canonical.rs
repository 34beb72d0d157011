//! Canonical record encoding.
//!
//! Every write goes through this module so that two deeply-equal records
//! always serialize to identical bytes, independent of the key order the
//! caller happened to build them with. Callers that hash or compare stored
//! bytes (including peers iterating storage in different physical orders)
//! rely on this.

use serde_json::{Map, Value};

/// Rebuild `value` with object keys sorted ascending (by code point) at
/// every nesting level. Array element order is preserved; it is
/// semantically meaningful.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let mut sorted = Map::with_capacity(entries.len());
            for (key, nested) in entries {
                sorted.insert(key, canonicalize(nested));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        leaf => leaf,
    }
}

/// Canonical byte encoding: sorted keys, compact (whitespace-free) JSON.
pub fn to_canonical_bytes(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&canonicalize(value.clone()))
}
