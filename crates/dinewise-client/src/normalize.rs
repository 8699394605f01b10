//! Collapse the two collection wire shapes into a bare list.
//!
//! Older backend versions answer collection endpoints with a bare JSON array;
//! newer ones wrap it as `{ "data": [...], "pagination": {...} }`. Callers
//! always get the bare list. Anything else degrades to an empty list: an
//! empty collection is always safe to render.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::Pagination;

/// Returns the records carried by `payload`.
///
/// - bare array: returned unchanged, same order;
/// - object with an array `data` field: that array, `pagination` dropped;
/// - anything else, including an object whose `data` is not an array: empty.
#[must_use]
pub fn normalize(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Like [`normalize`] but also returns the envelope's pagination block, for
/// callers that page through results.
///
/// A missing or malformed `pagination` block yields `None`.
#[must_use]
pub fn split_envelope(payload: Value) -> (Vec<Value>, Option<Pagination>) {
    match payload {
        Value::Object(mut map) => {
            let pagination = map
                .remove("pagination")
                .and_then(|p| serde_json::from_value::<Pagination>(p).ok());
            (normalize(Value::Object(map)), pagination)
        }
        other => (normalize(other), None),
    }
}

/// Normalizes `payload` and deserializes each record, skipping any that do
/// not match `T`.
pub fn normalize_records<T: DeserializeOwned>(payload: Value, context: &str) -> Vec<T> {
    normalize(payload)
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            serde_json::from_value::<T>(item)
                .map_err(|e| {
                    tracing::warn!(context, index, error = %e, "skipping malformed record");
                })
                .ok()
        })
        .collect()
}
