//! Response body normalization.
//!
//! The backend is inconsistent about envelopes: some endpoints return a bare
//! array, others `{ "data": [...] }`, and single entities may or may not be
//! wrapped in `{ "data": {...} }`. Everything above the gateway sees one shape.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;

/// Decode a single entity, unwrapping a `data` envelope if present.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body is not JSON or does not match `T`.
pub fn decode_entity<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let value = match value {
        Value::Object(mut map) if is_envelope(&map) => map.remove("data").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Normalize a collection body to a `Vec`.
///
/// A bare array and `{ "data": [...] }` are equivalent. Any other shape yields
/// an empty list. Elements that fail to decode are skipped. Both cases are
/// logged at `warn` since they mean the backend contract drifted.
#[must_use]
pub fn normalize_list<T: DeserializeOwned>(body: &str) -> Vec<T> {
    let items = match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Object(mut map)) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("List response has no data array; treating as empty");
                return Vec::new();
            }
        },
        Ok(_) => {
            warn!("List response is neither an array nor an object; treating as empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "List response is not JSON; treating as empty");
            return Vec::new();
        }
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "Skipping list element that failed to decode");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        warn!(total, decoded = decoded.len(), "Some list elements were dropped");
    }
    decoded
}

/// An object is an envelope when `data` is its payload, not a field.
///
/// Entities never carry a `data` key next to an `id`, so an object with `data`
/// and no `id` is treated as a wrapper.
fn is_envelope(map: &serde_json::Map<String, Value>) -> bool {
    map.get("data").is_some_and(|data| data.is_object() || data.is_array())
        && !map.contains_key("id")
}
