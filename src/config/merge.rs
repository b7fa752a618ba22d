//! Deep merge functionality for configuration documents.
//!
//! Two flavours live here:
//! - [`deep_merge`] is strict and used for figure documents: a mapping may only
//!   be merged with a mapping.
//! - [`overlay`] is lenient and used for application config tiers, where a
//!   higher tier may replace a value of any shape.

use crate::error::{DispatchError, DispatchResult};
use serde_json::{Map, Value};

/// Recursively merge two configuration mappings; `overlay` wins on leaves.
///
/// - Keys only in `base` keep their value and position
/// - Keys in both that hold mappings on both sides are merged recursively
/// - Keys in both that hold non-mappings on both sides take the overlay value
/// - Keys only in `overlay` are appended in overlay order
/// - A key holding a mapping on one side and anything else on the other is a
///   `MergeConflict`
///
/// # Example
/// ```
/// use serde_json::json;
/// use xyplot::config::deep_merge;
///
/// let base = json!({"title": {"args": "A", "loc": "left"}, "grid": true});
/// let overlay = json!({"title": {"args": "B"}});
/// let merged = deep_merge(
///     base.as_object().unwrap().clone(),
///     overlay.as_object().unwrap().clone(),
/// ).unwrap();
/// assert_eq!(merged["title"], json!({"args": "B", "loc": "left"}));
/// ```
pub fn deep_merge(base: Map<String, Value>, mut overlay: Map<String, Value>) -> DispatchResult<Map<String, Value>> {
    let mut result = Map::with_capacity(base.len() + overlay.len());

    for (key, base_value) in base {
        let merged = match (base_value, overlay.shift_remove(&key)) {
            (Value::Object(base_map), Some(Value::Object(overlay_map))) => {
                Value::Object(deep_merge(base_map, overlay_map)?)
            }
            (Value::Object(_), Some(_)) | (_, Some(Value::Object(_))) => {
                return Err(DispatchError::merge_conflict(&key));
            }
            (_, Some(overlay_value)) => overlay_value,
            (base_value, None) => base_value,
        };
        result.insert(key, merged);
    }

    for (key, overlay_value) in overlay {
        result.insert(key, overlay_value);
    }

    Ok(result)
}

/// Strictly merge several documents in order, later ones taking precedence.
pub fn deep_merge_all(
    documents: impl IntoIterator<Item = Map<String, Value>>,
) -> DispatchResult<Map<String, Value>> {
    documents
        .into_iter()
        .try_fold(Map::new(), deep_merge)
}

/// Lenient merge of two JSON values, with `overlay` taking precedence.
///
/// - Objects are merged recursively
/// - Arrays, strings, numbers, booleans are replaced entirely
/// - A null overlay keeps the base (null means "not specified")
pub fn overlay(base: Value, overlay_value: Value) -> Value {
    match (base, overlay_value) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                let merged = if let Some(base_value) = base_map.shift_remove(&key) {
                    overlay(base_value, value)
                } else {
                    value
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, value) => value,
    }
}

/// Merge config tiers in order (first is lowest priority).
pub fn merge_layers(layers: impl IntoIterator<Item = Value>) -> Value {
    layers.into_iter().fold(Value::Null, overlay)
}
