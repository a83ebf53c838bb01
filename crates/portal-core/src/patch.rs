//! JSON merge-patch, the write primitive of the document store.
//!
//! Objects merge key by key and recursively; arrays and scalars replace the
//! target value whole; a `null` in the patch removes the key. A patch that is
//! not an object replaces the target.

use serde_json::{Map, Value};

/// Applies `patch` onto `target` in place.
pub fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_fields) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target_fields) = target {
        for (key, value) in patch_fields {
            if value.is_null() {
                target_fields.remove(key);
            } else {
                merge_patch(
                    target_fields.entry(key.clone()).or_insert(Value::Null),
                    value,
                );
            }
        }
    }
}
