//! Structural result detection for untyped values
//!
//! Values that cross a dynamic boundary (script engines, JSON payloads) lose
//! their Rust type. A result there is an object tagged with a boolean `ok`:
//!
//! ```json
//! { "ok": true,  "value": 42 }
//! { "ok": false, "error": "boom" }
//! ```

use serde_json::Value;

/// Whether `value` has the shape of a result.
///
/// The `ok` tag must be a boolean. A `true` tag needs a `value` field, a
/// `false` tag needs an `error` field; the other payload field is not looked
/// at. A field holding `null` counts as missing.
///
/// ```
/// use nebula_outcome::is_result;
/// use serde_json::json;
///
/// assert!(is_result(&json!({ "ok": true, "value": 42 })));
/// assert!(!is_result(&json!({ "ok": true, "error": "x" })));
/// ```
pub fn is_result(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };

    match object.get("ok").and_then(Value::as_bool) {
        Some(true) => is_present(object.get("value")),
        Some(false) => is_present(object.get("error")),
        None => false,
    }
}

fn is_present(field: Option<&Value>) -> bool {
    field.is_some_and(|value| !value.is_null())
}
