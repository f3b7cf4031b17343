//! Boolean coercion for loosely-typed schema flags.
//!
//! Two modes exist and both are load-bearing: [`coerce_bool`] maps the
//! common textual spellings of a flag onto a strict boolean, while
//! [`is_truthy`] applies a value's own truthiness without reinterpreting
//! strings. [`truthy_property`] is the single entry point used wherever
//! a flag is read off a schema object.

use serde_json::{Map, Value};

/// Interprets a loosely-typed value as a strict boolean.
///
/// Recognized truthy spellings are `"1"`, `"true"`, `"yes"` and `"on"`
/// (case-insensitive, surrounding whitespace ignored) and the number 1.
/// Everything else, including unrecognized strings, is false. Booleans
/// pass through unchanged.
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => coerce_bool_str(s),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// String form of [`coerce_bool`], for callers holding a bare `&str`.
pub fn coerce_bool_str(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Returns a value's own truthiness, without string reinterpretation.
///
/// Null, `false`, zero, the empty string, `"0"` and empty arrays are
/// falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

/// Reads a flag off a JSON object and reduces it to a boolean.
///
/// An absent key is false. When `coerce` is set, non-boolean values go
/// through [`coerce_bool`]; otherwise the value's own truthiness is
/// used. Callers rely on both modes: flags written by the form editor
/// are coerced, values probed on raw request data are not.
pub fn truthy_property(map: &Map<String, Value>, key: &str, coerce: bool) -> bool {
    let Some(value) = map.get(key) else {
        return false;
    };

    if coerce && !value.is_boolean() {
        return coerce_bool(value);
    }

    is_truthy(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_truthy_spellings() {
        assert!(coerce_bool(&json!(true)));
        assert!(coerce_bool(&json!("1")));
        assert!(coerce_bool(&json!("true")));
        assert!(coerce_bool(&json!("TRUE")));
        assert!(coerce_bool(&json!("yes")));
        assert!(coerce_bool(&json!("on")));
        assert!(coerce_bool(&json!(" on ")));
        assert!(coerce_bool(&json!(1)));
    }

    #[test]
    fn test_coerce_falsy_spellings() {
        assert!(!coerce_bool(&json!(false)));
        assert!(!coerce_bool(&json!("0")));
        assert!(!coerce_bool(&json!("false")));
        assert!(!coerce_bool(&json!("no")));
        assert!(!coerce_bool(&json!("off")));
        assert!(!coerce_bool(&json!("")));
        assert!(!coerce_bool(&json!(0)));
        assert!(!coerce_bool(&json!(2)));
        assert!(!coerce_bool(&Value::Null));
        // Unrecognized strings are falsy, not an error.
        assert!(!coerce_bool(&json!("maybe")));
    }

    #[test]
    fn test_raw_truthiness() {
        assert!(is_truthy(&json!("maybe")));
        assert!(is_truthy(&json!(2)));
        assert!(is_truthy(&json!([1])));
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_truthy_property_absent_key() {
        let map = Map::new();
        assert!(!truthy_property(&map, "isRequired", true));
        assert!(!truthy_property(&map, "isRequired", false));
    }

    #[test]
    fn test_truthy_property_modes() {
        let obj = json!({ "flag": "yes", "other": "maybe" });
        let map = obj.as_object().unwrap();

        // Coerced: spelling decides.
        assert!(truthy_property(map, "flag", true));
        assert!(!truthy_property(map, "other", true));

        // Raw: any non-empty string wins.
        assert!(truthy_property(map, "flag", false));
        assert!(truthy_property(map, "other", false));
    }

    #[test]
    fn test_truthy_property_boolean_passthrough() {
        let obj = json!({ "yes": true, "no": false });
        let map = obj.as_object().unwrap();
        assert!(truthy_property(map, "yes", true));
        assert!(!truthy_property(map, "no", true));
    }
}
