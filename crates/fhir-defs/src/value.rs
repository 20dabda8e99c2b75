//! Presence semantics
//!
//! The engine treats `null`, `""`, `[]`, and `{}` as "value not present".
//! Each structural pass works on a defensive copy with such fields stripped,
//! so instances are never mutated and "empty" never counts as "supplied".

use serde_json::{Map, Value};

/// Whether a JSON value counts as present.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Defensive copy of an object's fields with absent/empty values stripped.
///
/// The returned map iterates in sorted key order, which keeps issue ordering
/// deterministic across repeated validations of the same instance.
#[must_use]
pub fn present_fields(object: &Map<String, Value>) -> Map<String, Value> {
    object
        .iter()
        .filter(|(_, value)| is_present(value))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_are_present() {
        assert!(is_present(&json!(true)));
        assert!(is_present(&json!(false)));
        assert!(is_present(&json!(0)));
        assert!(is_present(&json!("x")));
    }

    #[test]
    fn test_empty_values_are_absent() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!([])));
        assert!(!is_present(&json!({})));
    }

    #[test]
    fn test_non_empty_containers_are_present() {
        assert!(is_present(&json!([null])));
        assert!(is_present(&json!({"a": 1})));
    }

    #[test]
    fn test_present_fields_strips_empties() {
        let instance = json!({
            "a": 1,
            "b": null,
            "c": "",
            "d": [],
            "e": {},
            "f": "kept"
        });
        let fields = present_fields(instance.as_object().unwrap());
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("a"));
        assert!(fields.contains_key("f"));
    }

    #[test]
    fn test_present_fields_iterates_deterministically() {
        let instance = json!({"z": 1, "a": 2, "m": 3});
        let names: Vec<_> = present_fields(instance.as_object().unwrap())
            .keys()
            .cloned()
            .collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }
}
