//! Flat record form of an entity.
//!
//! A record maps field names to JSON values. Values are limited to strings,
//! numbers, booleans and arrays of those.

use serde_json::Value as JsonValue;

use crate::error::{DomainError, DomainResult};

/// Serialized entity: field name -> value.
pub type Record = serde_json::Map<String, JsonValue>;

/// Discriminator field holding the concrete type name.
pub const CLASS_KEY: &str = "__class__";
pub const ID_KEY: &str = "id";
pub const CREATED_AT_KEY: &str = "created_at";
pub const UPDATED_AT_KEY: &str = "updated_at";

/// Fields owned by the entity base; never part of an attribute set.
pub const RESERVED_KEYS: [&str; 4] = [CLASS_KEY, ID_KEY, CREATED_AT_KEY, UPDATED_AT_KEY];

pub fn is_reserved(field: &str) -> bool {
    RESERVED_KEYS.contains(&field)
}

/// Check that `value` is a portable record value.
pub fn ensure_portable(field: &str, value: &JsonValue) -> DomainResult<()> {
    match value {
        JsonValue::String(_) | JsonValue::Number(_) | JsonValue::Bool(_) => Ok(()),
        JsonValue::Array(items) => items.iter().try_for_each(|item| match item {
            JsonValue::Array(_) => Err(DomainError::validation(format!(
                "{field}: nested sequences are not supported"
            ))),
            other => ensure_portable(field, other),
        }),
        JsonValue::Null => Err(DomainError::validation(format!(
            "{field}: absent value is not allowed"
        ))),
        JsonValue::Object(_) => Err(DomainError::validation(format!(
            "{field}: nested mappings are not supported"
        ))),
    }
}

/// Read a required string field, rejecting absence and explicit null.
pub fn required_str<'a>(record: &'a Record, field: &str) -> DomainResult<&'a str> {
    match record.get(field) {
        None => Err(DomainError::validation(format!("{field}: missing"))),
        Some(JsonValue::Null) => Err(DomainError::validation(format!(
            "{field}: absent value is not allowed"
        ))),
        Some(JsonValue::String(s)) => Ok(s),
        Some(other) => Err(DomainError::validation(format!(
            "{field}: expected a string, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_and_flat_sequences_are_portable() {
        for value in [json!("a"), json!(1), json!(1.5), json!(true), json!(["a", 2, false])] {
            assert!(ensure_portable("f", &value).is_ok(), "{value}");
        }
    }

    #[test]
    fn null_objects_and_nested_sequences_are_not() {
        for value in [json!(null), json!({"a": 1}), json!([[1]]), json!([null])] {
            assert!(ensure_portable("f", &value).is_err(), "{value}");
        }
    }

    #[test]
    fn required_str_distinguishes_missing_null_and_wrong_kind() {
        let record = json!({"id": null, "name": 5, "ok": "x"});
        let record = record.as_object().unwrap();

        assert_eq!(required_str(record, "ok").unwrap(), "x");
        assert!(matches!(required_str(record, "gone"), Err(DomainError::Validation(m)) if m.contains("missing")));
        assert!(matches!(required_str(record, "id"), Err(DomainError::Validation(m)) if m.contains("absent")));
        assert!(matches!(required_str(record, "name"), Err(DomainError::Validation(m)) if m.contains("expected")));
    }
}
