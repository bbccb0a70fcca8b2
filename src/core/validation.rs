//! Reusable field validators
//!
//! Each validator receives the field name and its raw JSON value and returns
//! a human-readable message on failure. Validators other than [`required`]
//! let `null` through so they can be combined freely.

use serde_json::Value;

/// Validator: field is required (not null)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() {
            Err(format!("field '{}' is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be a string with at least one non-whitespace character
pub fn non_blank_string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Ok(()),
        Value::String(s) if !s.trim().is_empty() => Ok(()),
        Value::String(_) => Err(format!("'{}' must not be blank", field)),
        other => Err(format!("'{}' must be a string (found: {})", field, other)),
    }
}

/// Validator: value must be an integer within `min..=max`
pub fn integer_in_range(
    min: i64,
    max: i64,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if value.is_null() {
            return Ok(());
        }
        match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => Ok(()),
            Some(n) => Err(format!(
                "'{}' must be between {} and {} (found: {})",
                field, min, max, n
            )),
            None => Err(format!("'{}' must be an integer (found: {})", field, value)),
        }
    }
}
