//! Reusable field validators
//!
//! Each validator is a closure over `(field_name, value)`. Values of a type a
//! validator does not understand pass through; another validator owns that.

use crate::core::field::{FieldFormat, FieldValue};
use serde_json::Value;

/// Validator: field is required (not null)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() {
            Err(format!("'{}' is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be zero or greater
pub fn non_negative() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num < 0.0 => Err(format!(
            "'{}' must not be negative (value: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: number must be strictly positive
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num <= 0.0 => Err(format!(
            "'{}' must be positive (value: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: number must not exceed maximum
pub fn max_value(max: f64) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num > max => Err(format!(
            "'{}' must not exceed {} (value: {})",
            field, max, num
        )),
        _ => Ok(()),
    }
}

/// Validator: value must be a finite number.
///
/// `serde_json` turns NaN and infinities into `null`, so a null here means
/// the number was not finite.
pub fn finite_number() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_number() {
            Ok(())
        } else {
            Err(format!("'{}' must be a finite number", field))
        }
    }
}

/// Validator: string length must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let Some(s) = value.as_str() else {
            return Ok(());
        };
        let len = s.chars().count();
        if len < min {
            Err(format!(
                "'{}' must be at least {} characters (currently: {})",
                field, min, len
            ))
        } else if len > max {
            Err(format!(
                "'{}' must not exceed {} characters (currently: {})",
                field, max, len
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if !allowed.iter().any(|a| a == s) => Err(format!(
            "'{}' must be one of {:?} (current value: {})",
            field, allowed, s
        )),
        _ => Ok(()),
    }
}

/// Validator: string must match a [`FieldFormat`]; empty strings pass
pub fn format(
    format: FieldFormat,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if !s.is_empty() && !format.validate(&FieldValue::from(s)) => Err(format!(
            "'{}' has an invalid format (current value: {})",
            field, s
        )),
        _ => Ok(()),
    }
}
