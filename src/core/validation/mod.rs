//! Validation system
//!
//! Validation happens at the boundary, before a value reaches the engine.
//! A [`ValidationConfig`] holds the validators registered per field and
//! collects every failure into a single [`ValidationError::FieldErrors`].

pub mod validators;

use crate::core::error::{FieldValidationError, ValidationError};
use indexmap::IndexMap;
use serde_json::Value;

type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Validators registered per field name
#[derive(Default)]
pub struct ValidationConfig {
    validators: IndexMap<String, Vec<Validator>>,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator for `field`
    pub fn add_validator<F>(&mut self, field: &str, validator: F)
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators
            .entry(field.to_string())
            .or_default()
            .push(Box::new(validator));
    }

    /// Builder-style [`add_validator`](Self::add_validator)
    pub fn with<F>(mut self, field: &str, validator: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.add_validator(field, validator);
        self
    }

    /// Run every validator against the fields of a JSON object.
    ///
    /// Missing fields are validated as `null`.
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        for (field, validators) in &self.validators {
            let value = payload.get(field).unwrap_or(&Value::Null);
            for validator in validators {
                if let Err(message) = validator(field, value) {
                    errors.push(FieldValidationError {
                        field: field.clone(),
                        message,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(failures = errors.len(), "validation failed");
            Err(ValidationError::FieldErrors(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collects_all_failures() {
        let config = ValidationConfig::new()
            .with("price", non_negative())
            .with("quantity", required())
            .with("quantity", non_negative());

        let err = config
            .validate(&json!({"price": -1.0, "quantity": -2}))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["price", "quantity"]);

        let err = config.validate(&json!({"price": 3})).unwrap_err();
        assert_eq!(err.fields(), vec!["quantity"]);
    }

    #[test]
    fn test_valid_payload() {
        let config = ValidationConfig::new().with("price", non_negative());
        assert!(config.validate(&json!({"price": 0})).is_ok());
    }
}
