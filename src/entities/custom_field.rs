//! Extra fields defined by users on top of the built-in catalog fields

use crate::core::error::ValidationError;
use crate::core::validation::{ValidationConfig, validators::*};
use crate::impl_data_entity;
use serde_json::Value;

/// Allowed values of `CustomField::field_type`
pub const FIELD_TYPES: &[&str] = &["text", "number", "date", "boolean", "select"];

impl_data_entity!(
    CustomField,
    "custom_field",
    "custom_fields",
    ["name", "target_entity"],
    {
        target_entity: String,
        field_type: String,
        required: bool,
        options: Vec<String>,
    }
);

impl CustomField {
    pub fn validation_config() -> ValidationConfig {
        ValidationConfig::new()
            .with("name", string_length(1, 60))
            .with("target_entity", string_length(1, 40))
            .with(
                "field_type",
                in_list(FIELD_TYPES.iter().map(|s| s.to_string()).collect()),
            )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let payload = serde_json::to_value(self).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;
        Self::validation_config().validate(&payload)?;

        if self.field_type == "select" && self.options.is_empty() {
            return Err(ValidationError::FieldError {
                field: "options".to_string(),
                message: "'options' must not be empty for a select field".to_string(),
            });
        }
        Ok(())
    }

    /// Check a value entered for this field
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() || value.as_str().is_some_and(str::is_empty) {
            return !self.required;
        }

        match self.field_type.as_str() {
            "number" => value.is_number() || value.as_str().is_some_and(|s| s.trim().parse::<f64>().is_ok()),
            "boolean" => value.is_boolean(),
            "date" => value
                .as_str()
                .is_some_and(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()),
            "select" => value.as_str().is_some_and(|s| self.options.iter().any(|o| o == s)),
            _ => value.is_string(),
        }
    }
}
