//! Provider (supplier) entity

use crate::core::error::ValidationError;
use crate::core::field::FieldFormat;
use crate::core::validation::{ValidationConfig, validators::*};
use crate::impl_data_entity;

impl_data_entity!(
    Provider,
    "provider",
    "providers",
    ["name", "tax_id", "email"],
    {
        tax_id: String,
        email: String,
        phone: String,
        address: String,
    }
);

impl Provider {
    pub fn validation_config() -> ValidationConfig {
        ValidationConfig::new()
            .with("name", string_length(1, 120))
            .with("tax_id", string_length(1, 30))
            .with("email", format(FieldFormat::Email))
            .with("phone", format(FieldFormat::Phone))
            .with("status", in_list(vec!["active".into(), "inactive".into()]))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let payload = serde_json::to_value(self).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;
        Self::validation_config().validate(&payload)
    }
}
