//! Warehouse entity

use crate::core::error::ValidationError;
use crate::core::validation::{ValidationConfig, validators::*};
use crate::impl_data_entity;

impl_data_entity!(
    Warehouse,
    "warehouse",
    "warehouses",
    ["name", "code", "location"],
    {
        code: String,
        location: String,
        capacity: i64,
    }
);

impl Warehouse {
    pub fn validation_config() -> ValidationConfig {
        ValidationConfig::new()
            .with("name", string_length(1, 80))
            .with("code", string_length(1, 20))
            .with("capacity", non_negative())
            .with("status", in_list(vec!["active".into(), "inactive".into()]))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let payload = serde_json::to_value(self).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;
        Self::validation_config().validate(&payload)
    }
}
