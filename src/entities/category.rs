//! Category entity

use crate::core::error::ValidationError;
use crate::core::validation::{ValidationConfig, validators::*};
use crate::impl_data_entity;
use uuid::Uuid;

impl_data_entity!(
    Category,
    "category",
    "categories",
    ["name", "description"],
    {
        description: String,
        parent_id: Option<Uuid>,
    }
);

impl Category {
    pub fn validation_config() -> ValidationConfig {
        ValidationConfig::new()
            .with("name", string_length(1, 80))
            .with("status", in_list(vec!["active".into(), "inactive".into()]))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let payload = serde_json::to_value(self).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;
        Self::validation_config().validate(&payload)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
